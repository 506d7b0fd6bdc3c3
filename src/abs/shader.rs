//! OpenGL Shaders
//!
//! This module defines [`ShaderStage`] descriptors, the best-effort
//! [`build_program`] routine that compiles and links them, and the
//! [`ShaderProgram`] wrapper that owns the resulting program.

use std::fmt;
use std::sync::Arc;

use super::gl::GlApi;

/// Returns the human-readable label of a shader stage kind.
pub fn shader_type_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "",
    }
}

/// A single compilable unit: the stage kind (a GL shader type enum) and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderStage {
    pub shader_type: u32,
    pub source: String,
}

impl ShaderStage {
    pub fn new(shader_type: u32, source: impl Into<String>) -> Self {
        Self {
            shader_type,
            source: source.into(),
        }
    }

    pub fn vertex(source: impl Into<String>) -> Self {
        Self::new(glow::VERTEX_SHADER, source)
    }

    pub fn fragment(source: impl Into<String>) -> Self {
        Self::new(glow::FRAGMENT_SHADER, source)
    }
}

/// A compiler or linker report collected while building a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Compile { shader_type: u32, log: String },
    Link { log: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Compile { shader_type, log } => write!(
                f,
                "{} shader compilation failed:\n{}",
                shader_type_name(*shader_type),
                log
            ),
            Diagnostic::Link { log } => write!(f, "shader program link failed:\n{}", log),
        }
    }
}

/// The outcome of [`build_program`]: a program handle that may or may not be
/// usable, plus every diagnostic produced on the way.
#[derive(Debug)]
pub struct ProgramBuild<P> {
    pub program: P,
    pub diagnostics: Vec<Diagnostic>,
}

impl<P> ProgramBuild<P> {
    /// Whether the program linked.
    pub fn is_linked(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Link { .. }))
    }

    /// Diagnostics of the stages that failed to compile.
    pub fn compile_failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::Compile { .. }))
    }
}

/// Compiles every stage, attaches the ones that compiled, and links them.
///
/// Compile and link failures are logged and collected but never abort the
/// build: the program handle is always returned. Stage objects are deleted
/// before returning, whatever the outcome. The only error is the driver
/// refusing to create the program object itself.
pub fn build_program<G: GlApi>(
    gl: &G,
    stages: &[ShaderStage],
) -> Result<ProgramBuild<G::Program>, String> {
    let program = gl.create_program()?;
    let mut diagnostics = Vec::new();
    let mut created = Vec::with_capacity(stages.len());

    for stage in stages {
        let shader = match gl.create_shader(stage.shader_type) {
            Ok(shader) => shader,
            Err(log) => {
                report(&mut diagnostics, Diagnostic::Compile {
                    shader_type: stage.shader_type,
                    log,
                });
                continue;
            }
        };

        if gl.compile_shader(shader, &stage.source) {
            gl.attach_shader(program, shader);
            created.push((shader, true));
        } else {
            report(&mut diagnostics, Diagnostic::Compile {
                shader_type: stage.shader_type,
                log: gl.shader_info_log(shader),
            });
            created.push((shader, false));
        }
    }

    if !gl.link_program(program) {
        report(&mut diagnostics, Diagnostic::Link {
            log: gl.program_info_log(program),
        });
    }

    for (shader, attached) in created {
        if attached {
            gl.detach_shader(program, shader);
        }
        gl.delete_shader(shader);
    }

    Ok(ProgramBuild {
        program,
        diagnostics,
    })
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::error!("{}", diagnostic);
    diagnostics.push(diagnostic);
}

/// A linked (or best-effort linked) shader program.
pub struct ShaderProgram<G: GlApi = glow::Context> {
    gl: Arc<G>,
    build: ProgramBuild<G::Program>,
}

impl<G: GlApi> ShaderProgram<G> {
    /// Builds a program from the given stages. See [`build_program`].
    pub fn new(gl: &Arc<G>, stages: &[ShaderStage]) -> Result<Self, String> {
        let build = build_program(gl.as_ref(), stages)?;
        Ok(Self {
            gl: Arc::clone(gl),
            build,
        })
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.build.program));
    }

    pub fn compile_failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.build.compile_failures()
    }

    pub fn is_linked(&self) -> bool {
        self.build.is_linked()
    }
}

impl<G: GlApi> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.build.program);
    }
}
