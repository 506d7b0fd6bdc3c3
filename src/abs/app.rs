//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::fmt;
use std::sync::Arc;

use crate::config::{AppConfig, GlProfile};
use crate::input::{InputHandler, LoopControl, dispatch_event};
use crate::render;

/// Fatal startup failures.
#[derive(Debug, Clone)]
pub enum AppError {
    /// SDL or its video subsystem could not be initialized.
    Sdl(String),
    /// The window could not be created.
    Window(String),
    /// The OpenGL context could not be created or made current.
    Context(String),
    /// OpenGL entry points could not be resolved.
    GlLoad(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Sdl(msg) => write!(f, "Failed to initialize SDL: {}", msg),
            AppError::Window(msg) => write!(f, "Failed to create window: {}", msg),
            AppError::Context(msg) => write!(f, "Failed to create OpenGL context: {}", msg),
            AppError::GlLoad(msg) => write!(f, "Failed to initialize OpenGL context: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Entry points that must resolve for the context to be considered loaded.
const REQUIRED_GL_FUNCTIONS: [&str; 4] = [
    "glGetString",
    "glCreateProgram",
    "glCreateShader",
    "glDrawArrays",
];

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window, makes an OpenGL context current on it and loads
    /// the OpenGL function table.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(match config.profile {
            GlProfile::Core => sdl2::video::GLProfile::Core,
            GlProfile::Gles => sdl2::video::GLProfile::GLES,
        });
        gl_attr.set_context_version(config.gl_major, config.gl_minor);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| AppError::Window(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;

        if let Some(missing) = REQUIRED_GL_FUNCTIONS
            .iter()
            .find(|name| video_subsystem.gl_get_proc_address(name).is_null())
        {
            return Err(AppError::GlLoad(format!("{} could not be resolved", missing)));
        }
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let gl = Arc::new(gl);

        let version = glow::HasContext::version(gl.as_ref());
        log::debug!(
            "OpenGL context {}.{} ({}embedded) {}",
            version.major,
            version.minor,
            if version.is_embedded { "" } else { "not " },
            version.vendor_info
        );

        let swap_interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(swap_interval) {
            log::warn!("Failed to set swap interval: {}", e);
        }

        let event_pump = sdl.event_pump().map_err(AppError::Sdl)?;

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// The negotiated OpenGL version as `(major, minor)`.
    pub fn gl_version(&self) -> (u32, u32) {
        let version = glow::HasContext::version(self.gl.as_ref());
        (version.major, version.minor)
    }

    /// Polls events, draws and presents until the window is asked to close.
    ///
    /// A shader program must already be bound.
    pub fn run<H: InputHandler>(&mut self, handler: &mut H) {
        let mut frames: u64 = 0;

        'running: loop {
            for event in self.event_pump.poll_iter() {
                if dispatch_event(self.gl.as_ref(), handler, &event) == LoopControl::Exit {
                    break 'running;
                }
            }

            render::draw_frame(self.gl.as_ref());
            if frames == 0 {
                render::check_errors(self.gl.as_ref());
            }
            frames += 1;

            self.window.gl_swap_window();
        }

        log::info!("Window closed after {} frames", frames);
    }
}
