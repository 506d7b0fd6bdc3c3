//! The slice of OpenGL this application talks to.
//!
//! Everything that compiles shaders, binds programs or draws goes through the
//! [`GlApi`] trait instead of calling [`glow::HasContext`] directly, so the
//! shader builder and the frame logic can be exercised without a window.

use glow::HasContext;

/// OpenGL entry points used by the shader builder and the render loop.
pub trait GlApi {
    type Shader: Copy;
    type Program: Copy;
    type VertexArray: Copy;

    fn create_program(&self) -> Result<Self::Program, String>;
    fn delete_program(&self, program: Self::Program);
    fn create_shader(&self, shader_type: u32) -> Result<Self::Shader, String>;
    fn delete_shader(&self, shader: Self::Shader);

    /// Uploads the source and compiles it. Returns the compile status.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);

    /// Links the program. Returns the link status.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);

    fn use_program(&self, program: Option<Self::Program>);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
    fn error(&self) -> u32;
}

impl GlApi for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type VertexArray = glow::VertexArray;

    fn create_program(&self) -> Result<glow::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn create_shader(&self, shader_type: u32) -> Result<glow::Shader, String> {
        unsafe { HasContext::create_shader(self, shader_type) }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn compile_shader(&self, shader: glow::Shader, source: &str) -> bool {
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
            self.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: glow::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn attach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: glow::Program, shader: glow::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: glow::Program) -> bool {
        unsafe {
            HasContext::link_program(self, program);
            self.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: glow::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn create_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn delete_vertex_array(&self, vertex_array: glow::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<glow::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn use_program(&self, program: Option<glow::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, mode, first, count) }
    }

    fn error(&self) -> u32 {
        unsafe { self.get_error() }
    }
}

/// Recording stand-in for a GL context.
///
/// A shader "compiles" when its source starts with a `#version` line and does
/// not contain the word `syntax_error`. A program links when it has at least
/// one vertex and one fragment stage attached. Like a core-profile context,
/// drawing needs both a linked program and a vertex array bound.
#[cfg(test)]
pub mod mock {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    use super::GlApi;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Viewport(i32, i32, i32, i32),
        UseProgram(Option<u32>),
        BindVertexArray(Option<u32>),
        DrawArrays(u32, i32, i32),
    }

    #[derive(Default)]
    struct State {
        next_id: u32,
        shaders: HashMap<u32, u32>,
        programs: HashMap<u32, Vec<u32>>,
        linked: HashMap<u32, bool>,
        vertex_arrays: HashSet<u32>,
        bound_vertex_array: Option<u32>,
        calls: Vec<Call>,
        pending_error: u32,
    }

    #[derive(Default)]
    pub struct MockGl {
        state: RefCell<State>,
        fail_create_shader: bool,
    }

    impl MockGl {
        pub fn new() -> Self {
            Self::default()
        }

        /// A context whose `create_shader` always fails.
        pub fn failing_shader_creation() -> Self {
            Self {
                fail_create_shader: true,
                ..Self::default()
            }
        }

        /// Number of stage objects that were created and not yet deleted.
        pub fn live_shaders(&self) -> usize {
            self.state.borrow().shaders.len()
        }

        pub fn live_programs(&self) -> usize {
            self.state.borrow().programs.len()
        }

        pub fn live_vertex_arrays(&self) -> usize {
            self.state.borrow().vertex_arrays.len()
        }

        pub fn attached(&self, program: u32) -> Vec<u32> {
            self.state
                .borrow()
                .programs
                .get(&program)
                .cloned()
                .unwrap_or_default()
        }

        pub fn is_linked(&self, program: u32) -> bool {
            self.state
                .borrow()
                .linked
                .get(&program)
                .copied()
                .unwrap_or(false)
        }

        pub fn calls(&self) -> Vec<Call> {
            self.state.borrow().calls.clone()
        }

        pub fn raise_error(&self, code: u32) {
            self.state.borrow_mut().pending_error = code;
        }

        fn next_id(state: &mut State) -> u32 {
            state.next_id += 1;
            state.next_id
        }
    }

    impl GlApi for MockGl {
        type Shader = u32;
        type Program = u32;
        type VertexArray = u32;

        fn create_program(&self) -> Result<u32, String> {
            let mut state = self.state.borrow_mut();
            let id = Self::next_id(&mut state);
            state.programs.insert(id, Vec::new());
            Ok(id)
        }

        fn delete_program(&self, program: u32) {
            let mut state = self.state.borrow_mut();
            state.programs.remove(&program);
            state.linked.remove(&program);
        }

        fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
            if self.fail_create_shader {
                return Err("out of shader objects".to_string());
            }
            let mut state = self.state.borrow_mut();
            let id = Self::next_id(&mut state);
            state.shaders.insert(id, shader_type);
            Ok(id)
        }

        fn delete_shader(&self, shader: u32) {
            self.state.borrow_mut().shaders.remove(&shader);
        }

        fn compile_shader(&self, _shader: u32, source: &str) -> bool {
            source.starts_with("#version") && !source.contains("syntax_error")
        }

        fn shader_info_log(&self, _shader: u32) -> String {
            "0:1(1): error: syntax error, unexpected IDENTIFIER".to_string()
        }

        fn attach_shader(&self, program: u32, shader: u32) {
            if let Some(attached) = self.state.borrow_mut().programs.get_mut(&program) {
                attached.push(shader);
            }
        }

        fn detach_shader(&self, program: u32, shader: u32) {
            if let Some(attached) = self.state.borrow_mut().programs.get_mut(&program) {
                attached.retain(|s| *s != shader);
            }
        }

        fn link_program(&self, program: u32) -> bool {
            let mut state = self.state.borrow_mut();
            let kinds: Vec<u32> = state
                .programs
                .get(&program)
                .map(|attached| {
                    attached
                        .iter()
                        .filter_map(|s| state.shaders.get(s).copied())
                        .collect()
                })
                .unwrap_or_default();
            let ok = kinds.contains(&glow::VERTEX_SHADER) && kinds.contains(&glow::FRAGMENT_SHADER);
            state.linked.insert(program, ok);
            ok
        }

        fn program_info_log(&self, _program: u32) -> String {
            "error: program is missing a vertex or fragment stage".to_string()
        }

        fn create_vertex_array(&self) -> Result<u32, String> {
            let mut state = self.state.borrow_mut();
            let id = Self::next_id(&mut state);
            state.vertex_arrays.insert(id);
            Ok(id)
        }

        fn delete_vertex_array(&self, vertex_array: u32) {
            let mut state = self.state.borrow_mut();
            state.vertex_arrays.remove(&vertex_array);
            if state.bound_vertex_array == Some(vertex_array) {
                state.bound_vertex_array = None;
            }
        }

        fn bind_vertex_array(&self, vertex_array: Option<u32>) {
            let mut state = self.state.borrow_mut();
            match vertex_array {
                Some(id) if !state.vertex_arrays.contains(&id) => {
                    state.pending_error = glow::INVALID_OPERATION;
                }
                _ => state.bound_vertex_array = vertex_array,
            }
            state.calls.push(Call::BindVertexArray(vertex_array));
        }

        fn use_program(&self, program: Option<u32>) {
            self.state.borrow_mut().calls.push(Call::UseProgram(program));
        }

        fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
            self.state
                .borrow_mut()
                .calls
                .push(Call::Viewport(x, y, width, height));
        }

        fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
            let mut state = self.state.borrow_mut();
            let bound = state.calls.iter().rev().find_map(|c| match c {
                Call::UseProgram(p) => Some(*p),
                _ => None,
            });
            let usable = matches!(bound, Some(Some(p)) if state.linked.get(&p).copied().unwrap_or(false));
            if !usable || state.bound_vertex_array.is_none() {
                state.pending_error = glow::INVALID_OPERATION;
            }
            state.calls.push(Call::DrawArrays(mode, first, count));
        }

        fn error(&self) -> u32 {
            std::mem::replace(&mut self.state.borrow_mut().pending_error, glow::NO_ERROR)
        }
    }
}
