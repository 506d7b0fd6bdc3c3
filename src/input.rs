//! Window and input event routing.
//!
//! The render loop hands every SDL event to [`dispatch_event`]. Window
//! resizes are handled here; keyboard, mouse and scroll input is forwarded to
//! an [`InputHandler`], whose methods do nothing unless overridden.

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{Keycode, Mod, Scancode};
use sdl2::mouse::MouseButton;

use crate::abs::GlApi;

/// Receives input events. Every method defaults to a no-op.
pub trait InputHandler {
    /// A key was pressed (`pressed == true`) or released.
    fn key(
        &mut self,
        _keycode: Option<Keycode>,
        _scancode: Option<Scancode>,
        _pressed: bool,
        _modifiers: Mod,
    ) {
    }

    /// A mouse button was pressed or released at the given window position.
    fn mouse_button(&mut self, _button: MouseButton, _pressed: bool, _x: i32, _y: i32) {}

    /// The cursor moved to the given window position.
    fn cursor_position(&mut self, _x: i32, _y: i32) {}

    /// The mouse wheel scrolled.
    fn scroll(&mut self, _dx: f32, _dy: f32) {}
}

/// An [`InputHandler`] that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInput;

impl InputHandler for NoopInput {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Routes one event. Returns [`LoopControl::Exit`] when the window was asked to close.
pub fn dispatch_event<G: GlApi, H: InputHandler>(
    gl: &G,
    handler: &mut H,
    event: &Event,
) -> LoopControl {
    match *event {
        Event::Quit { .. } => return LoopControl::Exit,
        Event::Window {
            win_event: WindowEvent::Resized(width, height),
            ..
        } => window_resized(gl, width, height),
        Event::KeyDown {
            keycode,
            scancode,
            keymod,
            ..
        } => handler.key(keycode, scancode, true, keymod),
        Event::KeyUp {
            keycode,
            scancode,
            keymod,
            ..
        } => handler.key(keycode, scancode, false, keymod),
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        } => handler.mouse_button(mouse_btn, true, x, y),
        Event::MouseButtonUp {
            mouse_btn, x, y, ..
        } => handler.mouse_button(mouse_btn, false, x, y),
        Event::MouseMotion { x, y, .. } => handler.cursor_position(x, y),
        Event::MouseWheel { x, y, .. } => handler.scroll(x as f32, y as f32),
        _ => {}
    }
    LoopControl::Continue
}

/// Maps the whole window to the viewport.
pub fn window_resized<G: GlApi>(gl: &G, width: i32, height: i32) {
    log::debug!("Window resized to {}x{}", width, height);
    gl.viewport(0, 0, width, height);
}
