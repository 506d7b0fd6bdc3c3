use std::process::ExitCode;

use crate::abs::*;
use crate::config::AppConfig;
use crate::input::NoopInput;

mod abs;
mod config;
mod input;
mod logging;
mod render;

fn main() -> ExitCode {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Err(e) = logging::init(&config) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    if let Err(e) = config.log_level() {
        log::warn!("{}, using info", e);
    }

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (major, minor) = app.gl_version();
    println!("OpenGL {}.{}", major, minor);

    let header = render::glsl_header(config.profile, config.gl_major, config.gl_minor);
    let pass = match render::FullscreenPass::new(&app.gl, &header) {
        Ok(pass) => pass,
        Err(e) => {
            log::error!("Failed to set up the full-screen pass: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if !pass.program().is_linked() {
        log::warn!(
            "Continuing with an unlinked shader program: {} stage(s) failed to compile",
            pass.program().compile_failures().count()
        );
    }

    let (width, height) = app.window.drawable_size();
    input::window_resized(app.gl.as_ref(), width as i32, height as i32);

    app.run(&mut NoopInput);

    drop(pass);
    ExitCode::SUCCESS
}
