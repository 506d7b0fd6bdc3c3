//! Logger setup.
//!
//! Records go to stderr as `<level>: <message>`, so a failed shader compile
//! reads `error: vertex shader compilation failed:` followed by the log.

use crate::config::AppConfig;

fn format_line(level: log::Level, message: &std::fmt::Arguments, timestamp: Option<&str>) -> String {
    let level = level.as_str().to_ascii_lowercase();
    match timestamp {
        Some(ts) => format!("[{}] {}: {}", ts, level, message),
        None => format!("{}: {}", level, message),
    }
}

/// Installs the global logger. Fails if a logger is already set.
pub fn init(config: &AppConfig) -> Result<(), log::SetLoggerError> {
    let timestamps = config.log_timestamps;
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let ts = timestamps.then(|| chrono::Local::now().format("%H:%M:%S%.3f").to_string());
            out.finish(format_args!(
                "{}",
                format_line(record.level(), message, ts.as_deref())
            ))
        })
        .level(config.log_level().unwrap_or(log::LevelFilter::Info))
        .chain(std::io::stderr())
        .apply()
}
