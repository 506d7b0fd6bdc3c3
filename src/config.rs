//! Startup configuration.
//!
//! Read once from `<config dir>/gl-template/config.json` (or the file named by
//! `GL_TEMPLATE_CONFIG`). Every field is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "GL_TEMPLATE_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlProfile {
    Core,
    Gles,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub profile: GlProfile,
    pub vsync: bool,
    pub log_level: String,
    pub log_timestamps: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Template OpenGL Project".to_string(),
            width: 1024,
            height: 768,
            gl_major: 3,
            gl_minor: 3,
            profile: GlProfile::Core,
            vsync: true,
            log_level: "info".to_string(),
            log_timestamps: false,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Where the config file is looked up.
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("gl-template").join("config.json"))
    }

    /// Loads the config file. A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map_err(|e| format!("{}: {}", path.display(), e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(format!("{}: {}", path.display(), e)),
        }
    }

    pub fn log_level(&self) -> Result<log::LevelFilter, String> {
        self.log_level
            .parse()
            .map_err(|_| format!("Unknown log level '{}'", self.log_level))
    }
}
