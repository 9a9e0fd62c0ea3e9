use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::metadata::PUBLISHED_SEGMENT;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Path of the store database file.
    pub database: String,
    /// Folder of the synced tree whose Markdown files are published.
    #[serde(default = "default_published_dir")]
    pub published_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_published_dir() -> String {
    PUBLISHED_SEGMENT.to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub database: PathBuf,
    pub published_dir: String,
    pub logging: LoggingConfig,
}
