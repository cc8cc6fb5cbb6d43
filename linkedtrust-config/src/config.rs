use std::path::PathBuf;

use log::{Level as LogLevel};
use serde::Deserialize;

fn default_log_level() -> LogLevel { LogLevel::Info }

fn default_session_file() -> String { "session.json".to_string() }

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    // Properties auto-populated from the environment
    #[serde(skip)]
    pub config_path: String,

    // Directory for persistent state
    pub storage_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    // Session file name, relative to storage directory
    #[serde(default = "default_session_file")]
    session_file: String,
}

impl Config {
    pub fn session_path(&self) -> PathBuf {
        self.storage_dir.join(&self.session_file)
    }
}
