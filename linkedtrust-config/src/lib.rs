mod config;
mod loader;

pub use config::Config;
pub use loader::{parse_config, parse_config_file};


#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct ConfigError(&'static str);
