use std::path::Path;

use super::config::Config;
use super::ConfigError;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

struct EnvConfig {
    config_path: String,
}

fn parse_env() -> EnvConfig {
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();
    let config_path = std::env::var("CONFIG_PATH")
        .unwrap_or(DEFAULT_CONFIG_PATH.to_string());
    EnvConfig { config_path }
}

pub fn parse_config_file(config_path: &Path) -> Result<Config, ConfigError> {
    let config_yaml = std::fs::read_to_string(config_path)
        .map_err(|_| ConfigError("failed to load config file"))?;
    let mut config = serde_yaml::from_str::<Config>(&config_yaml)
        .map_err(|_| ConfigError("invalid yaml data"))?;
    config.config_path = config_path.display().to_string();

    // Validate config
    if !config.storage_dir.is_dir() {
        return Err(ConfigError("storage directory does not exist"));
    };
    Ok(config)
}

/// Loads config from CONFIG_PATH (or config.yaml)
pub fn parse_config() -> Result<Config, ConfigError> {
    let env = parse_env();
    parse_config_file(Path::new(&env.config_path))
}
