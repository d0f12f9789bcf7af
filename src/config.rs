use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "warden.config";
/// Fallback environment variable holding the same JSON blob as text.
pub const CONFIG_ENV: &str = "WARDEN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {CONFIG_FILE} not found and {CONFIG_ENV} is not set")]
    Missing,
    #[error("could not read {CONFIG_FILE}: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    /// Role required to remove users from the whitelist.
    pub authorized_role_id: u64,
    pub minecraft: MinecraftConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MinecraftConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            path: default_log_path(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs.txt")
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let raw = match fs::read_to_string(CONFIG_FILE) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            env::var(CONFIG_ENV).map_err(|_| ConfigError::Missing)?
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };
    parse_config(&raw)
}

fn parse_config(raw: &str) -> Result<AppConfig, ConfigError> {
    let cfg: AppConfig = serde_json::from_str(raw)?;

    if cfg.bot_token.is_empty() {
        return Err(ConfigError::Invalid("bot_token must not be empty".to_string()));
    }
    if cfg.authorized_role_id == 0 {
        return Err(ConfigError::Invalid(
            "authorized_role_id must be a Discord role id".to_string(),
        ));
    }
    if cfg.minecraft.host.is_empty() {
        return Err(ConfigError::Invalid("minecraft.host must not be empty".to_string()));
    }

    Ok(cfg)
}
