use crate::errors::{SidechatError, SidechatResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/chat".to_string(),
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> SidechatResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let mut config = read_config(&config_path)?;
        apply_env_overrides(&mut config);
        validate_config(&config)?;
        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();
        apply_env_overrides(&mut config);
        validate_config(&config)?;

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            SidechatError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| SidechatError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| SidechatError::config_error(format!("Failed to write config file: {}", e)))?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn read_config(path: &Path) -> SidechatResult<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| SidechatError::config_error(format!("Failed to read config file: {}", e)))?;

    serde_json::from_str(&config_str)
        .map_err(|e| SidechatError::config_error(format!("Failed to parse config: {}", e)))
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(endpoint) = env::var("SIDECHAT_ENDPOINT") {
        config.endpoint = endpoint;
    }
}

fn get_config_path() -> SidechatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| SidechatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("sidechat").join("config.json"))
}

fn validate_config(config: &Config) -> SidechatResult<()> {
    if config.endpoint.is_empty() {
        return Err(SidechatError::config_error("Chat endpoint is required"));
    }

    if config.request_timeout_secs == 0 {
        return Err(SidechatError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    if config.log_level.is_empty() {
        return Err(SidechatError::config_error("Log level is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.endpoint = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_zero_timeout() {
        let mut config = Config::default();
        config.request_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_read_config_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.endpoint = "http://chat.example.com/chat".to_string();
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.endpoint, "http://chat.example.com/chat");
        assert_eq!(loaded.request_timeout_secs, 30);
    }

    #[test]
    fn test_read_config_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(read_config(&path).is_err());
    }
}
