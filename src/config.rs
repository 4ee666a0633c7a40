use crate::errors::{FinchatError, FinchatResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    pub bot_id: String,
    pub user_id: String,
    pub response_limit: u32,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api/v1/chat/search".to_string(),
            bot_id: "finder-bot".to_string(),
            user_id: "terminal-user".to_string(),
            response_limit: 5,
            log_file: "finchat_api.log".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the config file, creating it with defaults (plus any FINCHAT_* env
/// overrides) on first run. Called once at startup; everything after reads
/// the cached copy.
pub fn initialize_config() -> FinchatResult<()> {
    let config_path = get_config_path()?;

    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| FinchatError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| FinchatError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        let mut config = Config::default();

        if let Ok(url) = env::var("FINCHAT_API_URL") {
            config.api_url = url;
        }
        if let Ok(bot_id) = env::var("FINCHAT_BOT_ID") {
            config.bot_id = bot_id;
        }
        if let Ok(user_id) = env::var("FINCHAT_USER_ID") {
            config.user_id = user_id;
        }

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            FinchatError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| FinchatError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| FinchatError::config_error(format!("Failed to write config file: {}", e)))?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> FinchatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| FinchatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("finchat").join("config.json"))
}

fn validate_config(config: &Config) -> FinchatResult<()> {
    if config.api_url.is_empty() {
        return Err(FinchatError::config_error("api_url is required"));
    }

    if config.bot_id.is_empty() {
        return Err(FinchatError::config_error("bot_id is required"));
    }

    if config.user_id.is_empty() {
        return Err(FinchatError::config_error("user_id is required"));
    }

    if config.response_limit == 0 {
        return Err(FinchatError::config_error(
            "response_limit must be greater than 0",
        ));
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
    fn test_validate_config_empty_api_url() {
        let mut config = Config::default();
        config.api_url = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_empty_identifiers() {
        let mut config = Config::default();
        config.bot_id = "".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = Config::default();
        config.user_id = "".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_zero_limit() {
        let mut config = Config::default();
        config.response_limit = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_config_round_trips_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.api_url = "http://example.test/chat/search".to_string();
        config.response_limit = 3;

        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(loaded.api_url, config.api_url);
        assert_eq!(loaded.response_limit, 3);
        assert_eq!(loaded.bot_id, config.bot_id);
    }
}
