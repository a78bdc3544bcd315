use std::fs;
use std::path::Path;

use crate::config::constants::{API_KEY_ENV_VAR, CONFIG_DIR, CONFIG_FILE, ENV_FILE};
use crate::errors::{PredguardError, PredguardResult};
use crate::structs::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    /// Loads `~/.predguard/config.toml` when present, defaults otherwise.
    pub fn load() -> PredguardResult<Config> {
        let config_path = dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
            .unwrap_or_default();

        if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    /// Loads KEY=VALUE pairs from a `.env` file in the working directory.
    /// Existing process environment wins over file values.
    pub fn load_env_file() {
        Self::load_env_file_from(Path::new(ENV_FILE));
    }

    pub fn load_env_file_from(path: &Path) {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return,
        };

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if !key.is_empty() && std::env::var_os(key).is_none() {
                    std::env::set_var(key, value);
                }
            }
        }
    }

    /// API key resolution order: process environment (which `.env` feeds
    /// into), then the config file.
    pub fn resolve_api_key(config: &Config) -> PredguardResult<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        if let Some(key) = config.api_key.as_deref() {
            if !key.trim().is_empty() {
                return Ok(key.to_string());
            }
        }

        Err(PredguardError::config_error(
            &format!("{} not found", API_KEY_ENV_VAR),
            Some("Set it in the environment, in a .env file, or as api_key in ~/.predguard/config.toml"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn env_file_sets_missing_variables_only() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        let mut file = fs::File::create(&env_path).unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "PREDGUARD_TEST_FRESH=\"from-file\"").unwrap();
        writeln!(file, "export PREDGUARD_TEST_TAKEN=loses").unwrap();
        writeln!(file, "not a pair").unwrap();

        std::env::set_var("PREDGUARD_TEST_TAKEN", "wins");
        ConfigManager::load_env_file_from(&env_path);

        assert_eq!(std::env::var("PREDGUARD_TEST_FRESH").unwrap(), "from-file");
        assert_eq!(std::env::var("PREDGUARD_TEST_TAKEN").unwrap(), "wins");

        std::env::remove_var("PREDGUARD_TEST_FRESH");
        std::env::remove_var("PREDGUARD_TEST_TAKEN");
    }

    #[test]
    fn api_key_falls_back_to_config_file() {
        std::env::remove_var(API_KEY_ENV_VAR);

        let mut config = Config::default();
        assert!(ConfigManager::resolve_api_key(&config).is_err());

        config.api_key = Some("gsk_test".to_string());
        assert_eq!(ConfigManager::resolve_api_key(&config).unwrap(), "gsk_test");
    }
}
