//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// How passwords are kept in the account map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStorage {
    Argon2,
    Plain,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub cors_origin: String,
    pub max_upload_bytes: usize,
    pub feature_env: String,
    pub password_storage: PasswordStorage,
    /// Key for the hosted vision model. Analysis fails at request time without it.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub analysis_model: String,
    /// Key for speech-to-text. Voice input is unavailable without it.
    pub openai_api_key: Option<String>,
    pub sst_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        // --- Server and Storage Settings ---
        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = var_or("DATABASE_URL", "sqlite://tongue_balance.db");

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = var_or("CORS_ORIGIN", "http://localhost:5173");

        let max_upload_str = var_or("MAX_UPLOAD_BYTES", "10485760");
        let max_upload_bytes = max_upload_str.parse::<usize>().map_err(|e| {
            ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string(), e.to_string())
        })?;

        let feature_env = lookup("FEATURE_ENV")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let password_storage = match var_or("PASSWORD_STORAGE", "argon2").to_lowercase().as_str() {
            "argon2" => PasswordStorage::Argon2,
            "plain" => PasswordStorage::Plain,
            other => {
                return Err(ConfigError::InvalidValue(
                    "PASSWORD_STORAGE".to_string(),
                    format!("'{}' is not one of argon2, plain", other),
                ))
            }
        };

        // --- API Keys (as optional) ---
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty());
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());

        // --- Adapter-specific Settings ---
        let gemini_base_url = var_or(
            "GEMINI_BASE_URL",
            "https://generativelanguage.googleapis.com/v1beta/openai",
        );
        let analysis_model = var_or("ANALYSIS_MODEL", "gemini-3-flash-preview");
        let sst_model = var_or("SST_MODEL", "whisper-1");

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            cors_origin,
            max_upload_bytes,
            feature_env,
            password_storage,
            gemini_api_key,
            gemini_base_url,
            analysis_model,
            openai_api_key,
            sst_model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.analysis_model, "gemini-3-flash-preview");
        assert_eq!(config.feature_env, "development");
        assert_eq!(config.password_storage, PasswordStorage::Argon2);
        assert!(config.gemini_api_key.is_none());
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn api_key_falls_back_to_generic_name() {
        let config = load(&[("API_KEY", "k-123")]).unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("k-123"));

        let config = load(&[("GEMINI_API_KEY", "  ")]).unwrap();
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            load(&[("BIND_ADDRESS", "nowhere")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "RUST_LOG"
        ));
        assert!(matches!(
            load(&[("PASSWORD_STORAGE", "rot13")]),
            Err(ConfigError::InvalidValue(name, _)) if name == "PASSWORD_STORAGE"
        ));
    }
}
