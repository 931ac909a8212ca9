//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/google/flan-t5-base";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the PostgreSQL store lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseSettings {
    /// A full connection string from `DATABASE_URL`.
    Url(String),
    /// Discrete credentials from the `DB_*` variables.
    Parts {
        host: String,
        port: u16,
        user: String,
        password: Option<String>,
        database: String,
    },
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database: DatabaseSettings,
    pub log_level: Level,
    pub huggingface_api_key: Option<String>,
    pub inference_url: String,
    pub inference_timeout: Duration,
    /// Read for parity with deployments that set it; nothing consumes it.
    pub secret_key: Option<String>,
    pub cors_allowed_origin: Option<String>,
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
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Absent values take
    /// their defaults; only present-but-unparsable values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // --- Load Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:5000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Database Settings ---
        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseSettings::Url(url),
            None => {
                let port = match var("DB_PORT") {
                    Some(p) => p.parse::<u16>().map_err(|e| {
                        ConfigError::InvalidValue("DB_PORT".to_string(), e.to_string())
                    })?,
                    None => 5432,
                };
                DatabaseSettings::Parts {
                    host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                    port,
                    user: var("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                    password: var("DB_PASSWORD"),
                    database: var("DB_NAME").unwrap_or_else(|| "flashcards".to_string()),
                }
            }
        };

        // --- Load Inference Settings ---
        let huggingface_api_key = var("HUGGING_API_KEY");
        let inference_url = var("INFERENCE_URL").unwrap_or_else(|| DEFAULT_INFERENCE_URL.to_string());
        let inference_timeout = match var("INFERENCE_TIMEOUT_SECS") {
            Some(s) => Duration::from_secs(s.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("INFERENCE_TIMEOUT_SECS".to_string(), e.to_string())
            })?),
            None => Duration::from_secs(30),
        };

        Ok(Self {
            bind_address,
            database,
            log_level,
            huggingface_api_key,
            inference_url,
            inference_timeout,
            secret_key: var("SECRET_KEY"),
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN"),
        })
    }
}
