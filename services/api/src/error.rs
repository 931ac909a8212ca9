//! services/api/src/error.rs
//!
//! Errors that can stop the service from starting.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The connection settings could not be turned into a pool.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// The outbound inference client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Binding or serving the listener failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
