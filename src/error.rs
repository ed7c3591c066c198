//! Tokenest error types.
//!
//! The estimation path itself is infallible: every input, including empty
//! or malformed payloads, produces an [`Estimate`](crate::Estimate). Errors
//! only surface at the edges of the crate:
//!
//! - loading configuration (TOML files, environment)
//! - parsing strategy/profile names
//! - parsing and validating ZR configuration documents
//! - loading the reference tokenizers used for accuracy comparison

use thiserror::Error;

/// Tokenest errors.
#[derive(Error, Debug)]
pub enum TokenestError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Unknown estimation strategy name.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Unknown weight profile name.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// ZR configuration document failed validation.
    #[error("Invalid ZR config: {0}")]
    ZrConfig(String),

    /// Reference tokenizer could not be loaded.
    #[error("Reference tokenizer error: {0}")]
    Reference(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fallible tokenest operations
pub type Result<T> = std::result::Result<T, TokenestError>;

impl From<toml::de::Error> for TokenestError {
    fn from(err: toml::de::Error) -> Self {
        TokenestError::Config(format!("Failed to parse config: {err}"))
    }
}
