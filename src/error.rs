use std::io;
use thiserror::Error;

/// Custom error type for the Moncord application
#[derive(Error, Debug)]
pub enum MoncordError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schedule error: {0}")]
    Schedule(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for the Moncord application
pub type Result<T> = std::result::Result<T, MoncordError>;

impl MoncordError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MoncordError::Config(msg.into())
    }

    /// Create a schedule error
    pub fn schedule<S: Into<String>>(msg: S) -> Self {
        MoncordError::Schedule(msg.into())
    }
}
