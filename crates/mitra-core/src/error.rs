//! Error types for the Krishi Mitra core

use thiserror::Error;

/// Result type alias for core operations
pub type MitraResult<T> = Result<T, MitraError>;

/// Errors that can occur in the chat core
#[derive(Error, Debug)]
pub enum MitraError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for MitraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MitraError::Malformed(err.to_string())
        } else {
            MitraError::Transport(err.to_string())
        }
    }
}
