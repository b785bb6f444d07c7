// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResearcherError>;

#[derive(Error, Debug)]
pub enum ResearcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search API returned status {status}: {message}")]
    SearchApi { status: u16, message: String },

    #[error("Completion API error: {0}")]
    Completion(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
