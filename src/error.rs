//! Error types for attrib.

use thiserror::Error;

/// Result type for attrib operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for attrib operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Model artifact missing or unreadable.
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    /// Model artifact could not be written.
    #[error("Model save failed: {0}")]
    ModelSave(String),

    /// Training could not produce a model.
    #[error("Training failed: {0}")]
    Training(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Corpus loading/parsing error.
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the core data model.
    #[error(transparent)]
    Core(#[from] attrib_core::Error),
}

impl Error {
    /// Create a model load error.
    pub fn model_load(msg: impl Into<String>) -> Self {
        Error::ModelLoad(msg.into())
    }

    /// Create a model save error.
    pub fn model_save(msg: impl Into<String>) -> Self {
        Error::ModelSave(msg.into())
    }

    /// Create a training error.
    pub fn training(msg: impl Into<String>) -> Self {
        Error::Training(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a corpus error.
    pub fn corpus(msg: impl Into<String>) -> Self {
        Error::Corpus(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
