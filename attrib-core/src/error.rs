//! Error types for attrib-core.

use thiserror::Error;

/// Result type for attrib-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for attrib-core operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A span does not fit inside its document.
    #[error("Span {start}..{end} out of bounds for document of {len} tokens")]
    SpanOutOfBounds {
        /// Span start (token index)
        start: usize,
        /// Span end (token index, exclusive)
        end: usize,
        /// Document length in tokens
        len: usize,
    },
}

impl Error {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
