//! Shared error types for checklist analysis and evaluation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for checkmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input validation errors (out-of-range score or factor, bad template status)
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    /// Missing input or template file
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Malformed template JSON or unreadable document
    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error naming the offending field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a parse error with path context
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
