//! Error types for the pathtree library
//!
//! The traversal engine itself never fails: a path that resolves to nothing is
//! a structural no-op. Errors only come out of the ingestion and output
//! adapters (parsing, serialization, file I/O) and the command-line layer.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum TreeError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// XML parsing errors
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The source format could not be determined from the file name
    #[error("Unsupported document format: {path} (expected .json, .xml, .yml or .yaml)")]
    UnsupportedFormat { path: PathBuf },

    /// A literal value could not be interpreted
    #[error("Invalid value '{input}': {reason}")]
    InvalidValue { input: String, reason: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TreeError>;

impl TreeError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Create a new invalid value error
    pub fn invalid_value(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the error came from malformed document text rather than the environment
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Yaml(_) | Self::Xml(_))
    }
}
