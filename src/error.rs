//! Error types for the lingram language detector.
//!
//! Every failure here belongs to initialization: loading models, building the
//! index or reading a snapshot. Detection itself is total and never errors.

use thiserror::Error;

/// Main error type for lingram operations.
#[derive(Debug, Error)]
pub enum LingramError {
    /// A required model could not be located or the model set is unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The same language tag was supplied twice in one model set
    #[error("Duplicate language model: {0}")]
    DuplicateLanguage(String),

    /// A persisted model record violates the trigram/weight encoding
    #[error("Malformed model '{language}' at record {record}: {message}")]
    MalformedModel {
        language: String,
        record: usize,
        message: String,
    },

    /// Index snapshot failed magic, version or checksum validation
    #[error("Invalid index snapshot: {0}")]
    Snapshot(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LingramError {
    pub(crate) fn malformed(language: &str, record: usize, message: impl Into<String>) -> Self {
        LingramError::MalformedModel {
            language: language.to_string(),
            record,
            message: message.into(),
        }
    }
}

/// Result type alias for lingram operations
pub type Result<T> = std::result::Result<T, LingramError>;
