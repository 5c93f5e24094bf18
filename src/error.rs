//! Error types for the Push Battle crate

use thiserror::Error;

/// Main error type for the Push Battle crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: String },

    #[error("game already over")]
    GameOver,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid board snapshot: {message}")]
    InvalidSnapshot { message: String },

    #[error("invalid move encoding {encoding:?}: {message}")]
    InvalidWire { encoding: Vec<i64>, message: String },

    #[error("invalid state key '{key}': {message}")]
    InvalidStateKey { key: String, message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn snapshot(message: impl Into<String>) -> Self {
        Error::InvalidSnapshot {
            message: message.into(),
        }
    }

    /// True when the error is an I/O "not found" failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
