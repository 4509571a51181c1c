use thiserror::Error;

use crate::FileId;

/// Result type for file store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while storing chunked files
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid file identifier: {value}")]
    InvalidId { value: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Reading from upload source failed: {source}")]
    SourceRead {
        #[from]
        source: std::io::Error,
    },

    #[error("Sink operation '{operation}' failed for file {file_id}: {source}")]
    Sink {
        operation: &'static str,
        file_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("'{operation}' called on a closed upload session")]
    SessionClosed { operation: &'static str },
}

impl StoreError {
    /// Create an invalid identifier error
    pub fn invalid_id<S: Into<String>>(value: S) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a sink failure carrying the failed operation and file identifier
    pub fn sink<E>(operation: &'static str, file_id: &FileId, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Sink {
            operation,
            file_id: file_id.to_string(),
            source: Box::new(source),
        }
    }

    /// Create a closed session error
    pub fn session_closed(operation: &'static str) -> Self {
        Self::SessionClosed { operation }
    }
}
