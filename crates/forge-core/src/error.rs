//! Error types for the forge library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all workbench operations.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// A referenced project, step, file or parent folder does not exist
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    /// The operation needs state the project does not have
    #[error("Invalid state: {message}")]
    InvalidState { message: String },
    /// The model hub search failed or returned a non-success status
    #[error("Remote failure: {message}")]
    RemoteFailure {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ForgeError {
    /// Creates a not-found error for the given resource kind.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Creates a remote failure without an underlying transport error.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteFailure {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for the `InvalidState` variant.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|source| ForgeError::Database {
            message: message.to_string(),
            source,
        })
    }
}

/// Maps transport errors from the hub client.
pub trait RemoteResultExt<T> {
    /// Map reqwest errors into `RemoteFailure` with a message.
    fn remote_context(self, message: &str) -> Result<T>;
}

impl<T> RemoteResultExt<T> for std::result::Result<T, reqwest::Error> {
    fn remote_context(self, message: &str) -> Result<T> {
        self.map_err(|source| ForgeError::RemoteFailure {
            message: format!("{message}: {source}"),
            source: Some(source),
        })
    }
}

/// Result type alias for workbench operations
pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ForgeError::not_found("Project", "abc");
        assert_eq!(err.to_string(), "Project 'abc' not found");
        assert!(err.is_not_found());
        assert!(!err.is_invalid_state());
    }

    #[test]
    fn test_invalid_state_message() {
        let err = ForgeError::invalid_state("GitHub is not connected");
        assert_eq!(err.to_string(), "Invalid state: GitHub is not connected");
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to read key").unwrap_err();
        assert!(err.to_string().contains("Failed to read key"));
    }
}
