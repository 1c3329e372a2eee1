//! Error types for the message log.

use thiserror::Error;

/// Errors that can occur during log operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error from the file backend or key directories.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored record could not be parsed. Skipped (and logged) on the
    /// read path; reported per-file by the import tool.
    #[error("malformed record {file}: {reason}")]
    MalformedRecord { file: String, reason: String },

    /// The SQLite connection mutex was poisoned by a panicking writer.
    #[error("storage mutex poisoned")]
    Poisoned,

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StoreError {
    pub(crate) fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::MalformedRecord {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for log operations.
pub type Result<T> = std::result::Result<T, StoreError>;
