//! Error types for the key store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during key store operations.
///
/// Signature mismatches are NOT errors - they are [`VerifyOutcome`] values.
/// Only registry integrity problems (unreadable or corrupt key material)
/// surface here.
///
/// [`VerifyOutcome`]: crate::signer::VerifyOutcome
#[derive(Debug, Error)]
pub enum KeyError {
    /// Private key file is missing, unreadable, or malformed.
    #[error("failed to load private key from {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// A registered public key file exists but cannot be parsed. Distinct
    /// from "not registered", which is a plain `None`.
    #[error("malformed public key for {username}: {reason}")]
    MalformedPublicKey { username: String, reason: String },

    /// Key material could not be generated or encoded for persistence.
    #[error("key encoding error: {0}")]
    Encoding(String),

    /// Username is not usable as a registry filename.
    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for key store operations.
pub type Result<T> = std::result::Result<T, KeyError>;
