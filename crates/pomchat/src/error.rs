//! Error types for the service facade.

use pomchat_keys::KeyError;
use pomchat_store::StoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Key store failure (missing/corrupt key material, registry I/O).
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Storage failure in the message log.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A post with no content.
    #[error("content is required")]
    EmptyContent,

    /// Username does not match `[A-Za-z0-9_]{3,20}`.
    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    /// Rename signature did not verify for the claimed old username. Carries
    /// no detail about why - the distinction between "wrong signature" and
    /// "unknown user" stays server-side.
    #[error("signature verification failed")]
    Unauthorized,
}

impl ChatError {
    /// The HTTP status the route layer should answer with.
    pub fn status(&self) -> u16 {
        match self {
            ChatError::EmptyContent | ChatError::InvalidUsername(_) => 400,
            ChatError::Unauthorized => 401,
            ChatError::Key(_) | ChatError::Store(_) => 500,
        }
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ChatError>;
