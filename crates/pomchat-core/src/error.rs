//! Error types for pomchat core primitives.

use thiserror::Error;

/// Errors from key handling and signature primitives.
///
/// Verification failures are deliberately carried as plain variants with no
/// inner detail: callers at the trust boundary collapse them into a boolean
/// outcome and must not leak why a signature was rejected.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Signature did not verify against the given public key.
    #[error("invalid signature")]
    InvalidSignature,

    /// Signature bytes are not a valid PSS signature for the key size.
    #[error("malformed signature")]
    MalformedSignature,

    /// Public key material could not be parsed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Private key material could not be parsed or encoded.
    #[error("key encoding error: {0}")]
    KeyEncoding(String),

    /// Keypair generation failed.
    #[error("key generation error: {0}")]
    KeyGeneration(String),
}
