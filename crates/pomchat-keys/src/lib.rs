//! # Pomchat Keys
//!
//! Custody of the server signing keypair and the per-user public key
//! registry. All state lives as files under one configured directory:
//!
//! ```text
//! <keys_dir>/
//!   private.pem          server private key, PKCS#8, unencrypted
//!   public_keys/
//!     <username>.pub     one SPKI PEM per registered user
//! ```
//!
//! [`KeyStore`] owns the layout, [`Signer`] signs with the server key, and
//! [`Verifier`] checks user signatures against the registry with a tri-state
//! [`VerifyOutcome`] so callers can distinguish "wrong signature" from
//! "unknown user" without leaking crypto internals.

pub mod error;
pub mod signer;
pub mod store;

pub use error::{KeyError, Result};
pub use signer::{Signer, Verifier, VerifyOutcome};
pub use store::KeyStore;
