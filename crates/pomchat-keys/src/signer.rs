//! Signing and verification over the key store.
//!
//! Two distinct trust relationships live here and must not be conflated:
//! [`Signer`] stamps content with the *server* key (custody proof for stored
//! messages), while [`Verifier`] checks *user*-authored content against the
//! user's registered key (consent proof for control actions like renames).

use pomchat_core::{CoreError, Keypair, PublicKey};

use crate::error::Result;
use crate::store::KeyStore;

/// Outcome of verifying a user signature.
///
/// A value, never an error: callers and tests can tell "wrong signature"
/// from "unknown user", while the crypto-level reason for a mismatch stays
/// internal (no signature oracle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Signature verifies against the registered key.
    Valid,
    /// A key is registered but the signature does not verify (includes
    /// malformed hex and wrong-length signatures).
    InvalidSignature,
    /// No key is registered under the username.
    UnknownUser,
}

impl VerifyOutcome {
    /// Collapse to the boolean external callers get.
    pub fn is_valid(self) -> bool {
        matches!(self, VerifyOutcome::Valid)
    }
}

/// Signs content with the server's private key.
///
/// Holds the decoded keypair so the PEM is read once, not per message.
pub struct Signer {
    keypair: Keypair,
}

impl Signer {
    /// Load the server keypair from the store, generating it first if absent.
    pub fn load(store: &KeyStore) -> Result<Self> {
        store.ensure_server_keypair()?;
        Ok(Self {
            keypair: store.load_private_key()?,
        })
    }

    /// Wrap an already-loaded keypair (test doubles with ephemeral keys).
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Sign content bytes; returns the hex-encoded PSS signature.
    pub fn sign(&self, content: &[u8]) -> String {
        self.keypair.sign(content)
    }

    /// The server's public key (self-consistency checks, key distribution).
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key()
    }
}

/// Verifies user signatures against the public key registry.
pub struct Verifier {
    store: KeyStore,
}

impl Verifier {
    pub fn new(store: KeyStore) -> Self {
        Self { store }
    }

    /// Verify `signature_hex` over `content` against `username`'s registered
    /// key.
    ///
    /// Only registry integrity problems (unreadable key material, unusable
    /// username) surface as `Err`; every cryptographic failure mode is a
    /// [`VerifyOutcome`].
    pub fn verify(
        &self,
        content: &[u8],
        signature_hex: &str,
        username: &str,
    ) -> Result<VerifyOutcome> {
        let Some(public_key) = self.store.get_public_key(username)? else {
            return Ok(VerifyOutcome::UnknownUser);
        };

        match public_key.verify_hex(content, signature_hex) {
            Ok(()) => Ok(VerifyOutcome::Valid),
            Err(CoreError::InvalidSignature | CoreError::MalformedSignature) => {
                Ok(VerifyOutcome::InvalidSignature)
            }
            // Key parsed from the registry but unusable for verification.
            Err(_) => Ok(VerifyOutcome::InvalidSignature),
        }
    }
}
