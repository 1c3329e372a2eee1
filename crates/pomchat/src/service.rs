//! The service facade.

use chrono::Utc;

use pomchat_core::{
    is_valid_username, MessageRecord, PublicKey, RenameRequest, DEFAULT_AUTHOR, DEFAULT_KIND,
};
use pomchat_keys::{KeyStore, Signer, Verifier, VerifyOutcome};
use pomchat_store::{FileLog, MessageLog, RecordDraft, SqliteLog};

use crate::config::{BackendKind, Config};
use crate::error::{ChatError, Result};

/// The pomchat core behind the route layer.
///
/// Owns the key store, the loaded server signer, and one message log
/// backend. Single-writer by design: one service instance per storage
/// backend, all operations synchronous.
pub struct ChatService {
    keystore: KeyStore,
    signer: Signer,
    verifier: Verifier,
    log: Box<dyn MessageLog>,
}

impl ChatService {
    /// Build a service over an explicit key store and log backend,
    /// generating the server keypair on first use.
    pub fn new(keystore: KeyStore, log: Box<dyn MessageLog>) -> Result<Self> {
        let signer = Signer::load(&keystore)?;
        let verifier = Verifier::new(keystore.clone());
        Ok(Self {
            keystore,
            signer,
            verifier,
            log,
        })
    }

    /// Build from environment configuration, selecting the backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        let keystore = KeyStore::open(&config.keys_dir);
        let log: Box<dyn MessageLog> = match config.backend {
            BackendKind::File => Box::new(FileLog::open(&config.messages_dir)?),
            BackendKind::Sqlite => Box::new(SqliteLog::open(&config.db_path)?),
        };
        Self::new(keystore, log)
    }

    /// Persist a message: stamp it with the current time and a fresh server
    /// signature over the exact content bytes, then append.
    ///
    /// `author` and `kind` fall back to `"anonymous"` / `"message"`. Empty
    /// content is rejected before anything is signed.
    pub fn post_message(
        &self,
        content: &str,
        author: Option<&str>,
        kind: Option<&str>,
    ) -> Result<MessageRecord> {
        if content.is_empty() {
            return Err(ChatError::EmptyContent);
        }

        let author = author.unwrap_or(DEFAULT_AUTHOR);
        let kind = kind.unwrap_or(DEFAULT_KIND);

        let draft = RecordDraft {
            date: Utc::now().naive_utc(),
            author: author.to_string(),
            kind: kind.to_string(),
            content: content.to_string(),
            signature: self.signer.sign(content.as_bytes()),
            origin: None,
        };

        let record = self.log.append(&draft)?;
        tracing::debug!(author, kind, id = ?record.id, "message appended");
        Ok(record)
    }

    /// All messages, ascending by timestamp.
    pub fn messages(&self) -> Result<Vec<MessageRecord>> {
        Ok(self.log.read_all()?)
    }

    /// The rename protocol, server side.
    ///
    /// The client has signed the canonical serialization of the request with
    /// the private key belonging to `old_username`. Verification failure -
    /// wrong key, malformed signature, or no registered key at all - is one
    /// opaque [`ChatError::Unauthorized`] with no state change. On success
    /// the registered key moves to the new username (overwriting any key
    /// already there; see `KeyStore::rename_public_key`).
    pub fn rename_username(
        &self,
        request: &RenameRequest,
        signature_hex: &str,
    ) -> Result<String> {
        if !is_valid_username(&request.old_username) {
            return Err(ChatError::InvalidUsername(request.old_username.clone()));
        }
        if !is_valid_username(&request.new_username) {
            return Err(ChatError::InvalidUsername(request.new_username.clone()));
        }

        let payload = request.canonical_bytes();
        match self
            .verifier
            .verify(&payload, signature_hex, &request.old_username)?
        {
            VerifyOutcome::Valid => {
                self.keystore
                    .rename_public_key(&request.old_username, &request.new_username)?;
                tracing::info!(
                    old = %request.old_username,
                    new = %request.new_username,
                    "username renamed"
                );
                Ok(request.new_username.clone())
            }
            VerifyOutcome::InvalidSignature | VerifyOutcome::UnknownUser => {
                Err(ChatError::Unauthorized)
            }
        }
    }

    /// Register (or overwrite) a user's public key. The upload transport is
    /// external; this is the custody end of it.
    pub fn register_public_key(&self, username: &str, pem: &str) -> Result<()> {
        if !is_valid_username(username) {
            return Err(ChatError::InvalidUsername(username.to_string()));
        }
        self.keystore.save_public_key(username, pem)?;
        Ok(())
    }

    /// The user's registered public key, if any.
    pub fn public_key(&self, username: &str) -> Result<Option<PublicKey>> {
        Ok(self.keystore.get_public_key(username)?)
    }

    /// The server's own public key.
    pub fn server_public_key(&self) -> PublicKey {
        self.signer.public_key()
    }
}
