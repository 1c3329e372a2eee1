//! On-disk key custody.

use std::fs;
use std::path::{Path, PathBuf};

use pomchat_core::{is_valid_username, Keypair, PublicKey};

use crate::error::{KeyError, Result};

/// Filename of the server private key inside the keys directory.
const PRIVATE_KEY_FILE: &str = "private.pem";

/// Subdirectory holding one `<username>.pub` file per registered user.
const PUBLIC_KEYS_DIR: &str = "public_keys";

/// Custody of the server keypair and the public key registry.
///
/// Explicitly constructed and passed to whoever needs it - never a global.
/// Cheap to clone (paths only); cloning does not duplicate key material.
#[derive(Debug, Clone)]
pub struct KeyStore {
    keys_dir: PathBuf,
    public_keys_dir: PathBuf,
    private_key_path: PathBuf,
}

impl KeyStore {
    /// Point a key store at a directory. Creates nothing; see
    /// [`KeyStore::ensure_server_keypair`] for initialization.
    pub fn open(keys_dir: impl Into<PathBuf>) -> Self {
        let keys_dir = keys_dir.into();
        let public_keys_dir = keys_dir.join(PUBLIC_KEYS_DIR);
        let private_key_path = keys_dir.join(PRIVATE_KEY_FILE);
        Self {
            keys_dir,
            public_keys_dir,
            private_key_path,
        }
    }

    /// The configured root directory.
    pub fn keys_dir(&self) -> &Path {
        &self.keys_dir
    }

    /// Create the directory tree and, if no private key file exists yet,
    /// generate and persist a fresh server keypair. Idempotent: a second
    /// call with an existing key file changes nothing.
    pub fn ensure_server_keypair(&self) -> Result<()> {
        fs::create_dir_all(&self.public_keys_dir)?;

        if self.private_key_path.exists() {
            return Ok(());
        }

        let keypair = Keypair::generate().map_err(|e| KeyError::Encoding(e.to_string()))?;
        let pem = keypair
            .to_pkcs8_pem()
            .map_err(|e| KeyError::Encoding(e.to_string()))?;
        fs::write(&self.private_key_path, pem)?;

        tracing::info!(path = %self.private_key_path.display(), "generated server keypair");
        Ok(())
    }

    /// Load and decode the server private key.
    pub fn load_private_key(&self) -> Result<Keypair> {
        let pem = fs::read_to_string(&self.private_key_path).map_err(|e| KeyError::Load {
            path: self.private_key_path.clone(),
            reason: e.to_string(),
        })?;
        Keypair::from_pkcs8_pem(&pem).map_err(|e| KeyError::Load {
            path: self.private_key_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Look up a user's registered public key.
    ///
    /// Absence is `Ok(None)`, never an error; a key file that exists but
    /// does not parse is [`KeyError::MalformedPublicKey`].
    pub fn get_public_key(&self, username: &str) -> Result<Option<PublicKey>> {
        let path = self.public_key_path(username)?;
        if !path.exists() {
            return Ok(None);
        }
        let pem = fs::read_to_string(&path)?;
        let key =
            PublicKey::from_public_key_pem(&pem).map_err(|e| KeyError::MalformedPublicKey {
                username: username.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(key))
    }

    /// Register (or overwrite) a user's public key. Last write wins.
    ///
    /// The PEM is parsed before it is persisted so the registry never holds
    /// material that [`KeyStore::get_public_key`] would later reject.
    pub fn save_public_key(&self, username: &str, pem: &str) -> Result<()> {
        let path = self.public_key_path(username)?;
        PublicKey::from_public_key_pem(pem).map_err(|e| KeyError::MalformedPublicKey {
            username: username.to_string(),
            reason: e.to_string(),
        })?;
        fs::create_dir_all(&self.public_keys_dir)?;
        fs::write(&path, pem)?;
        Ok(())
    }

    /// Relocate a registered key from `old` to `new`.
    ///
    /// Returns `false` (a no-op) when `old` has no registered key. When `new`
    /// already has one it is overwritten; whether to refuse instead is an
    /// open product question, so the overwrite is logged for audit.
    pub fn rename_public_key(&self, old: &str, new: &str) -> Result<bool> {
        let old_path = self.public_key_path(old)?;
        let new_path = self.public_key_path(new)?;

        if !old_path.exists() {
            return Ok(false);
        }
        if new_path.exists() {
            tracing::warn!(old, new, "rename overwrites an existing registered key");
        }
        fs::rename(&old_path, &new_path)?;
        Ok(true)
    }

    fn public_key_path(&self, username: &str) -> Result<PathBuf> {
        if !is_valid_username(username) {
            return Err(KeyError::InvalidUsername(username.to_string()));
        }
        Ok(self.public_keys_dir.join(format!("{username}.pub")))
    }
}
