//! Test fixtures and helpers.

use chrono::NaiveDateTime;
use tempfile::TempDir;

use pomchat_core::{Keypair, RenameRequest, DATE_FORMAT};
use pomchat_keys::KeyStore;
use pomchat_store::{FileLog, RecordDraft, SqliteLog};

/// A test fixture rooted in a temp directory: key store with a generated
/// server keypair, plus constructors for both log backends.
///
/// Everything is deleted when the fixture drops.
pub struct TestFixture {
    tmp: TempDir,
    pub keystore: KeyStore,
}

impl TestFixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let keystore = KeyStore::open(tmp.path().join("keys"));
        keystore
            .ensure_server_keypair()
            .expect("generate server keypair");
        Self { tmp, keystore }
    }

    /// Generate a client-side keypair for `username` and register its public
    /// half in the key store.
    pub fn register_user(&self, username: &str) -> TestUser {
        let keypair = Keypair::generate().expect("generate user keypair");
        let pem = keypair
            .public_key()
            .to_public_key_pem()
            .expect("encode public key");
        self.keystore
            .save_public_key(username, &pem)
            .expect("register public key");
        TestUser {
            username: username.to_string(),
            keypair,
        }
    }

    /// A file log under the fixture's temp dir.
    pub fn file_log(&self) -> FileLog {
        FileLog::open(self.tmp.path().join("messages")).expect("open file log")
    }

    /// An on-disk SQLite log under the fixture's temp dir.
    pub fn sqlite_log(&self) -> SqliteLog {
        SqliteLog::open(self.tmp.path().join("pomchat.db")).expect("open sqlite log")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A test user with its own (client-side) keypair.
pub struct TestUser {
    pub username: String,
    keypair: Keypair,
}

impl TestUser {
    /// Sign arbitrary content with the user's private key.
    pub fn sign(&self, content: &[u8]) -> String {
        self.keypair.sign(content)
    }

    /// Build and sign a rename request from this user's current name.
    pub fn sign_rename(&self, new_username: &str) -> (RenameRequest, String) {
        let request = RenameRequest::new(self.username.clone(), new_username);
        let signature = self.sign(&request.canonical_bytes());
        (request, signature)
    }

    pub fn public_key_pem(&self) -> String {
        self.keypair
            .public_key()
            .to_public_key_pem()
            .expect("encode public key")
    }
}

/// A record draft with a fixed timestamp, for deterministic ordering tests.
pub fn draft_at(date: &str, author: &str, content: &str) -> RecordDraft {
    RecordDraft {
        date: NaiveDateTime::parse_from_str(date, DATE_FORMAT).expect("test date"),
        author: author.to_string(),
        kind: "message".to_string(),
        content: content.to_string(),
        signature: "deadbeef".to_string(),
        origin: None,
    }
}
