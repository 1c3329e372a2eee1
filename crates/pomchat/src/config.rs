//! Environment configuration.
//!
//! All knobs come from environment variables with working defaults, so a
//! bare `pomchat` checkout runs against `./keys`, `./messages`, and
//! `./pomchat.db`. Deployments load a `.env` via `dotenvy` in the binary.

use std::env;
use std::path::PathBuf;

/// Which message log backend the service uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// One text file per message under `messages_dir`.
    File,
    /// One row per message in the SQLite database at `db_path`.
    Sqlite,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the key store (`KEYS_DIRECTORY`).
    pub keys_dir: PathBuf,
    /// File backend directory (`MESSAGES_DIRECTORY`).
    pub messages_dir: PathBuf,
    /// SQLite database path (`DB_PATH`).
    pub db_path: PathBuf,
    /// Selected backend (`MESSAGE_BACKEND`, `file` or `sqlite`).
    pub backend: BackendKind,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            keys_dir: env::var("KEYS_DIRECTORY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("keys")),
            messages_dir: env::var("MESSAGES_DIRECTORY")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("messages")),
            db_path: env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("pomchat.db")),
            backend: match env::var("MESSAGE_BACKEND").as_deref() {
                Ok("file") => BackendKind::File,
                _ => BackendKind::Sqlite,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
