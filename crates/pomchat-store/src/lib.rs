//! # Pomchat Store
//!
//! The append-only message log behind one trait, [`MessageLog`], with two
//! behaviorally equivalent backends:
//!
//! - [`FileLog`] - one text file per message (`Key: value` headers, blank
//!   line, body), filenames embedding the timestamp for lexical sortability
//! - [`SqliteLog`] - one row per message in a `messages` table, versioned
//!   schema migrations
//!
//! Records are only ever added. `read_all` returns ascending timestamp
//! order on both backends; a record that fails to parse is skipped and
//! logged, never fatal to the read.
//!
//! [`import_file_log`] is the one-shot file-to-relational converter: a pure
//! translator over the two backends that preserves every field and stamps
//! the source filename as provenance. It assumes no concurrent writers
//! (offline maintenance only) and skips, rather than duplicates, records it
//! has already imported.

pub mod error;
pub mod file;
pub mod import;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use file::FileLog;
pub use import::{import_file_log, ImportReport};
pub use sqlite::SqliteLog;
pub use traits::{MessageLog, RecordDraft};
