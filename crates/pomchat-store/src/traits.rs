//! The storage trait both log backends implement.
//!
//! Backends are dumb persistence: they assign identity and keep order, but
//! never compute signatures or timestamps. The service layer builds a fully
//! specified [`RecordDraft`] for new posts (fresh timestamp + server
//! signature, no provenance); the import tool builds drafts from parsed file
//! records with everything preserved. That split is what lets the migration
//! path be a pure translator instead of a second copy of the write path.

use chrono::NaiveDateTime;
use pomchat_core::MessageRecord;

use crate::error::Result;

/// Everything a backend persists for one record. The backend adds only the
/// [`LogId`](pomchat_core::LogId).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub date: NaiveDateTime,
    pub author: String,
    pub kind: String,
    pub content: String,
    /// Hex-encoded server signature over `content`.
    pub signature: String,
    /// Source filename for migrated records, `None` for live posts.
    pub origin: Option<String>,
}

/// The append-only message log contract.
///
/// # Semantics
///
/// - **Append-only**: records are immutable once stored; there is no update
///   or delete.
/// - **Ordered reads**: `read_all` returns ascending timestamp order. Ties
///   resolve deterministically per backend (insertion id / filename).
/// - **Damage-tolerant reads**: an individual record that fails to parse is
///   skipped and logged; it never aborts the read.
pub trait MessageLog: Send + Sync {
    /// Persist a draft and return the stored record with its assigned
    /// identity.
    fn append(&self, draft: &RecordDraft) -> Result<MessageRecord>;

    /// All records, ordered by ascending timestamp.
    fn read_all(&self) -> Result<Vec<MessageRecord>>;
}
