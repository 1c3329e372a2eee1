//! SQLite implementation of the message log.
//!
//! Uses rusqlite with bundled SQLite. The single writer assumption of the
//! core means the connection only needs a `Mutex` for interior mutability,
//! not a pool.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};

use pomchat_core::{format_date, parse_date, LogId, MessageRecord};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{MessageLog, RecordDraft};

/// SQLite-backed message log.
pub struct SqliteLog {
    conn: Mutex<Connection>,
}

impl SqliteLog {
    /// Open a database at the given path, creating and migrating it if
    /// needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (tests).
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Total number of stored records.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Whether any record carries the given source filename as provenance.
    /// This is the import tool's re-run dedup key.
    pub fn has_origin(&self, original_file: &str) -> Result<bool> {
        let conn = self.conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM messages WHERE original_file = ?1)",
            params![original_file],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

// Helper to convert a row to a MessageRecord. Column order must match the
// SELECT in read_all.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MessageRecord> {
    let date_text: String = row.get("date")?;
    let date = parse_date(&date_text).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(1, "date".into(), rusqlite::types::Type::Text)
    })?;

    Ok(MessageRecord {
        id: LogId::Rowid(row.get("id")?),
        date,
        author: row.get("author")?,
        kind: row.get("type")?,
        content: row.get("content")?,
        signature: row.get("signature")?,
        origin: row.get("original_file")?,
    })
}

impl MessageLog for SqliteLog {
    fn append(&self, draft: &RecordDraft) -> Result<MessageRecord> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO messages (date, author, type, content, signature, original_file)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                format_date(draft.date),
                draft.author,
                draft.kind,
                draft.content,
                draft.signature,
                draft.origin,
            ],
        )?;

        Ok(MessageRecord {
            id: LogId::Rowid(conn.last_insert_rowid()),
            date: draft.date,
            author: draft.author.clone(),
            kind: draft.kind.clone(),
            content: draft.content.clone(),
            signature: draft.signature.clone(),
            origin: draft.origin.clone(),
        })
    }

    fn read_all(&self) -> Result<Vec<MessageRecord>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, date, author, type, content, signature, original_file
             FROM messages ORDER BY date ASC, id ASC",
        )?;

        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use pomchat_core::DATE_FORMAT;

    use super::*;

    fn date(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn draft(date_str: &str, author: &str, content: &str) -> RecordDraft {
        RecordDraft {
            date: date(date_str),
            author: author.to_string(),
            kind: "message".to_string(),
            content: content.to_string(),
            signature: "deadbeef".to_string(),
            origin: None,
        }
    }

    #[test]
    fn append_assigns_increasing_rowids() {
        let log = SqliteLog::open_memory().unwrap();

        let r1 = log
            .append(&draft("2024-03-01 09:15:42.000000", "alice", "one"))
            .unwrap();
        let r2 = log
            .append(&draft("2024-03-01 09:15:43.000000", "bob", "two"))
            .unwrap();

        assert_eq!(r1.id, LogId::Rowid(1));
        assert_eq!(r2.id, LogId::Rowid(2));
    }

    #[test]
    fn read_all_is_date_ordered() {
        let log = SqliteLog::open_memory().unwrap();
        log.append(&draft("2024-03-02 08:00:00.000000", "bob", "second"))
            .unwrap();
        log.append(&draft("2024-03-01 09:15:42.000000", "alice", "first"))
            .unwrap();
        log.append(&draft("2024-03-03 10:30:00.000000", "carol", "third"))
            .unwrap();

        let contents: Vec<_> = log
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[test]
    fn equal_dates_fall_back_to_insertion_order() {
        let log = SqliteLog::open_memory().unwrap();
        log.append(&draft("2024-03-01 09:15:42.000000", "alice", "one"))
            .unwrap();
        log.append(&draft("2024-03-01 09:15:42.000000", "alice", "two"))
            .unwrap();

        let contents: Vec<_> = log
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, ["one", "two"]);
    }

    #[test]
    fn record_fields_roundtrip() {
        let log = SqliteLog::open_memory().unwrap();
        let mut d = draft("2024-03-01 09:15:42.123456", "alice", "hello");
        d.origin = Some("20240301_091542_alice.txt".to_string());

        let appended = log.append(&d).unwrap();
        let all = log.read_all().unwrap();
        assert_eq!(all, vec![appended]);
        assert_eq!(all[0].origin.as_deref(), Some("20240301_091542_alice.txt"));
    }

    #[test]
    fn count_and_has_origin() {
        let log = SqliteLog::open_memory().unwrap();
        assert_eq!(log.count().unwrap(), 0);
        assert!(!log.has_origin("a.txt").unwrap());

        let mut d = draft("2024-03-01 09:15:42.000000", "alice", "hello");
        d.origin = Some("a.txt".to_string());
        log.append(&d).unwrap();

        assert_eq!(log.count().unwrap(), 1);
        assert!(log.has_origin("a.txt").unwrap());
        assert!(!log.has_origin("b.txt").unwrap());
    }
}
