//! Flat-file implementation of the message log.
//!
//! One text file per message under a configured directory:
//!
//! ```text
//! Date: 2024-03-01 09:15:42.123456
//! Author: alice
//! Type: message
//! Signature: 8f3a...
//!
//! message body to end of file
//! ```
//!
//! Filenames are `YYYYMMDD_HHMMSS_<author>.txt`; the zero-padded date prefix
//! makes lexical directory order equal timestamp order, which is what
//! `read_all` sorts by.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pomchat_core::{format_date, parse_date, LogId, MessageRecord};

use crate::error::{Result, StoreError};
use crate::traits::{MessageLog, RecordDraft};

const FILE_EXT: &str = "txt";

/// Retry bound for same-second filename collisions.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// File-backed message log.
pub struct FileLog {
    dir: PathBuf,
}

impl FileLog {
    /// Open (and create if absent) a log directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The log directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every record file in lexical (= timestamp) order, each paired with
    /// its parse result.
    ///
    /// This is the single parse path: `read_all` filters it down to the
    /// parseable records, the import tool consumes it whole so it can report
    /// per-file failures.
    pub fn entries(&self) -> Result<Vec<(String, Result<MessageRecord>)>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(&format!(".{FILE_EXT}")) {
                names.push(name);
            }
        }
        names.sort();

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let parsed = fs::read_to_string(self.dir.join(&name))
                .map_err(StoreError::from)
                .and_then(|text| parse_record(&name, &text));
            entries.push((name, parsed));
        }
        Ok(entries)
    }
}

impl MessageLog for FileLog {
    fn append(&self, draft: &RecordDraft) -> Result<MessageRecord> {
        let stem = format!(
            "{}_{}",
            draft.date.format("%Y%m%d_%H%M%S"),
            sanitize_author(&draft.author)
        );

        // Exclusive create; a second append in the same second for the same
        // author retries with a numeric suffix (still after the date prefix,
        // so lexical order is preserved).
        let mut name = format!("{stem}.{FILE_EXT}");
        let mut attempt: u32 = 1;
        let mut file = loop {
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&name))
            {
                Ok(file) => break file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                    if attempt > MAX_NAME_ATTEMPTS {
                        return Err(e.into());
                    }
                    name = format!("{stem}_{attempt}.{FILE_EXT}");
                }
                Err(e) => return Err(e.into()),
            }
        };

        file.write_all(render_record(draft).as_bytes())?;

        Ok(MessageRecord {
            id: LogId::File(name),
            date: draft.date,
            author: draft.author.clone(),
            kind: draft.kind.clone(),
            content: draft.content.clone(),
            signature: draft.signature.clone(),
            origin: draft.origin.clone(),
        })
    }

    fn read_all(&self) -> Result<Vec<MessageRecord>> {
        let mut records = Vec::new();
        for (name, parsed) in self.entries()? {
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "skipping unreadable record");
                }
            }
        }
        Ok(records)
    }
}

/// Render a draft in the on-disk record format.
fn render_record(draft: &RecordDraft) -> String {
    format!(
        "Date: {}\nAuthor: {}\nType: {}\nSignature: {}\n\n{}",
        format_date(draft.date),
        draft.author,
        draft.kind,
        draft.signature,
        draft.content
    )
}

/// Strict parser for the on-disk record format.
///
/// Splits on the first blank line; header keys are case-folded; any missing
/// required header fails closed as a malformed record instead of defaulting.
fn parse_record(filename: &str, text: &str) -> Result<MessageRecord> {
    let Some((header_block, body)) = text.split_once("\n\n") else {
        return Err(StoreError::malformed(filename, "missing blank line after headers"));
    };

    let mut date = None;
    let mut author = None;
    let mut kind = None;
    let mut signature = None;

    for line in header_block.lines() {
        let line = line.trim_end_matches('\r');
        let Some((key, value)) = line.split_once(": ") else {
            return Err(StoreError::malformed(
                filename,
                format!("header line without `: ` separator: {line:?}"),
            ));
        };
        match key.to_ascii_lowercase().as_str() {
            "date" => date = Some(value.to_string()),
            "author" => author = Some(value.to_string()),
            "type" => kind = Some(value.to_string()),
            "signature" => signature = Some(value.to_string()),
            // Unknown headers are tolerated for forward compatibility.
            _ => {}
        }
    }

    let date = date.ok_or_else(|| StoreError::malformed(filename, "missing Date header"))?;
    let author = author.ok_or_else(|| StoreError::malformed(filename, "missing Author header"))?;
    let kind = kind.ok_or_else(|| StoreError::malformed(filename, "missing Type header"))?;
    let signature =
        signature.ok_or_else(|| StoreError::malformed(filename, "missing Signature header"))?;

    let date = parse_date(&date)
        .ok_or_else(|| StoreError::malformed(filename, format!("unparseable date {date:?}")))?;

    if hex::decode(&signature).is_err() {
        return Err(StoreError::malformed(filename, "signature is not hex"));
    }

    Ok(MessageRecord {
        id: LogId::File(filename.to_string()),
        date,
        author,
        kind,
        content: body.to_string(),
        signature,
        origin: None,
    })
}

/// Reduce an author label to filename-safe characters.
fn sanitize_author(author: &str) -> String {
    let cleaned: String = author
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(20)
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
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

    fn temp_log() -> (tempfile::TempDir, FileLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::open(dir.path().join("messages")).unwrap();
        (dir, log)
    }

    #[test]
    fn append_then_read_roundtrip() {
        let (_dir, log) = temp_log();
        let d = draft("2024-03-01 09:15:42.000000", "alice", "hello");
        let appended = log.append(&d).unwrap();

        assert_eq!(appended.id, LogId::File("20240301_091542_alice.txt".into()));

        let all = log.read_all().unwrap();
        assert_eq!(all, vec![appended]);
    }

    #[test]
    fn body_with_blank_lines_survives() {
        let (_dir, log) = temp_log();
        let content = "first paragraph\n\nsecond paragraph\n";
        log.append(&draft("2024-03-01 09:15:42.000000", "alice", content))
            .unwrap();

        let all = log.read_all().unwrap();
        assert_eq!(all[0].content, content);
    }

    #[test]
    fn read_all_is_timestamp_ordered() {
        let (_dir, log) = temp_log();
        // Appended out of chronological order.
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
    fn same_second_appends_get_distinct_files() {
        let (_dir, log) = temp_log();
        let d1 = draft("2024-03-01 09:15:42.000000", "alice", "one");
        let d2 = draft("2024-03-01 09:15:42.000000", "alice", "two");

        let r1 = log.append(&d1).unwrap();
        let r2 = log.append(&d2).unwrap();
        assert_ne!(r1.id, r2.id);

        // Suffix sorts after the base name, so append order is preserved.
        let contents: Vec<_> = log
            .read_all()
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(contents, ["one", "two"]);
    }

    #[test]
    fn malformed_file_is_skipped_not_fatal() {
        let (_dir, log) = temp_log();
        log.append(&draft("2024-03-01 09:15:42.000000", "alice", "good"))
            .unwrap();
        fs::write(log.dir().join("20240301_000000_junk.txt"), "no headers here").unwrap();

        let all = log.read_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].content, "good");
    }

    #[test]
    fn missing_required_header_fails_closed() {
        // No Signature header.
        let text = "Date: 2024-03-01 09:15:42.000000\nAuthor: alice\nType: message\n\nbody";
        let err = parse_record("f.txt", text).unwrap_err();
        assert!(matches!(err, StoreError::MalformedRecord { .. }));
        assert!(err.to_string().contains("Signature"));
    }

    #[test]
    fn header_keys_are_case_folded() {
        let text =
            "DATE: 2024-03-01 09:15:42.000000\nauthor: alice\nTYPE: message\nsignature: ab\n\nbody";
        let record = parse_record("f.txt", text).unwrap();
        assert_eq!(record.author, "alice");
        assert_eq!(record.kind, "message");
    }

    #[test]
    fn non_hex_signature_is_malformed() {
        let text =
            "Date: 2024-03-01 09:15:42.000000\nAuthor: alice\nType: message\nSignature: zz!\n\nbody";
        assert!(parse_record("f.txt", text).is_err());
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let (_dir, log) = temp_log();
        fs::write(log.dir().join("README.md"), "not a record").unwrap();
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn author_is_sanitized_for_filenames() {
        let (_dir, log) = temp_log();
        let record = log
            .append(&draft("2024-03-01 09:15:42.000000", "al/ice ../x", "hi"))
            .unwrap();
        assert_eq!(
            record.id,
            LogId::File("20240301_091542_al_ice____x.txt".into())
        );
        // The stored record keeps the original author label.
        assert_eq!(record.author, "al/ice ../x");
    }
}
