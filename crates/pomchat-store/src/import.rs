//! One-shot file-log to SQLite conversion.
//!
//! A pure translator between the two backends: records come out of
//! [`FileLog::entries`] (the same parser the read path uses) and go into
//! [`SqliteLog`] through the ordinary append path, carrying the source
//! filename as provenance.
//!
//! Offline maintenance only - running it while either backend has a live
//! writer is unsupported.

use pomchat_core::LogId;

use crate::error::Result;
use crate::file::FileLog;
use crate::sqlite::SqliteLog;
use crate::traits::{MessageLog, RecordDraft};

/// What an import run did.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Records inserted into the relational log.
    pub imported: usize,
    /// Source files skipped because their provenance already exists
    /// (a previous run imported them).
    pub duplicates: usize,
    /// Unparseable source files, with the reason each was skipped.
    pub skipped: Vec<(String, String)>,
}

/// Convert every parseable record in `source` into a row in `dest`.
///
/// Per-file problems never abort the run: malformed files are reported in
/// the result and skipped, already-imported files (matched by
/// `original_file` provenance) are counted as duplicates. Only destination
/// storage failures are fatal.
pub fn import_file_log(source: &FileLog, dest: &SqliteLog) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (filename, parsed) in source.entries()? {
        let record = match parsed {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(file = %filename, error = %e, "skipping unparseable record");
                report.skipped.push((filename, e.to_string()));
                continue;
            }
        };

        if dest.has_origin(&filename)? {
            report.duplicates += 1;
            continue;
        }

        debug_assert_eq!(record.id, LogId::File(filename.clone()));
        let draft = RecordDraft {
            date: record.date,
            author: record.author,
            kind: record.kind,
            content: record.content,
            signature: record.signature,
            origin: Some(filename),
        };
        dest.append(&draft)?;
        report.imported += 1;
    }

    tracing::info!(
        imported = report.imported,
        duplicates = report.duplicates,
        skipped = report.skipped.len(),
        "file log import finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDateTime;
    use pomchat_core::DATE_FORMAT;

    use super::*;

    fn draft(date_str: &str, author: &str, content: &str) -> RecordDraft {
        RecordDraft {
            date: NaiveDateTime::parse_from_str(date_str, DATE_FORMAT).unwrap(),
            author: author.to_string(),
            kind: "message".to_string(),
            content: content.to_string(),
            signature: "deadbeef".to_string(),
            origin: None,
        }
    }

    fn file_log_with_records() -> (tempfile::TempDir, FileLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = FileLog::open(dir.path().join("messages")).unwrap();
        log.append(&draft("2024-03-01 09:15:42.000000", "alice", "hello"))
            .unwrap();
        log.append(&draft("2024-03-01 10:00:00.000000", "bob", "hi alice"))
            .unwrap();
        (dir, log)
    }

    #[test]
    fn import_preserves_fields_and_provenance() {
        let (_dir, source) = file_log_with_records();
        let dest = SqliteLog::open_memory().unwrap();

        let report = import_file_log(&source, &dest).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.duplicates, 0);
        assert!(report.skipped.is_empty());

        let originals = source.read_all().unwrap();
        let migrated = dest.read_all().unwrap();
        assert_eq!(migrated.len(), 2);

        for (original, migrated) in originals.iter().zip(&migrated) {
            assert_eq!(migrated.author, original.author);
            assert_eq!(migrated.kind, original.kind);
            assert_eq!(migrated.content, original.content);
            assert_eq!(migrated.signature, original.signature);
            let LogId::File(source_name) = &original.id else {
                panic!("file log record without file id");
            };
            assert_eq!(migrated.origin.as_ref(), Some(source_name));
        }
    }

    #[test]
    fn rerun_skips_already_imported_files() {
        let (_dir, source) = file_log_with_records();
        let dest = SqliteLog::open_memory().unwrap();

        import_file_log(&source, &dest).unwrap();
        let report = import_file_log(&source, &dest).unwrap();

        assert_eq!(report.imported, 0);
        assert_eq!(report.duplicates, 2);
        assert_eq!(dest.count().unwrap(), 2);
    }

    #[test]
    fn malformed_file_is_reported_and_skipped() {
        let (_dir, source) = file_log_with_records();
        fs::write(
            source.dir().join("20240229_000000_junk.txt"),
            "not a record at all",
        )
        .unwrap();
        let dest = SqliteLog::open_memory().unwrap();

        let report = import_file_log(&source, &dest).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "20240229_000000_junk.txt");
        assert_eq!(dest.count().unwrap(), 2);
    }
}
