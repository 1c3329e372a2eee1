//! The message record model.
//!
//! A [`MessageRecord`] is one persisted chat message. Records are immutable
//! once appended; the log never updates or deletes them. The `author` field
//! is a free-text label, not a reference into the key registry - the two are
//! correlated only through the rename protocol's username strings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed timestamp format used everywhere a date is stored or rendered.
///
/// Zero-padded so that lexical order equals chronological order (the file
/// backend and the SQLite `ORDER BY date` both rely on this).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Author used when a post carries none.
pub const DEFAULT_AUTHOR: &str = "anonymous";

/// Type tag used when a post carries none.
pub const DEFAULT_KIND: &str = "message";

/// Backend-assigned record identity.
///
/// The relational backend hands out auto-increment rowids; the file backend
/// uses the record's filename, which embeds the timestamp for sortability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogId {
    /// SQLite rowid.
    Rowid(i64),
    /// File backend record filename.
    File(String),
}

/// One persisted, server-signed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    /// Identity assigned by the backend on append.
    pub id: LogId,
    /// Timestamp assigned at signing time. Monotonicity across clock skew is
    /// a should, not a guarantee.
    pub date: NaiveDateTime,
    /// Free-text author label.
    pub author: String,
    /// Free-form type tag (`"message"`, `"username_change"`, ...).
    pub kind: String,
    /// Message body.
    pub content: String,
    /// Hex-encoded server signature over the exact content bytes. Proves
    /// "this server persisted this content", not author authenticity.
    pub signature: String,
    /// Source filename, present only for records created via migration.
    pub origin: Option<String>,
}

/// Render a timestamp in the canonical [`DATE_FORMAT`].
pub fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a timestamp written by [`format_date`].
///
/// Accepts a missing fractional part, which older records omit.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_format_roundtrip() {
        let date = parse_date("2024-03-01 09:15:42.123456").unwrap();
        assert_eq!(format_date(date), "2024-03-01 09:15:42.123456");
    }

    #[test]
    fn date_without_fraction_parses() {
        let date = parse_date("2024-03-01 09:15:42").unwrap();
        assert_eq!(format_date(date), "2024-03-01 09:15:42.000000");
    }

    #[test]
    fn garbage_date_is_rejected() {
        assert!(parse_date("yesterday at noon").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn log_id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&LogId::Rowid(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&LogId::File("20240301_091542_alice.txt".into())).unwrap(),
            "\"20240301_091542_alice.txt\""
        );
    }

    #[test]
    fn lexical_date_order_matches_chronological() {
        let earlier = parse_date("2024-03-01 09:15:42.000001").unwrap();
        let later = parse_date("2024-03-01 09:15:42.000010").unwrap();
        assert!(earlier < later);
        assert!(format_date(earlier) < format_date(later));
    }
}
