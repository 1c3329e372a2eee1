//! Canonical serialization of the rename payload.
//!
//! The rename protocol is a cross-boundary contract: the client signs these
//! bytes with its private key, the server re-derives them and verifies. The
//! two sides must agree byte-for-byte, so the encoding is fixed here:
//! compact JSON, `old_username` before `new_username`, no whitespace.
//!
//! ```text
//! {"old_username":"alice","new_username":"alice2"}
//! ```

use serde::{Deserialize, Serialize};

/// A request to move a registered public key to a new username.
///
/// Field order matters: serde serializes struct fields in declaration order,
/// which is what fixes the canonical byte layout. Do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub old_username: String,
    pub new_username: String,
}

impl RenameRequest {
    pub fn new(old_username: impl Into<String>, new_username: impl Into<String>) -> Self {
        Self {
            old_username: old_username.into(),
            new_username: new_username.into(),
        }
    }

    /// The exact bytes a client must sign to authorize this rename.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        // Infallible: a two-string struct always serializes.
        serde_json::to_vec(self).expect("rename payload serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_bytes_are_pinned() {
        let request = RenameRequest::new("alice", "alice2");
        assert_eq!(
            request.canonical_bytes(),
            br#"{"old_username":"alice","new_username":"alice2"}"#
        );
    }

    #[test]
    fn canonical_bytes_escape_like_json() {
        // Usernames are validated elsewhere; the encoding itself must still
        // be well-formed JSON for any input.
        let request = RenameRequest::new("al\"ice", "bob");
        assert_eq!(
            request.canonical_bytes(),
            br#"{"old_username":"al\"ice","new_username":"bob"}"#
        );
    }

    #[test]
    fn wire_roundtrip() {
        let request = RenameRequest::new("alice", "alice2");
        let json = String::from_utf8(request.canonical_bytes()).unwrap();
        let parsed: RenameRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
