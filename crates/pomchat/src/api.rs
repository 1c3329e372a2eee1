//! Request and response shapes for the HTTP boundary.
//!
//! The route layer itself lives outside this workspace; these types are the
//! contract it deserializes into and serializes out of.

use pomchat_core::{format_date, LogId, MessageRecord, RenameRequest};
use serde::{Deserialize, Serialize};

/// Body of `POST /messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// One record as returned by `GET /messages` and `POST /messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: LogId,
    pub date: String,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file: Option<String>,
}

impl From<MessageRecord> for MessageResponse {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            date: format_date(record.date),
            author: record.author,
            kind: record.kind,
            content: record.content,
            signature: record.signature,
            original_file: record.origin,
        }
    }
}

/// Body of `POST /username`.
#[derive(Debug, Clone, Deserialize)]
pub struct RenameUsernameRequest {
    pub old_username: String,
    pub new_username: String,
    /// Hex-encoded signature over the canonical rename payload, produced by
    /// the old username's private key (held client-side).
    pub signature: String,
}

impl RenameUsernameRequest {
    /// The payload half of the request, in canonical form.
    pub fn rename_request(&self) -> RenameRequest {
        RenameRequest::new(self.old_username.clone(), self.new_username.clone())
    }
}

/// Success body of `POST /username`.
#[derive(Debug, Clone, Serialize)]
pub struct RenameUsernameResponse {
    pub username: String,
}
