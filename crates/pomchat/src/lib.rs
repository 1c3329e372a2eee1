//! # Pomchat
//!
//! The service facade over the identity-and-integrity core. [`ChatService`]
//! wires the key store, the server signer, and a message log backend into
//! the three operations the route layer consumes:
//!
//! - post a message (server-signed, appended to the log)
//! - list all messages (ascending timestamp)
//! - rename a username (user-signature-gated key relocation)
//!
//! [`api`] holds the serde request/response shapes for the HTTP boundary;
//! [`ChatError::status`] documents how each failure maps to a status code.
//! The route layer, realtime transport, and timer live outside this
//! workspace.

pub mod api;
pub mod config;
pub mod error;
pub mod service;

pub use config::{BackendKind, Config};
pub use error::{ChatError, Result};
pub use service::ChatService;
