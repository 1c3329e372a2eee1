//! # Pomchat Core
//!
//! Core primitives shared by every pomchat crate: the message record model,
//! the RSA-PSS signing and verification wrappers, the canonical rename
//! payload, and username validation.
//!
//! ## Key Types
//!
//! - [`Keypair`] - An RSA keypair that signs content (hex-encoded PSS)
//! - [`PublicKey`] - A verification-only key parsed from SPKI PEM
//! - [`MessageRecord`] - One persisted, server-signed chat message
//! - [`RenameRequest`] - The byte-stable payload a user signs to prove a
//!   username change
//!
//! Trust model: message signatures are always produced by the *server*
//! keypair (they prove "this server persisted this content"), while rename
//! signatures are always produced by a *user* keypair (they prove consent of
//! the old username's owner). The two must never be conflated.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod record;
pub mod username;

pub use canonical::RenameRequest;
pub use crypto::{Keypair, PublicKey, KEY_BITS};
pub use error::CoreError;
pub use record::{
    format_date, parse_date, LogId, MessageRecord, DATE_FORMAT, DEFAULT_AUTHOR, DEFAULT_KIND,
};
pub use username::{is_valid_username, USERNAME_MAX, USERNAME_MIN};
