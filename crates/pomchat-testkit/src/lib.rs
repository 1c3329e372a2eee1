//! # Pomchat Testkit
//!
//! Shared fixtures for integration tests: an ephemeral key directory with a
//! generated server keypair, registered test users holding their own
//! client-side keypairs, and log backends rooted in the same temp dir.

pub mod fixtures;

pub use fixtures::{draft_at, TestFixture, TestUser};
