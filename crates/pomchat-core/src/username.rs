//! Username validation.
//!
//! Usernames double as key-registry filenames, so the character set is the
//! path-safety gate as well as the API contract: ASCII alphanumerics and
//! underscore, 3 to 20 characters.

/// Minimum username length.
pub const USERNAME_MIN: usize = 3;

/// Maximum username length.
pub const USERNAME_MAX: usize = 20;

/// Check a username against `[A-Za-z0-9_]{3,20}`.
pub fn is_valid_username(name: &str) -> bool {
    (USERNAME_MIN..=USERNAME_MAX).contains(&name.len())
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
