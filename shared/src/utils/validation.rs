//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static HAS_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]").unwrap());
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Minimum password length accepted by the password policy
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check a plaintext password against the account password policy
///
/// The policy requires at least [`MIN_PASSWORD_LENGTH`] characters with at
/// least one letter and one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && HAS_LETTER.is_match(password)
        && HAS_DIGIT.is_match(password)
}

/// Normalize an email address for storage and lookup
///
/// Addresses are compared case-insensitively everywhere, so they are
/// lower-cased once at the boundary.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
