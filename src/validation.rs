//! Input validation for storage keys, notes and contact data.

use crate::error::{Result, RtsError};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum allowed length for a storage key.
pub const MAX_KEY_LENGTH: usize = 120;

/// Maximum allowed length for a free-text step note.
pub const MAX_NOTE_LENGTH: usize = 2_000;

/// Maximum allowed length for the contact message.
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Characters forbidden in keys since the file store maps keys to filenames.
const FORBIDDEN_KEY_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates a storage key to prevent path traversal.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(RtsError::Validation("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(RtsError::Validation(format!(
            "Key exceeds maximum length of {} characters",
            MAX_KEY_LENGTH
        )));
    }
    if key.contains("..") {
        return Err(RtsError::Validation(
            "Key cannot contain '..' (path traversal)".to_string(),
        ));
    }
    for c in FORBIDDEN_KEY_CHARS {
        if key.contains(*c) {
            return Err(RtsError::Validation(format!("Key cannot contain '{}'", c)));
        }
    }
    Ok(())
}

/// Validates a step note.
pub fn validate_note(note: &str) -> Result<()> {
    if note.chars().count() > MAX_NOTE_LENGTH {
        return Err(RtsError::Validation(format!(
            "Note exceeds maximum length of {} characters",
            MAX_NOTE_LENGTH
        )));
    }
    Ok(())
}

/// Validates an email address. Empty is accepted: every contact field is optional.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() || EMAIL_RE.is_match(email) {
        return Ok(());
    }
    Err(RtsError::Validation(format!("Invalid email address: {}", email)))
}

/// Validates the contact message.
pub fn validate_message(message: &str) -> Result<()> {
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(RtsError::Validation(format!(
            "Message exceeds maximum length of {} characters",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(())
}
