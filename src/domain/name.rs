//! Contact name rules.

use crate::error::{QuickDialError, QuickDialResult};
use serde::Serialize;
use std::fmt;

/// Maximum contact name length, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// An optional display name of at most [`MAX_NAME_LEN`] characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactName(String);

impl ContactName {
    /// The empty name.
    pub fn none() -> Self {
        Self::default()
    }

    /// Trims and validates a submitted name.
    pub fn parse(raw: &str) -> QuickDialResult<Self> {
        validate_name_length(raw.trim()).map(|name| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Some(name)` when a name was given.
    pub fn get(&self) -> Option<&str> {
        if self.0.is_empty() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejects names longer than [`MAX_NAME_LEN`] characters.
pub fn validate_name_length(value: &str) -> QuickDialResult<&str> {
    let length = value.chars().count();
    if length > MAX_NAME_LEN {
        return Err(QuickDialError::NameTooLong {
            length,
            max: MAX_NAME_LEN,
        });
    }
    Ok(value)
}

/// Truncates live input to [`MAX_NAME_LEN`] characters instead of rejecting it.
pub fn truncate_name_input(value: &str) -> &str {
    match value.char_indices().nth(MAX_NAME_LEN) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
