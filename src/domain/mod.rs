//! Input normalisation and validation.
//!
//! This module contains the rules that turn free-form form input into a
//! [`CanonicalPhone`] and a [`ContactName`], or reject it.

pub mod name;
pub mod phone;

pub use name::{truncate_name_input, validate_name_length, ContactName, MAX_NAME_LEN};
pub use phone::{normalize_phone_input, validate_phone_number, CanonicalPhone, PhoneKind};

use once_cell::sync::Lazy;
use regex::Regex;

/// Formatting characters users type between digits.
fn separators() -> &'static Regex {
    static PATTERN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[\s\-()]").expect("Valid separator regex"));
    &PATTERN
}

/// Removes whitespace, hyphens and parentheses.
///
/// ```
/// use quickdial::domain::strip_separators;
///
/// assert_eq!(strip_separators("(017) 1234-5678"), "01712345678");
/// ```
pub fn strip_separators(value: &str) -> String {
    separators().replace_all(value, "").into_owned()
}

/// Keeps only ASCII digits.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
