//! Phone number domain logic.
//!
//! This module encapsulates all business rules related to phone number
//! entry: live normalisation while typing, validation at submit time, and
//! the canonical form the rest of the pipeline works with.

use super::{digits_only, strip_separators};
use crate::error::{QuickDialError, QuickDialResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Country calling code prepended to local mobile numbers.
pub const COUNTRY_CODE: &str = "88";

/// Which accepted shape a number matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneKind {
    /// 11-digit local mobile number (`01[3-9]` + 8 digits), optionally with `88`/`+88`
    LocalMobile,
    /// Generic international number, 8-15 digits with a nonzero lead digit
    International,
}

/// A validated phone number: `+` followed only by digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalPhone {
    value: String,
    kind: PhoneKind,
}

impl CanonicalPhone {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> PhoneKind {
        self.kind
    }

    /// The digit sequence without the leading `+`.
    pub fn digits(&self) -> &str {
        self.value.trim_start_matches('+')
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for CanonicalPhone {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

/// Local mobile pattern (optional `+88`/`88`, then `01`, operator digit 3-9, 8 digits).
///
/// Digits are ASCII only; the `local` group captures the `01X...` part.
fn local_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?:\+?88)?(?P<local>01[3-9][0-9]{8})$").expect("Valid local phone regex")
    });
    &PATTERN
}

/// Generic international pattern (optional `+`, nonzero digit, 7-14 more digits).
fn international_pattern() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\+?[1-9][0-9]{7,14}$").expect("Valid international phone regex")
    });
    &PATTERN
}

/// Normalises phone input as it is typed.
///
/// Drops every non-digit, then:
/// - digits starting with `88` get a leading `+`
/// - exactly 11 digits starting with `01` get `+88` prepended
///
/// Anything else is returned as the bare digit string. Applying it to its
/// own output is a no-op.
///
/// ```
/// use quickdial::normalize_phone_input;
///
/// assert_eq!(normalize_phone_input("017-1234-5678"), "+8801712345678");
/// assert_eq!(normalize_phone_input("0171"), "0171");
/// ```
pub fn normalize_phone_input(raw: &str) -> String {
    let digits = digits_only(raw);

    if digits.starts_with(COUNTRY_CODE) {
        format!("+{}", digits)
    } else if digits.starts_with("01") && digits.len() == 11 {
        format!("+{}{}", COUNTRY_CODE, digits)
    } else {
        digits
    }
}

/// Validates a submitted phone number and returns its canonical form.
///
/// Whitespace, hyphens and parentheses are stripped first. The cleaned
/// value must match the local mobile pattern OR the generic international
/// pattern; the two overlap and are tried in that order.
///
/// # Errors
/// - [`QuickDialError::EmptyInput`] if nothing but whitespace was entered
/// - [`QuickDialError::InvalidFormat`] if neither pattern matches
pub fn validate_phone_number(value: &str) -> QuickDialResult<CanonicalPhone> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QuickDialError::EmptyInput);
    }

    let cleaned = strip_separators(trimmed);

    let phone = if let Some(local) = local_pattern()
        .captures(&cleaned)
        .and_then(|caps| caps.name("local"))
    {
        CanonicalPhone {
            value: format!("+{}{}", COUNTRY_CODE, local.as_str()),
            kind: PhoneKind::LocalMobile,
        }
    } else if international_pattern().is_match(&cleaned) {
        CanonicalPhone {
            value: format!("+{}", cleaned.trim_start_matches('+')),
            kind: PhoneKind::International,
        }
    } else {
        return Err(QuickDialError::InvalidFormat {
            input: trimmed.to_string(),
        });
    };

    debug!(input = trimmed, canonical = %phone, kind = ?phone.kind, "phone number accepted");
    Ok(phone)
}
