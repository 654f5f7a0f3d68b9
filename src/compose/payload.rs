//! `tel:` payloads for the QR code.

use crate::domain::{strip_separators, CanonicalPhone};
use serde::Serialize;
use std::fmt;

/// URI scheme every smartphone camera hands to the dialer.
pub const TEL_SCHEME: &str = "tel:";

/// The text encoded into the QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QrPayload(String);

impl QrPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The dialable part after `tel:`.
    pub fn number(&self) -> &str {
        self.0.strip_prefix(TEL_SCHEME).unwrap_or(&self.0)
    }
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the `tel:<+digits>` payload for a validated phone number.
///
/// ```
/// use quickdial::{build_qr_payload, validate_phone_number};
///
/// let phone = validate_phone_number("01712345678").unwrap();
/// assert_eq!(build_qr_payload(&phone).as_str(), "tel:+8801712345678");
/// ```
pub fn build_qr_payload(phone: &CanonicalPhone) -> QrPayload {
    QrPayload(format!("{}{}", TEL_SCHEME, strip_separators(phone.as_str())))
}
