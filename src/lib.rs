//! Printable call-me QR codes.
//!
//! A phone number (and optional name) goes in; a `tel:` QR code and a
//! one-page A4 PDF with cut-out instructions come out. The sheet is meant
//! to sit behind a windshield so anyone can call the driver by scanning.
//!
//! # Architecture
//!
//! - [`domain`]: input normalisation and validation (phone numbers, names)
//! - [`compose`]: pure composition of the QR payload and the page plan
//! - [`render`]: QR and PDF rendering collaborators
//! - [`delivery`]: share, email and analytics collaborators
//! - [`session`]: the explicit generation session and the service driving it
//! - [`config`]: tunables
//! - [`error`]: error handling and user notices
//!
//! # Quick Start
//!
//! ```no_run
//! use quickdial::{GenerationSession, QuickDialConfig, QuickDialService};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = QuickDialService::with_default_renderers(QuickDialConfig::default());
//! let mut session = GenerationSession::new();
//!
//! service.generate(&mut session, "01712345678", "Test User")?;
//! service.download(&session, Some(Path::new("out")))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Pure pipeline
//!
//! ```
//! use quickdial::{build_qr_payload, normalize_phone_input, validate_phone_number};
//!
//! assert_eq!(normalize_phone_input("01712345678"), "+8801712345678");
//!
//! let phone = validate_phone_number("01712345678").unwrap();
//! assert_eq!(build_qr_payload(&phone).as_str(), "tel:+8801712345678");
//! ```

// Public API
pub mod compose;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;

// Re-exports for convenient access
pub use compose::{
    artifact_filename, build_document_plan, build_document_plan_with, build_qr_payload,
    DocumentPlan, DrawOp, QrPayload,
};
pub use config::QuickDialConfig;
pub use delivery::{
    AnalyticsEvent, AnalyticsSink, EmailMessage, MailRelay, NoopAnalytics, OutboxRelay,
    ShareFacility, ShareOutcome, ShareRequest, SpoolShare, TracingAnalytics, UnsupportedShare,
};
pub use domain::{
    normalize_phone_input, truncate_name_input, validate_name_length, validate_phone_number,
    CanonicalPhone, ContactName, PhoneKind,
};
pub use error::{Notice, NoticeLevel, QuickDialError, QuickDialResult, RenderStage};
pub use render::{
    DocumentRenderer, PrintPdfRenderer, QrCodeRenderer, QrImage, QrRenderer, RenderedDocument,
};
pub use session::{Artifact, Delivery, GenerationSession, QuickDialService};
