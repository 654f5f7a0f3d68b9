//! Rendering collaborators.
//!
//! The core hands a payload to a [`QrRenderer`] and a page plan to a
//! [`DocumentRenderer`]. Both are traits so a front end can swap engines
//! (or inject failures in tests) without touching the composition logic.

pub mod metrics;
pub mod pdf;
pub mod qr;

pub use pdf::{DocumentRenderer, PrintPdfRenderer, RenderedDocument, PDF_MIME};
pub use qr::{QrCodeRenderer, QrImage, QrRenderer, QUIET_ZONE};
