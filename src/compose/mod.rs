//! Artifact composition: the QR payload and the printable page plan.
//!
//! Both steps are pure. They take validated domain values and return fresh
//! values; rendering and transport live in [`crate::render`] and
//! [`crate::delivery`].

pub mod payload;
pub mod plan;

pub use payload::{build_qr_payload, QrPayload, TEL_SCHEME};
pub use plan::{
    artifact_filename, build_document_plan, build_document_plan_with, Align, Branding,
    DashedRect, DocumentPlan, DrawOp, FontStyle, ImageSlot, Rgb8, TextRun, DEFAULT_SITE,
    PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
