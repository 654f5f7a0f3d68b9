//! Generation session and the service that drives it.
//!
//! [`GenerationSession`] is the one mutable slot in the system: the last
//! successfully generated artifact. It is owned by the front end and passed
//! into [`QuickDialService`] explicitly, so writes are serialised by the
//! borrow checker (`&mut GenerationSession`) rather than by convention.

use crate::compose::{build_document_plan_with, build_qr_payload, DocumentPlan, QrPayload};
use crate::config::QuickDialConfig;
use crate::delivery::{
    AnalyticsEvent, AnalyticsSink, EmailMessage, MailRelay, ShareFacility, ShareOutcome,
    ShareRequest, TracingAnalytics,
};
use crate::domain::{validate_phone_number, CanonicalPhone, ContactName, PhoneKind};
use crate::error::{Notice, QuickDialError, QuickDialResult};
use crate::render::{
    DocumentRenderer, PrintPdfRenderer, QrCodeRenderer, QrImage, QrRenderer, RenderedDocument,
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything produced by one successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub phone: CanonicalPhone,
    pub name: ContactName,
    pub payload: QrPayload,
    pub qr: QrImage,
}

/// Holds the most recent artifact, if any.
#[derive(Debug, Clone, Default)]
pub struct GenerationSession {
    current: Option<Artifact>,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// The current artifact, or [`QuickDialError::NoArtifactYet`].
    pub fn current(&self) -> QuickDialResult<&Artifact> {
        self.current.as_ref().ok_or(QuickDialError::NoArtifactYet)
    }

    fn record(&mut self, artifact: Artifact) -> &Artifact {
        self.current.insert(artifact)
    }

    /// Clears the session ("generate new").
    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// How a document reached the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the share facility
    Shared { filename: String },
    /// Written to disk; `fallback` is set when sharing was attempted first
    Saved { path: PathBuf, fallback: bool },
}

impl Delivery {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Shared { .. } => Notice::success("PDF shared successfully!"),
            Self::Saved { fallback: false, .. } => Notice::success("PDF downloaded successfully!"),
            Self::Saved { fallback: true, .. } => Notice::info(
                "Sharing is not available here, the PDF was downloaded instead.",
            ),
        }
    }
}

/// Coordinates validation, composition, rendering and delivery.
pub struct QuickDialService {
    config: QuickDialConfig,
    qr: Box<dyn QrRenderer>,
    documents: Box<dyn DocumentRenderer>,
    analytics: Box<dyn AnalyticsSink>,
}

impl QuickDialService {
    /// Creates a service with explicit collaborators.
    pub fn new(
        config: QuickDialConfig,
        qr: Box<dyn QrRenderer>,
        documents: Box<dyn DocumentRenderer>,
        analytics: Box<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            config,
            qr,
            documents,
            analytics,
        }
    }

    /// Creates a service with the `qrcode`/`printpdf` renderers.
    pub fn with_default_renderers(config: QuickDialConfig) -> Self {
        Self::new(
            config,
            Box::new(QrCodeRenderer::new()),
            Box::new(PrintPdfRenderer::new()),
            Box::new(TracingAnalytics),
        )
    }

    pub fn config(&self) -> &QuickDialConfig {
        &self.config
    }

    /// Validates input, renders the QR code and records the result.
    ///
    /// On any failure the session keeps its previous artifact.
    pub fn generate<'s>(
        &self,
        session: &'s mut GenerationSession,
        raw_phone: &str,
        raw_name: &str,
    ) -> QuickDialResult<&'s Artifact> {
        let phone = validate_phone_number(raw_phone)?;
        let name = ContactName::parse(raw_name)?;
        let payload = build_qr_payload(&phone);

        let qr = self
            .qr
            .render(&payload, self.config.qr_size_px)
            .map_err(|e| {
                warn!(renderer = self.qr.name(), error = %e, "QR rendering failed");
                e
            })?;

        info!(phone = %phone, named = !name.is_empty(), "generated QR code");
        self.analytics
            .track(&AnalyticsEvent::new("QR", "generate", kind_label(&phone)));

        Ok(session.record(Artifact {
            phone,
            name,
            payload,
            qr,
        }))
    }

    /// Builds the page plan for the current artifact.
    pub fn plan(&self, session: &GenerationSession) -> QuickDialResult<DocumentPlan> {
        let artifact = session.current()?;
        Ok(build_document_plan_with(
            &self.config.branding(),
            &artifact.phone,
            &artifact.name,
            &artifact.qr,
        ))
    }

    /// Renders the current artifact to PDF bytes.
    pub fn render_document(&self, session: &GenerationSession) -> QuickDialResult<RenderedDocument> {
        let plan = self.plan(session)?;
        self.documents.render(&plan).map_err(|e| {
            warn!(renderer = self.documents.name(), error = %e, "PDF rendering failed");
            e
        })
    }

    /// Saves the PDF into `dir` (or the configured output directory).
    pub fn download(
        &self,
        session: &GenerationSession,
        dir: Option<&Path>,
    ) -> QuickDialResult<Delivery> {
        let doc = self.render_document(session)?;
        let path = doc.save_to(dir.unwrap_or(self.config.output_dir.as_path()))?;
        self.analytics
            .track(&AnalyticsEvent::new("PDF", "download", doc.filename()));
        Ok(Delivery::Saved {
            path,
            fallback: false,
        })
    }

    /// Shares the PDF, falling back to a direct save when sharing is
    /// unavailable, cancelled or fails.
    pub fn share(
        &self,
        session: &GenerationSession,
        facility: &dyn ShareFacility,
    ) -> QuickDialResult<Delivery> {
        let doc = self.render_document(session)?;
        let request =
            ShareRequest::for_document(&doc, &self.config.share_title, &self.config.share_text);

        let reason = match facility.share(&request) {
            Ok(ShareOutcome::Shared) => {
                self.analytics
                    .track(&AnalyticsEvent::new("PDF", "share", doc.filename()));
                return Ok(Delivery::Shared {
                    filename: doc.filename().to_string(),
                });
            }
            Ok(outcome) => format!("{:?}", outcome),
            Err(e) => e.to_string(),
        };

        warn!(reason = %reason, "share unavailable, saving instead");
        let path = doc.save_to(&self.config.output_dir)?;
        self.analytics
            .track(&AnalyticsEvent::new("PDF", "share_fallback", doc.filename()));
        Ok(Delivery::Saved {
            path,
            fallback: true,
        })
    }

    /// Emails the PDF through `relay`.
    pub fn email(
        &self,
        session: &GenerationSession,
        relay: &dyn MailRelay,
        to: &str,
        message: Option<&str>,
    ) -> QuickDialResult<EmailMessage> {
        if to.trim().is_empty() {
            return Err(QuickDialError::EmptyRecipient);
        }
        let doc = self.render_document(session)?;
        let email = EmailMessage::new(
            to,
            &self.config.email_subject,
            message,
            &self.config.email_body,
            &doc,
        )?;
        relay.send(&email)?;
        self.analytics
            .track(&AnalyticsEvent::new("PDF", "email", doc.filename()));
        Ok(email)
    }

    /// Starts over: the session forgets its artifact.
    pub fn generate_new(&self, session: &mut GenerationSession) {
        session.reset();
        self.analytics
            .track(&AnalyticsEvent::new("QR", "generate_new", ""));
    }
}

fn kind_label(phone: &CanonicalPhone) -> &'static str {
    match phone.kind() {
        PhoneKind::LocalMobile => "local",
        PhoneKind::International => "international",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> QuickDialService {
        QuickDialService::with_default_renderers(QuickDialConfig::default())
    }

    #[test]
    fn test_generate_records_artifact() {
        let service = service();
        let mut session = GenerationSession::new();

        let artifact = service
            .generate(&mut session, "01712345678", "Test User")
            .unwrap();
        assert_eq!(artifact.payload.as_str(), "tel:+8801712345678");
        assert_eq!(artifact.qr.size(), 280);
        assert!(!session.is_empty());
    }

    #[test]
    fn test_failed_generation_keeps_previous_artifact() {
        let service = service();
        let mut session = GenerationSession::new();
        service.generate(&mut session, "01712345678", "").unwrap();

        assert!(service.generate(&mut session, "12345", "").is_err());
        assert_eq!(
            session.current().unwrap().phone.as_str(),
            "+8801712345678"
        );
    }

    #[test]
    fn test_artifact_operations_need_a_session() {
        let service = service();
        let session = GenerationSession::new();
        assert!(matches!(
            service.render_document(&session),
            Err(QuickDialError::NoArtifactYet)
        ));
    }

    #[test]
    fn test_generate_new_resets() {
        let service = service();
        let mut session = GenerationSession::new();
        service.generate(&mut session, "+14155551234", "").unwrap();
        service.generate_new(&mut session);
        assert!(session.is_empty());
    }
}
