//! Side-effecting collaborators invoked after a document exists.
//!
//! - [`ShareFacility`]: hand the PDF to a platform share target
//! - [`MailRelay`]: send the PDF as an email attachment
//! - [`AnalyticsSink`]: fire-and-forget usage events

use crate::error::{QuickDialError, QuickDialResult, RenderStage};
use crate::render::RenderedDocument;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything a share target needs.
#[derive(Debug, Clone)]
pub struct ShareRequest<'a> {
    pub filename: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
    pub title: &'a str,
    pub text: &'a str,
}

impl<'a> ShareRequest<'a> {
    pub fn for_document(doc: &'a RenderedDocument, title: &'a str, text: &'a str) -> Self {
        Self {
            filename: doc.filename(),
            mime: doc.mime_type(),
            bytes: doc.bytes(),
            title,
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Unsupported,
    Cancelled,
}

/// A platform sharing facility.
///
/// Returning anything but [`ShareOutcome::Shared`] (or an error) makes the
/// caller fall back to saving the file directly.
pub trait ShareFacility {
    fn share(&self, request: &ShareRequest<'_>) -> QuickDialResult<ShareOutcome>;
}

/// Share facility for environments that have none.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedShare;

impl ShareFacility for UnsupportedShare {
    fn share(&self, _request: &ShareRequest<'_>) -> QuickDialResult<ShareOutcome> {
        Ok(ShareOutcome::Unsupported)
    }
}

#[derive(Serialize)]
struct ShareDescriptor<'a> {
    filename: &'a str,
    mime: &'a str,
    title: &'a str,
    text: &'a str,
    size: usize,
}

/// Drops the file plus a JSON descriptor into a spool directory that a
/// share daemon (or a synced folder) picks up.
#[derive(Debug, Clone)]
pub struct SpoolShare {
    dir: PathBuf,
}

impl SpoolShare {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ShareFacility for SpoolShare {
    fn share(&self, request: &ShareRequest<'_>) -> QuickDialResult<ShareOutcome> {
        if !self.dir.is_dir() {
            debug!(dir = %self.dir.display(), "share spool missing");
            return Ok(ShareOutcome::Unsupported);
        }

        let unavailable = |e: std::io::Error| QuickDialError::ShareUnavailable {
            reason: e.to_string(),
        };

        let descriptor = ShareDescriptor {
            filename: request.filename,
            mime: request.mime,
            title: request.title,
            text: request.text,
            size: request.bytes.len(),
        };
        let json = serde_json::to_vec_pretty(&descriptor).map_err(|e| {
            QuickDialError::ShareUnavailable {
                reason: e.to_string(),
            }
        })?;

        fs::write(self.dir.join(request.filename), request.bytes).map_err(unavailable)?;
        fs::write(
            self.dir.join(format!("{}.json", request.filename)),
            json,
        )
        .map_err(unavailable)?;

        info!(dir = %self.dir.display(), filename = request.filename, "shared via spool");
        Ok(ShareOutcome::Shared)
    }
}

/// An email carrying the PDF as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    /// Base64-encoded attachment bytes
    pub attachment_data: String,
}

impl EmailMessage {
    /// Builds the message; an empty custom message falls back to `default_body`.
    pub fn new(
        to: &str,
        subject: &str,
        message: Option<&str>,
        default_body: &str,
        doc: &RenderedDocument,
    ) -> QuickDialResult<Self> {
        let to = to.trim();
        if to.is_empty() {
            return Err(QuickDialError::EmptyRecipient);
        }
        if to.contains(['\r', '\n']) {
            return Err(QuickDialError::InvalidRecipient {
                recipient: to.to_string(),
            });
        }

        let body = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(default_body);

        Ok(Self {
            to: to.to_string(),
            subject: single_line(subject),
            body: body.to_string(),
            attachment_name: doc.filename().to_string(),
            attachment_data: doc.to_base64(),
        })
    }

    /// Renders the message as a MIME document.
    pub fn to_mime(&self) -> String {
        const BOUNDARY: &str = "quickdial-attachment-boundary";

        let mut out = String::new();
        out.push_str(&format!("To: {}\r\n", self.to));
        out.push_str(&format!("Subject: {}\r\n", self.subject));
        out.push_str("MIME-Version: 1.0\r\n");
        out.push_str(&format!(
            "Content-Type: multipart/mixed; boundary=\"{}\"\r\n\r\n",
            BOUNDARY
        ));

        out.push_str(&format!("--{}\r\n", BOUNDARY));
        out.push_str("Content-Type: text/plain; charset=utf-8\r\n\r\n");
        out.push_str(&self.body);
        out.push_str("\r\n");

        out.push_str(&format!("--{}\r\n", BOUNDARY));
        out.push_str(&format!(
            "Content-Type: application/pdf; name=\"{}\"\r\n",
            self.attachment_name
        ));
        out.push_str("Content-Transfer-Encoding: base64\r\n");
        out.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
            self.attachment_name
        ));
        for chunk in self.attachment_data.as_bytes().chunks(76) {
            out.push_str(&String::from_utf8_lossy(chunk));
            out.push_str("\r\n");
        }
        out.push_str(&format!("--{}--\r\n", BOUNDARY));
        out
    }
}

/// Folds line breaks into spaces so a value stays inside one header.
fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transport for [`EmailMessage`]s.
pub trait MailRelay {
    fn send(&self, message: &EmailMessage) -> QuickDialResult<()>;
}

/// Writes each message as an `.eml` file into an outbox directory.
#[derive(Debug, Clone)]
pub struct OutboxRelay {
    dir: PathBuf,
}

impl OutboxRelay {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, message: &EmailMessage) -> PathBuf {
        let stem = message.attachment_name.trim_end_matches(".pdf");
        let recipient: String = message
            .to
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{}-{}.eml", stem, recipient))
    }
}

impl MailRelay for OutboxRelay {
    fn send(&self, message: &EmailMessage) -> QuickDialResult<()> {
        let failed = |e: std::io::Error| QuickDialError::rendering(RenderStage::Mail, e);

        fs::create_dir_all(&self.dir).map_err(failed)?;
        let path = self.path_for(message);
        fs::write(&path, message.to_mime()).map_err(failed)?;

        info!(to = %message.to, path = %path.display(), "queued email");
        Ok(())
    }
}

/// A usage event keyed by category, action and label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl AnalyticsEvent {
    pub fn new(category: &str, action: &str, label: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            action: action.to_string(),
            label: label.into(),
        }
    }
}

/// Fire-and-forget analytics. Implementations must never fail the caller.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn track(&self, _event: &AnalyticsEvent) {}
}

/// Emits events as `tracing` records under the `quickdial::analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        info!(
            target: "quickdial::analytics",
            category = %event.category,
            action = %event.action,
            label = %event.label,
            "event"
        );
    }
}
