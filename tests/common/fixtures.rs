//! Test fixtures and collaborator doubles.

use quickdial::{
    AnalyticsEvent, AnalyticsSink, NoopAnalytics, PrintPdfRenderer, QrCodeRenderer, QrImage,
    QrPayload, QrRenderer, QuickDialConfig, QuickDialError, QuickDialResult, QuickDialService,
    RenderStage, ShareFacility, ShareOutcome, ShareRequest,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Local mobile numbers with every accepted operator digit.
pub const LOCAL_NUMBERS: [&str; 7] = [
    "01312345678",
    "01412345678",
    "01512345678",
    "01612345678",
    "01712345678",
    "01812345678",
    "01912345678",
];

/// A config whose downloads land in `dir`.
pub fn config_in(dir: &Path) -> QuickDialConfig {
    QuickDialConfig::builder()
        .output_dir(dir)
        .qr_size_px(128)
        .build()
        .expect("valid test config")
}

/// Real renderers, silent analytics.
pub fn service_in(dir: &Path) -> QuickDialService {
    QuickDialService::new(
        config_in(dir),
        Box::new(QrCodeRenderer::new()),
        Box::new(PrintPdfRenderer::new()),
        Box::new(NoopAnalytics),
    )
}

/// QR renderer that always fails, as if the engine threw.
#[derive(Debug, Default)]
pub struct FailingQrRenderer;

impl QrRenderer for FailingQrRenderer {
    fn render(&self, _payload: &QrPayload, _size_px: u32) -> QuickDialResult<QrImage> {
        Err(QuickDialError::Rendering {
            stage: RenderStage::Qr,
            message: "engine exploded".to_string(),
            source: None,
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Analytics sink that remembers every event.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingAnalytics {
    pub fn actions(&self) -> Vec<String> {
        self.events
            .lock()
            .expect("analytics lock")
            .iter()
            .map(|e| format!("{}/{}", e.category, e.action))
            .collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        self.events.lock().expect("analytics lock").push(event.clone());
    }
}

/// Share facility with a scripted answer that records what it was given.
#[derive(Debug)]
pub struct ScriptedShare {
    answer: Result<ShareOutcome, String>,
    seen: Mutex<Vec<(String, String, usize)>>,
}

impl ScriptedShare {
    pub fn answering(outcome: ShareOutcome) -> Self {
        Self {
            answer: Ok(outcome),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            answer: Err(reason.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// `(filename, mime, byte count)` per request.
    pub fn seen(&self) -> Vec<(String, String, usize)> {
        self.seen.lock().expect("share lock").clone()
    }
}

impl ShareFacility for ScriptedShare {
    fn share(&self, request: &ShareRequest<'_>) -> QuickDialResult<ShareOutcome> {
        self.seen.lock().expect("share lock").push((
            request.filename.to_string(),
            request.mime.to_string(),
            request.bytes.len(),
        ));
        match &self.answer {
            Ok(outcome) => Ok(*outcome),
            Err(reason) => Err(QuickDialError::ShareUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}
