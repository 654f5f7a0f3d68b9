//! Configuration for a QuickDial front end.
//!
//! All tunables live in [`QuickDialConfig`], built via
//! [`QuickDialConfig::builder()`] so callers set only what they care about.

use crate::compose::{Branding, DEFAULT_SITE};
use crate::error::{QuickDialError, QuickDialResult};
use std::path::PathBuf;
use std::time::Duration;

/// On-screen QR size the page used.
pub const DEFAULT_QR_SIZE_PX: u32 = 280;

/// Accepted range for [`QuickDialConfig::qr_size_px`].
pub const QR_SIZE_RANGE: std::ops::RangeInclusive<u32> = 64..=2048;

pub const DEFAULT_SHARE_TITLE: &str = "QuickDial QR Code";
pub const DEFAULT_SHARE_TEXT: &str =
    "Print this QR code and place it on your car windshield for easy parking contact.";
pub const DEFAULT_EMAIL_SUBJECT: &str = "Your QuickDial QR Code";
pub const DEFAULT_EMAIL_BODY: &str = "Your QuickDial QR code is attached. Print and place on your car windshield for easy parking contact.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickDialConfig {
    /// Edge length of the rendered QR bitmap in pixels. Default: 280.
    pub qr_size_px: u32,

    /// Site printed on the sheet. Default: `quickdial.github.io`.
    pub site: String,

    /// Directory downloads are saved into. Default: current directory.
    pub output_dir: PathBuf,

    /// Pause before rendering so a "generating" indicator is visible.
    ///
    /// Purely cosmetic; generation itself never waits. Default: zero.
    pub indicator_delay: Duration,

    pub share_title: String,
    pub share_text: String,
    pub email_subject: String,
    pub email_body: String,
}

impl Default for QuickDialConfig {
    fn default() -> Self {
        Self {
            qr_size_px: DEFAULT_QR_SIZE_PX,
            site: DEFAULT_SITE.to_string(),
            output_dir: PathBuf::from("."),
            indicator_delay: Duration::ZERO,
            share_title: DEFAULT_SHARE_TITLE.to_string(),
            share_text: DEFAULT_SHARE_TEXT.to_string(),
            email_subject: DEFAULT_EMAIL_SUBJECT.to_string(),
            email_body: DEFAULT_EMAIL_BODY.to_string(),
        }
    }
}

impl QuickDialConfig {
    pub fn builder() -> QuickDialConfigBuilder {
        QuickDialConfigBuilder::default()
    }

    pub fn branding(&self) -> Branding {
        Branding {
            site: self.site.clone(),
        }
    }
}

/// Builder for [`QuickDialConfig`].
#[derive(Debug, Clone, Default)]
pub struct QuickDialConfigBuilder {
    config: QuickDialConfig,
}

impl QuickDialConfigBuilder {
    pub fn qr_size_px(mut self, size: u32) -> Self {
        self.config.qr_size_px = size;
        self
    }

    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.config.site = site.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn indicator_delay(mut self, delay: Duration) -> Self {
        self.config.indicator_delay = delay;
        self
    }

    pub fn share_title(mut self, title: impl Into<String>) -> Self {
        self.config.share_title = title.into();
        self
    }

    pub fn share_text(mut self, text: impl Into<String>) -> Self {
        self.config.share_text = text.into();
        self
    }

    pub fn email_subject(mut self, subject: impl Into<String>) -> Self {
        self.config.email_subject = subject.into();
        self
    }

    pub fn email_body(mut self, body: impl Into<String>) -> Self {
        self.config.email_body = body.into();
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> QuickDialResult<QuickDialConfig> {
        let config = self.config;

        if !QR_SIZE_RANGE.contains(&config.qr_size_px) {
            return Err(QuickDialError::InvalidConfig {
                parameter: "qr_size_px".to_string(),
                reason: format!(
                    "{} is outside {}..={}",
                    config.qr_size_px,
                    QR_SIZE_RANGE.start(),
                    QR_SIZE_RANGE.end()
                ),
            });
        }

        if config.site.trim().is_empty() {
            return Err(QuickDialError::InvalidConfig {
                parameter: "site".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(config)
    }
}
