//! Error types for the QuickDial library.
//!
//! Every failure a generation request can run into is one variant of
//! [`QuickDialError`]. None of them is fatal to a session: each maps to a
//! short [`Notice`] that a front end shows and then dismisses.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for QuickDial operations.
pub type QuickDialResult<T> = Result<T, QuickDialError>;

/// Comprehensive error type for validation, rendering and delivery.
#[derive(Debug, Error)]
pub enum QuickDialError {
    /// The phone field was empty (or whitespace only)
    #[error("phone number is empty")]
    EmptyInput,

    /// The phone field matched neither the local nor the international shape
    #[error("invalid phone number format: '{input}'")]
    InvalidFormat { input: String },

    /// The contact name exceeds the maximum length
    #[error("name is {length} characters long, maximum is {max}")]
    NameTooLong { length: usize, max: usize },

    /// A download, share or email was requested before anything was generated
    #[error("no QR code has been generated yet")]
    NoArtifactYet,

    /// The QR or document engine failed
    #[error("{stage} rendering failed: {message}")]
    Rendering {
        stage: RenderStage,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The platform share facility is missing or refused the request
    #[error("sharing unavailable: {reason}")]
    ShareUnavailable { reason: String },

    /// An email was requested without a recipient
    #[error("email recipient is empty")]
    EmptyRecipient,

    /// The recipient would break out of its mail header
    #[error("invalid email recipient: {recipient:?}")]
    InvalidRecipient { recipient: String },

    /// Invalid configuration value
    #[error("invalid configuration for '{parameter}': {reason}")]
    InvalidConfig { parameter: String, reason: String },

    /// Error occurred while reading or writing files
    #[error("IO error for path '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which collaborator a [`QuickDialError::Rendering`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Qr,
    Document,
    Mail,
}

impl std::fmt::Display for RenderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Qr => f.write_str("QR code"),
            Self::Document => f.write_str("PDF"),
            Self::Mail => f.write_str("email"),
        }
    }
}

impl QuickDialError {
    /// Builds a rendering error from any engine error.
    pub fn rendering<E>(stage: RenderStage, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Rendering {
            stage,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors produced by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::InvalidFormat { .. } | Self::NameTooLong { .. }
        )
    }

    /// True when the user can retry after dismissing the notice.
    ///
    /// A bad setting is fixed at startup, so retrying the same request
    /// cannot succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }

    /// The user-facing notice for this error.
    pub fn notice(&self) -> Notice {
        match self {
            Self::EmptyInput => Notice::danger("Please enter a phone number"),
            Self::InvalidFormat { .. } => Notice::warning("Please enter a valid phone number"),
            Self::NameTooLong { max, .. } => {
                Notice::warning(format!("Name must be at most {} characters", max))
            }
            Self::NoArtifactYet => Notice::warning("Please generate a QR code first"),
            Self::Rendering {
                stage: RenderStage::Qr,
                ..
            } => Notice::danger("Error generating QR code. Please try again."),
            Self::Rendering {
                stage: RenderStage::Document,
                ..
            }
            | Self::Io { .. } => Notice::danger("Error generating PDF. Please try again."),
            Self::Rendering {
                stage: RenderStage::Mail,
                ..
            } => Notice::danger("Failed to send email. Please check your configuration."),
            Self::ShareUnavailable { .. } => {
                Notice::info("Sharing is not available here, the PDF was downloaded instead.")
            }
            Self::EmptyRecipient => Notice::warning("Please enter an email address"),
            Self::InvalidRecipient { .. } => {
                Notice::warning("Please enter a valid email address")
            }
            Self::InvalidConfig { parameter, reason } => {
                Notice::danger(format!("Invalid setting '{}': {}", parameter, reason))
            }
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoticeLevel {
    /// Icon name the page used for each level.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Info => "info-circle",
            Self::Warning => "exclamation-triangle",
            Self::Danger => "times-circle",
        }
    }
}

/// A transient, auto-dismissing message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Danger, message)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuickDialError::InvalidFormat {
            input: "12345".to_string(),
        };
        assert_eq!(err.to_string(), "invalid phone number format: '12345'");
    }

    #[test]
    fn test_validation_notices() {
        assert_eq!(
            QuickDialError::EmptyInput.notice(),
            Notice::danger("Please enter a phone number")
        );
        assert_eq!(
            QuickDialError::NoArtifactYet.notice().level,
            NoticeLevel::Warning
        );
    }
}
