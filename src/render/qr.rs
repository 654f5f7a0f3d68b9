//! QR code rendering via the `qrcode` crate.

use crate::compose::QrPayload;
use crate::error::{QuickDialError, QuickDialResult, RenderStage};
use qrcode::{Color, EcLevel, QrCode};
use std::io::Cursor;
use tracing::debug;

/// Modules of light border around the symbol.
pub const QUIET_ZONE: usize = 4;

const DARK: u8 = 0x00;
const LIGHT: u8 = 0xff;

/// Square 8-bit greyscale bitmap of a rendered QR code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrImage {
    size: u32,
    pixels: Vec<u8>,
}

impl QrImage {
    /// An all-light bitmap, useful as a stand-in.
    pub fn blank(size: u32) -> Self {
        Self {
            size,
            pixels: vec![LIGHT; (size as usize) * (size as usize)],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row-major luma values, `0` dark and `255` light.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.size || y >= self.size {
            return false;
        }
        let idx = (y as usize) * (self.size as usize) + x as usize;
        self.pixels.get(idx).is_some_and(|&p| p == DARK)
    }

    /// Encodes the bitmap as PNG for display or download.
    pub fn to_png(&self) -> QuickDialResult<Vec<u8>> {
        let img = image::GrayImage::from_raw(self.size, self.size, self.pixels.clone())
            .ok_or_else(|| QuickDialError::Rendering {
                stage: RenderStage::Qr,
                message: "pixel buffer does not match bitmap size".to_string(),
                source: None,
            })?;

        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| QuickDialError::rendering(RenderStage::Qr, e))?;
        Ok(buf)
    }
}

/// Turns a payload into a bitmap of the requested pixel size.
pub trait QrRenderer: Send + Sync {
    fn render(&self, payload: &QrPayload, size_px: u32) -> QuickDialResult<QrImage>;

    /// Returns a human-readable name for this renderer.
    fn name(&self) -> &str;
}

/// Renderer backed by the `qrcode` crate at error-correction level High.
#[derive(Debug, Clone, Default)]
pub struct QrCodeRenderer;

impl QrCodeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl QrRenderer for QrCodeRenderer {
    fn render(&self, payload: &QrPayload, size_px: u32) -> QuickDialResult<QrImage> {
        let code = QrCode::with_error_correction_level(payload.as_str(), EcLevel::H)
            .map_err(|e| QuickDialError::rendering(RenderStage::Qr, e))?;

        let width = code.width();
        let modules = width + 2 * QUIET_ZONE;
        if (size_px as usize) < modules {
            return Err(QuickDialError::Rendering {
                stage: RenderStage::Qr,
                message: format!(
                    "{}px is too small for a {}-module symbol",
                    size_px, modules
                ),
                source: None,
            });
        }

        let colors = code.to_colors();
        let size = size_px as usize;
        let mut pixels = Vec::with_capacity(size * size);

        for py in 0..size {
            let my = py * modules / size;
            for px in 0..size {
                let mx = px * modules / size;
                let inside = (QUIET_ZONE..QUIET_ZONE + width).contains(&mx)
                    && (QUIET_ZONE..QUIET_ZONE + width).contains(&my);
                let dark = inside
                    && colors[(my - QUIET_ZONE) * width + (mx - QUIET_ZONE)] == Color::Dark;
                pixels.push(if dark { DARK } else { LIGHT });
            }
        }

        debug!(payload = %payload, modules = width, size_px, "rendered QR bitmap");
        Ok(QrImage {
            size: size_px,
            pixels,
        })
    }

    fn name(&self) -> &str {
        "qrcode"
    }
}
