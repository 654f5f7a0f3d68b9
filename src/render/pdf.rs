//! PDF rendering via `printpdf`.
//!
//! [`PrintPdfRenderer`] walks a [`DocumentPlan`] in order and draws each
//! instruction with the built-in Helvetica faces. Plan coordinates are
//! top-left based, PDF user space is bottom-left based, so every `y` is
//! flipped against the page height here.

use super::metrics::text_width_mm;
use super::qr::QrImage;
use crate::compose::{Align, DashedRect, DocumentPlan, DrawOp, FontStyle, ImageSlot, Rgb8, TextRun};
use crate::error::{QuickDialError, QuickDialResult, RenderStage};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use printpdf::image_crate::{DynamicImage, GrayImage};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, LineDashPattern, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Rgb,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// MIME type of every rendered document.
pub const PDF_MIME: &str = "application/pdf";

const MM_TO_PT: f32 = 72.0 / 25.4;

/// Finished PDF bytes plus the name they should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    filename: String,
    bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        PDF_MIME
    }

    /// Writes the document into `dir` under its filename.
    pub fn save_to(&self, dir: &Path) -> QuickDialResult<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| QuickDialError::io(dir, e))?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.bytes).map_err(|e| QuickDialError::io(&path, e))?;
        info!(path = %path.display(), bytes = self.bytes.len(), "saved PDF");
        Ok(path)
    }

    /// Base64 form for attachments and share payloads.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Turns a page plan into PDF bytes.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, plan: &DocumentPlan) -> QuickDialResult<RenderedDocument>;

    /// Returns a human-readable name for this renderer.
    fn name(&self) -> &str;
}

/// Renderer backed by `printpdf`.
#[derive(Debug, Clone, Default)]
pub struct PrintPdfRenderer;

impl PrintPdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> QuickDialResult<Self> {
        let load = |font| {
            doc.add_builtin_font(font)
                .map_err(|e| QuickDialError::rendering(RenderStage::Document, e))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            italic: load(BuiltinFont::HelveticaOblique)?,
        })
    }

    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn color(rgb: Rgb8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
        None,
    ))
}

impl PrintPdfRenderer {
    fn draw_text(&self, layer: &PdfLayerReference, fonts: &Fonts, run: &TextRun, page_height: f32) {
        let width = text_width_mm(&run.text, run.style, run.size);
        let x = match run.align {
            Align::Left => run.x,
            Align::Center => run.x - width / 2.0,
            Align::Right => run.x - width,
        };

        layer.set_fill_color(color(run.color));
        layer.use_text(
            run.text.as_str(),
            run.size,
            Mm(x),
            Mm(page_height - run.y),
            fonts.get(run.style),
        );
    }

    fn draw_dashed_rect(&self, layer: &PdfLayerReference, rect: &DashedRect, page_height: f32) {
        let top = page_height - rect.y;
        let bottom = top - rect.height;
        let right = rect.x + rect.width;

        layer.set_outline_color(color(rect.color));
        layer.set_outline_thickness(rect.line_width * MM_TO_PT);
        layer.set_line_dash_pattern(LineDashPattern {
            dash_1: Some((rect.dash * MM_TO_PT).round() as i64),
            gap_1: Some((rect.gap * MM_TO_PT).round() as i64),
            ..Default::default()
        });

        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(rect.x), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(bottom)), false),
                (Point::new(Mm(right), Mm(top)), false),
                (Point::new(Mm(rect.x), Mm(top)), false),
            ],
            is_closed: true,
        });

        layer.set_line_dash_pattern(LineDashPattern::default());
    }

    fn draw_image(
        &self,
        layer: &PdfLayerReference,
        qr: &QrImage,
        slot: &ImageSlot,
        page_height: f32,
    ) -> QuickDialResult<()> {
        if qr.size() == 0 {
            return Err(QuickDialError::Rendering {
                stage: RenderStage::Document,
                message: "plan carries no QR bitmap".to_string(),
                source: None,
            });
        }

        let gray = GrayImage::from_raw(qr.size(), qr.size(), qr.pixels().to_vec()).ok_or_else(
            || QuickDialError::Rendering {
                stage: RenderStage::Document,
                message: "QR pixel buffer does not match its size".to_string(),
                source: None,
            },
        )?;

        // Pixel density that makes the bitmap exactly `slot.width` wide.
        let dpi = qr.size() as f32 * 25.4 / slot.width;

        Image::from_dynamic_image(&DynamicImage::ImageLuma8(gray)).add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(slot.x)),
                translate_y: Some(Mm(page_height - slot.y - slot.height)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
        Ok(())
    }
}

impl DocumentRenderer for PrintPdfRenderer {
    fn render(&self, plan: &DocumentPlan) -> QuickDialResult<RenderedDocument> {
        let (doc, page, layer) = PdfDocument::new(
            &plan.title,
            Mm(plan.page_width),
            Mm(plan.page_height),
            "Layer 1",
        );
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = Fonts::load(&doc)?;

        for op in &plan.ops {
            match op {
                DrawOp::Text(run) => self.draw_text(&layer, &fonts, run, plan.page_height),
                DrawOp::DashedRect(rect) => self.draw_dashed_rect(&layer, rect, plan.page_height),
                DrawOp::Image(slot) => self.draw_image(&layer, &plan.qr, slot, plan.page_height)?,
            }
        }

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| QuickDialError::rendering(RenderStage::Document, e))?;

        debug!(filename = %plan.filename, ops = plan.ops.len(), bytes = bytes.len(), "rendered PDF");
        Ok(RenderedDocument::new(plan.filename.clone(), bytes))
    }

    fn name(&self) -> &str {
        "printpdf"
    }
}
