//! Page plan for the printable QuickDial sheet.
//!
//! A [`DocumentPlan`] is an ordered list of drawing instructions on an A4
//! portrait page. Coordinates are millimetres from the top-left corner and
//! text `y` values are baselines. Every position is a fixed literal; only the
//! contact block moves depending on whether a name was given.

use crate::domain::{digits_only, CanonicalPhone, ContactName};
use crate::render::QrImage;
use serde::Serialize;

/// A4 portrait width in mm.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 portrait height in mm.
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Site printed on the sheet when no other is configured.
pub const DEFAULT_SITE: &str = "quickdial.github.io";

const CUT_BOX_X: f32 = 30.0;
const CUT_BOX_Y: f32 = 120.0;
const CUT_BOX_WIDTH: f32 = 150.0;
const CUT_BOX_HEIGHT: f32 = 120.0;
const QR_PRINT_SIZE: f32 = 45.0;

const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
const GREY: Rgb8 = Rgb8::new(100, 100, 100);

const INSTRUCTIONS: [&str; 4] = [
    "1. Cut out the dashed box section below",
    "2. Place or paste it on your car's windshield where it's visible",
    "3. Others can scan the QR code to call you directly",
    "4. No more typing mistakes or unclear handwritten numbers!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Horizontal anchoring of a text run relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Font size in points
    pub size: f32,
    pub style: FontStyle,
    pub color: Rgb8,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Dash and gap length in mm
    pub dash: f32,
    pub gap: f32,
    pub line_width: f32,
    pub color: Rgb8,
}

/// Where the QR bitmap lands; the bitmap itself travels with the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSlot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text(TextRun),
    DashedRect(DashedRect),
    Image(ImageSlot),
}

/// Text that varies between deployments of the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub site: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
        }
    }
}

/// Ordered drawing instructions for one page, consumed once by a renderer.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentPlan {
    pub title: String,
    pub filename: String,
    pub page_width: f32,
    pub page_height: f32,
    pub ops: Vec<DrawOp>,
    #[serde(skip)]
    pub qr: QrImage,
}

impl DocumentPlan {
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }

    pub fn find_text(&self, needle: &str) -> Option<&TextRun> {
        self.texts().find(|run| run.text.contains(needle))
    }

    pub fn image_slot(&self) -> Option<&ImageSlot> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Image(slot) => Some(slot),
            _ => None,
        })
    }
}

/// `QuickDial-<digits>.pdf` for a phone number.
pub fn artifact_filename(phone: &CanonicalPhone) -> String {
    format!("QuickDial-{}.pdf", digits_only(phone.as_str()))
}

/// Builds the page plan with the default branding.
pub fn build_document_plan(
    phone: &CanonicalPhone,
    name: &ContactName,
    qr: &QrImage,
) -> DocumentPlan {
    build_document_plan_with(&Branding::default(), phone, name, qr)
}

/// Builds the page plan for a phone number, optional name and QR bitmap.
pub fn build_document_plan_with(
    branding: &Branding,
    phone: &CanonicalPhone,
    name: &ContactName,
    qr: &QrImage,
) -> DocumentPlan {
    let center = PAGE_WIDTH_MM / 2.0;
    let box_center = CUT_BOX_X + CUT_BOX_WIDTH / 2.0;
    let mut ops = Vec::with_capacity(16);

    ops.push(text(
        "QuickDial - Parking Contact QR Code",
        center,
        30.0,
        24.0,
        FontStyle::Bold,
        BLACK,
        Align::Center,
    ));
    ops.push(text(
        format!("Generated at: {}", branding.site),
        center,
        40.0,
        12.0,
        FontStyle::Regular,
        GREY,
        Align::Center,
    ));

    ops.push(text(
        "Instructions:",
        20.0,
        60.0,
        14.0,
        FontStyle::Bold,
        BLACK,
        Align::Left,
    ));
    for (i, line) in INSTRUCTIONS.iter().enumerate() {
        ops.push(text(
            *line,
            25.0,
            70.0 + 8.0 * i as f32,
            12.0,
            FontStyle::Regular,
            BLACK,
            Align::Left,
        ));
    }

    ops.push(DrawOp::DashedRect(DashedRect {
        x: CUT_BOX_X,
        y: CUT_BOX_Y,
        width: CUT_BOX_WIDTH,
        height: CUT_BOX_HEIGHT,
        dash: 3.0,
        gap: 3.0,
        line_width: 1.0,
        color: BLACK,
    }));

    ops.push(text(
        "Please scan the QR to call.",
        box_center,
        CUT_BOX_Y + 15.0,
        14.0,
        FontStyle::Bold,
        BLACK,
        Align::Center,
    ));

    ops.push(DrawOp::Image(ImageSlot {
        x: CUT_BOX_X + (CUT_BOX_WIDTH - QR_PRINT_SIZE) / 2.0,
        y: CUT_BOX_Y + 25.0,
        width: QR_PRINT_SIZE,
        height: QR_PRINT_SIZE,
    }));

    let branding_y = match name.get() {
        Some(name) => {
            ops.push(text(
                format!("Name: {}", name),
                box_center,
                CUT_BOX_Y + 82.0,
                12.0,
                FontStyle::Bold,
                BLACK,
                Align::Center,
            ));
            ops.push(text(
                format!("Phone: {}", phone),
                box_center,
                CUT_BOX_Y + 88.0,
                12.0,
                FontStyle::Bold,
                BLACK,
                Align::Center,
            ));
            CUT_BOX_Y + 105.0
        }
        None => {
            ops.push(text(
                format!("Phone: {}", phone),
                box_center,
                CUT_BOX_Y + 83.0,
                12.0,
                FontStyle::Bold,
                BLACK,
                Align::Center,
            ));
            CUT_BOX_Y + 100.0
        }
    };

    ops.push(text(
        format!("Generate your code at {}", branding.site),
        box_center,
        branding_y,
        10.0,
        FontStyle::Regular,
        GREY,
        Align::Center,
    ));

    // Right edge sits on the page centre line.
    ops.push(text(
        "Cut along the dashed line above and place on your car windshield",
        center,
        CUT_BOX_Y + CUT_BOX_HEIGHT + 15.0,
        10.0,
        FontStyle::Italic,
        GREY,
        Align::Right,
    ));

    ops.push(text(
        "This QR code makes parking easier in Bangladesh - no more typing phone numbers!",
        center,
        PAGE_HEIGHT_MM - 20.0,
        8.0,
        FontStyle::Regular,
        GREY,
        Align::Center,
    ));

    DocumentPlan {
        title: "QuickDial - Parking Contact QR Code".to_string(),
        filename: artifact_filename(phone),
        page_width: PAGE_WIDTH_MM,
        page_height: PAGE_HEIGHT_MM,
        ops,
        qr: qr.clone(),
    }
}

fn text(
    text: impl Into<String>,
    x: f32,
    y: f32,
    size: f32,
    style: FontStyle,
    color: Rgb8,
    align: Align,
) -> DrawOp {
    DrawOp::Text(TextRun {
        text: text.into(),
        x,
        y,
        size,
        style,
        color,
        align,
    })
}
