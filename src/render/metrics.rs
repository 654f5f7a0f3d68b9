//! Glyph advance widths for the built-in Helvetica faces.
//!
//! Values are the standard AFM widths (1/1000 em) for printable ASCII.
//! The oblique face shares the regular widths.

use crate::compose::FontStyle;

const PT_TO_MM: f32 = 25.4 / 72.0;
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(style: FontStyle, c: char) -> u16 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD,
        FontStyle::Regular | FontStyle::Italic => &HELVETICA,
    };
    match c as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width_mm(text: &str, style: FontStyle, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(style, c))).sum();
    units as f32 / 1000.0 * size * PT_TO_MM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width_mm("QuickDial", FontStyle::Regular, 10.0);
        let large = text_width_mm("QuickDial", FontStyle::Regular, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width_mm("Phone: +8801712345678", FontStyle::Regular, 12.0);
        let bold = text_width_mm("Phone: +8801712345678", FontStyle::Bold, 12.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_known_width() {
        // "0" is 556 units: 0.556 * 72pt = 40.032pt = 14.1224mm
        let width = text_width_mm("0", FontStyle::Regular, 72.0);
        assert!((width - 14.1224).abs() < 1e-3);
    }
}
