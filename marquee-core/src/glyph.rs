//! Built-in glyph table
//!
//! The matrix is mounted a quarter turn from the driver's native
//! orientation: each driver row register lights one visual column. A
//! glyph is therefore stored as 8 column bytes, left to right, with bit 0
//! at the top. Letters are 5 columns wide with one blank column in front
//! and two behind, which gives a 3-column gap while scrolling.

use marquee_protocol::GLYPH_COUNT;

/// Bytes per glyph (one per driver row)
pub const GLYPH_HEIGHT: usize = 8;

/// Glyph bitmaps: `A`..=`Z` then blank
#[rustfmt::skip]
pub static GLYPHS: [[u8; GLYPH_HEIGHT]; GLYPH_COUNT as usize] = [
    [0x00, 0x7C, 0x12, 0x11, 0x12, 0x7C, 0x00, 0x00], // A
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x36, 0x00, 0x00], // B
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x22, 0x00, 0x00], // C
    [0x00, 0x7F, 0x41, 0x41, 0x22, 0x1C, 0x00, 0x00], // D
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x41, 0x00, 0x00], // E
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x01, 0x00, 0x00], // F
    [0x00, 0x3E, 0x41, 0x49, 0x49, 0x7A, 0x00, 0x00], // G
    [0x00, 0x7F, 0x08, 0x08, 0x08, 0x7F, 0x00, 0x00], // H
    [0x00, 0x00, 0x41, 0x7F, 0x41, 0x00, 0x00, 0x00], // I
    [0x00, 0x20, 0x40, 0x41, 0x3F, 0x01, 0x00, 0x00], // J
    [0x00, 0x7F, 0x08, 0x14, 0x22, 0x41, 0x00, 0x00], // K
    [0x00, 0x7F, 0x40, 0x40, 0x40, 0x40, 0x00, 0x00], // L
    [0x00, 0x7F, 0x02, 0x0C, 0x02, 0x7F, 0x00, 0x00], // M
    [0x00, 0x7F, 0x04, 0x08, 0x10, 0x7F, 0x00, 0x00], // N
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x3E, 0x00, 0x00], // O
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x06, 0x00, 0x00], // P
    [0x00, 0x3E, 0x41, 0x51, 0x21, 0x5E, 0x00, 0x00], // Q
    [0x00, 0x7F, 0x09, 0x19, 0x29, 0x46, 0x00, 0x00], // R
    [0x00, 0x26, 0x49, 0x49, 0x49, 0x32, 0x00, 0x00], // S
    [0x00, 0x01, 0x01, 0x7F, 0x01, 0x01, 0x00, 0x00], // T
    [0x00, 0x3F, 0x40, 0x40, 0x40, 0x3F, 0x00, 0x00], // U
    [0x00, 0x1F, 0x20, 0x40, 0x20, 0x1F, 0x00, 0x00], // V
    [0x00, 0x3F, 0x40, 0x38, 0x40, 0x3F, 0x00, 0x00], // W
    [0x00, 0x63, 0x14, 0x08, 0x14, 0x63, 0x00, 0x00], // X
    [0x00, 0x03, 0x04, 0x78, 0x04, 0x03, 0x00, 0x00], // Y
    [0x00, 0x61, 0x51, 0x49, 0x45, 0x43, 0x00, 0x00], // Z
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // blank
];

/// Bitmap for a glyph index
///
/// Indices past the end wrap around the table, the same reduction
/// [`marquee_protocol::glyph_index`] applies to text bytes.
pub fn glyph(index: u8) -> &'static [u8; GLYPH_HEIGHT] {
    &GLYPHS[usize::from(index % GLYPH_COUNT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_protocol::{glyph_index, BLANK_GLYPH};

    #[test]
    fn test_blank_is_empty() {
        assert_eq!(glyph(BLANK_GLYPH), &[0u8; GLYPH_HEIGHT]);
    }

    #[test]
    fn test_every_letter_lights_something() {
        for code in b'A'..=b'Z' {
            assert!(glyph(glyph_index(code)).iter().any(|&col| col != 0));
        }
    }

    #[test]
    fn test_letters_leave_spacing_columns() {
        for bitmap in &GLYPHS {
            assert_eq!(bitmap[0], 0);
            assert_eq!(bitmap[6], 0);
            assert_eq!(bitmap[7], 0);
        }
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(glyph(GLYPH_COUNT), glyph(0));
    }
}
