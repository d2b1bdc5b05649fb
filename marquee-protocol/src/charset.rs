//! Character encoding for scrolling text
//!
//! The device knows 27 glyphs: `A`..=`Z` at indices 0..=25 and a blank at
//! index 26. A text byte of 32 (space) selects the blank; every other byte
//! is treated as a letter by subtracting `'A'`.
//!
//! Bytes outside `A..=Z` and space are not rejected on the device. The
//! subtraction wraps and the result is reduced modulo [`GLYPH_COUNT`], so
//! any byte lands on some glyph and table lookups stay in bounds. Host
//! tools should use [`crate::encode_text`], which refuses such bytes.

/// Number of glyphs in the table
pub const GLYPH_COUNT: u8 = 27;

/// Index of the blank glyph
pub const BLANK_GLYPH: u8 = 26;

/// Map a text byte to a glyph index in `0..GLYPH_COUNT`
pub fn glyph_index(code: u8) -> u8 {
    if code == b' ' {
        BLANK_GLYPH
    } else {
        code.wrapping_sub(b'A') % GLYPH_COUNT
    }
}

/// True for bytes that have a dedicated glyph
pub fn is_displayable(code: u8) -> bool {
    code == b' ' || code.is_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_map_in_order() {
        assert_eq!(glyph_index(b'A'), 0);
        assert_eq!(glyph_index(b'M'), 12);
        assert_eq!(glyph_index(b'Z'), 25);
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(glyph_index(b' '), BLANK_GLYPH);
    }

    #[test]
    fn test_out_of_range_bytes_stay_in_table() {
        for code in 0..=u8::MAX {
            assert!(glyph_index(code) < GLYPH_COUNT);
        }
        // '[' is one past 'Z': 26 % 27 == 26, the blank glyph
        assert_eq!(glyph_index(b'['), BLANK_GLYPH);
        // '@' is one before 'A': 255 % 27 == 12
        assert_eq!(glyph_index(b'@'), 12);
    }

    #[test]
    fn test_displayable() {
        assert!(is_displayable(b'Q'));
        assert!(is_displayable(b' '));
        assert!(!is_displayable(b'q'));
        assert!(!is_displayable(b'0'));
    }
}
