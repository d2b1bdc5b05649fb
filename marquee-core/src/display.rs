//! Display buffer
//!
//! Sixteen row bytes: rows 0..8 are the frame currently shown, rows 8..16
//! hold the next glyph during a scroll. Shifting the whole buffer by one
//! row slides one column of the lookahead glyph into view, because the
//! matrix is mounted rotated (see [`crate::glyph`]).
//!
//! Pixel addressing mirrors the column index: pixel `x` lives in bit
//! `7 - (x mod 8)` of row `y mod 8`. Out-of-range coordinates wrap.

use crate::glyph::{glyph, GLYPH_HEIGHT};
use crate::traits::{MatrixSink, SinkError, FIRST_ROW};

/// Rows sent to the driver
pub const VISIBLE_ROWS: usize = 8;

/// Visible rows plus the lookahead glyph
pub const BUFFER_ROWS: usize = VISIBLE_ROWS + GLYPH_HEIGHT;

/// Which half of the buffer a glyph is copied into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    /// Rows 0..8, shown on the next commit
    Visible,
    /// Rows 8..16, revealed by shifting
    Lookahead,
}

impl Half {
    fn offset(self) -> usize {
        match self {
            Half::Visible => 0,
            Half::Lookahead => VISIBLE_ROWS,
        }
    }
}

/// Physical location of a logical pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelAddress {
    /// Buffer row (0..8)
    pub row: usize,
    /// Bit position inside the row byte (0..8)
    pub bit: u8,
}

impl PixelAddress {
    /// Resolve logical `(x, y)` to a buffer row and bit
    pub fn new(x: u8, y: u8) -> Self {
        Self {
            row: usize::from(y & 0b0111),
            bit: mirror_column(x),
        }
    }

    fn mask(self) -> u8 {
        1 << self.bit
    }
}

/// Logical column to bit position: column 0 is the most significant bit
pub fn mirror_column(x: u8) -> u8 {
    7 - (x & 0b0111)
}

/// Frame store plus one staged glyph
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    rows: [u8; BUFFER_ROWS],
}

impl DisplayBuffer {
    /// Create an all-dark buffer
    pub const fn new() -> Self {
        Self {
            rows: [0; BUFFER_ROWS],
        }
    }

    /// Light the pixel at `(x, y)`
    pub fn set_pixel(&mut self, x: u8, y: u8) {
        let addr = PixelAddress::new(x, y);
        self.rows[addr.row] |= addr.mask();
    }

    /// Darken the pixel at `(x, y)`
    pub fn clear_pixel(&mut self, x: u8, y: u8) {
        let addr = PixelAddress::new(x, y);
        self.rows[addr.row] &= !addr.mask();
    }

    /// Read the pixel at `(x, y)`
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        let addr = PixelAddress::new(x, y);
        self.rows[addr.row] & addr.mask() != 0
    }

    /// Copy a glyph bitmap into one half of the buffer
    pub fn load_glyph(&mut self, index: u8, half: Half) {
        let start = half.offset();
        self.rows[start..start + GLYPH_HEIGHT].copy_from_slice(glyph(index));
    }

    /// Slide every row down by one and zero the last
    ///
    /// On the rotated matrix this moves the picture one column left.
    pub fn shift(&mut self) {
        self.rows.copy_within(1.., 0);
        self.rows[BUFFER_ROWS - 1] = 0;
    }

    /// Zero all 16 rows
    pub fn clear(&mut self) {
        self.rows = [0; BUFFER_ROWS];
    }

    /// Rows currently shown
    pub fn visible(&self) -> &[u8] {
        &self.rows[..VISIBLE_ROWS]
    }

    /// Staged glyph rows
    pub fn lookahead(&self) -> &[u8] {
        &self.rows[VISIBLE_ROWS..]
    }

    /// All 16 rows
    pub fn rows(&self) -> &[u8; BUFFER_ROWS] {
        &self.rows
    }

    /// Push the visible rows to the driver, row address 1 first
    pub fn commit<S: MatrixSink>(&self, sink: &mut S) -> Result<(), SinkError> {
        for (address, &pattern) in (FIRST_ROW..).zip(self.visible()) {
            sink.write_row(address, pattern)?;
        }
        Ok(())
    }
}
