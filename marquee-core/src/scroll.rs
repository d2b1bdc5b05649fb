//! Scroll engine
//!
//! Animates text across the matrix one column per frame. Each character
//! is 8 columns wide, so `N` characters take `8 * N` frames. At the first
//! column of every character the following character is staged into the
//! lookahead rows; once the text is exhausted nothing is staged and the
//! shifts pull zeroes in, so the last character scrolls off to a blank
//! matrix.
//!
//! Per frame:
//!
//! ```text
//! stage next glyph (every 8th frame) → commit → tick → shift
//! ```

use marquee_protocol::glyph_index;

use crate::display::{DisplayBuffer, Half};
use crate::glyph::GLYPH_HEIGHT;
use crate::traits::{MatrixSink, Ticker};

/// Columns per character
pub const COLUMNS_PER_CHAR: usize = GLYPH_HEIGHT;

/// Summary of a finished scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollReport {
    /// Characters in the text
    pub characters: usize,
    /// Shift steps executed
    pub steps: usize,
    /// Frames the sink failed to accept
    pub sink_faults: u16,
}

/// Step-by-step scroll state
///
/// The caller loads the first character into the visible rows before the
/// first step; [`ScrollEngine::run`] does this for you.
#[derive(Debug, Clone)]
pub struct Scroll<'a> {
    text: &'a [u8],
    step: usize,
}

impl<'a> Scroll<'a> {
    /// Prepare a scroll over `text`
    pub fn new(text: &'a [u8]) -> Self {
        Self { text, step: 0 }
    }

    /// Frames this scroll takes
    pub fn total_steps(&self) -> usize {
        self.text.len() * COLUMNS_PER_CHAR
    }

    /// Steps already taken
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    /// True once every column has been shifted out
    pub fn is_finished(&self) -> bool {
        self.step >= self.total_steps()
    }

    /// Stage the next character if this frame starts a new one
    ///
    /// Returns true when a glyph was staged.
    pub fn prepare(&self, display: &mut DisplayBuffer) -> bool {
        if self.step % COLUMNS_PER_CHAR != 0 {
            return false;
        }
        match self.text.get(self.step / COLUMNS_PER_CHAR + 1) {
            Some(&code) => {
                display.load_glyph(glyph_index(code), Half::Lookahead);
                true
            }
            None => false,
        }
    }

    /// Shift one column and advance the step counter
    pub fn advance(&mut self, display: &mut DisplayBuffer) {
        display.shift();
        self.step += 1;
    }
}

/// Blocking scroll driver with a fixed frame period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollEngine {
    period_ms: u32,
}

impl ScrollEngine {
    /// Create an engine that paces frames `period_ms` apart
    pub const fn new(period_ms: u32) -> Self {
        Self { period_ms }
    }

    /// Frame period in milliseconds
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Run a complete scroll of `text`
    ///
    /// Assumes the first character is already in the visible rows. Always
    /// runs to completion; sink failures are counted, not propagated.
    pub fn run<S, T>(
        &self,
        text: &[u8],
        display: &mut DisplayBuffer,
        sink: &mut S,
        ticker: &mut T,
    ) -> ScrollReport
    where
        S: MatrixSink,
        T: Ticker,
    {
        let mut scroll = Scroll::new(text);
        let mut sink_faults = 0u16;

        while !scroll.is_finished() {
            scroll.prepare(display);
            if display.commit(sink).is_err() {
                sink_faults = sink_faults.saturating_add(1);
            }
            ticker.tick(self.period_ms);
            scroll.advance(display);
        }

        ScrollReport {
            characters: text.len(),
            steps: scroll.steps_taken(),
            sink_faults,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GLYPHS;
    use crate::traits::SinkError;

    struct CountingSink {
        rows_written: usize,
        frame: [u8; 8],
    }

    impl MatrixSink for CountingSink {
        fn write_row(&mut self, row: u8, pattern: u8) -> Result<(), SinkError> {
            self.frame[usize::from(row - 1)] = pattern;
            self.rows_written += 1;
            Ok(())
        }
    }

    struct CountingTicker {
        ticks: usize,
        elapsed_ms: u32,
    }

    impl Ticker for CountingTicker {
        fn tick(&mut self, period_ms: u32) {
            self.ticks += 1;
            self.elapsed_ms += period_ms;
        }
    }

    fn fixtures() -> (DisplayBuffer, CountingSink, CountingTicker) {
        (
            DisplayBuffer::new(),
            CountingSink {
                rows_written: 0,
                frame: [0; 8],
            },
            CountingTicker {
                ticks: 0,
                elapsed_ms: 0,
            },
        )
    }

    #[test]
    fn test_prepare_stages_on_char_boundaries() {
        let mut display = DisplayBuffer::new();
        let mut scroll = Scroll::new(b"ABC");

        assert!(scroll.prepare(&mut display));
        assert_eq!(display.lookahead(), &GLYPHS[1]);

        scroll.advance(&mut display);
        assert!(!scroll.prepare(&mut display));
    }

    #[test]
    fn test_last_char_stages_nothing() {
        let mut display = DisplayBuffer::new();
        let mut scroll = Scroll::new(b"AB");
        for _ in 0..COLUMNS_PER_CHAR {
            scroll.prepare(&mut display);
            scroll.advance(&mut display);
        }

        // Second (last) character: nothing left to stage
        assert!(!scroll.prepare(&mut display));
    }

    #[test]
    fn test_run_takes_eight_steps_per_char() {
        let (mut display, mut sink, mut ticker) = fixtures();
        display.load_glyph(glyph_index(b'H'), Half::Visible);

        let report = ScrollEngine::new(70).run(b"HI", &mut display, &mut sink, &mut ticker);

        assert_eq!(report.steps, 16);
        assert_eq!(report.characters, 2);
        assert_eq!(ticker.ticks, 16);
        assert_eq!(ticker.elapsed_ms, 16 * 70);
        assert_eq!(sink.rows_written, 16 * 8);
    }

    #[test]
    fn test_run_ends_blank() {
        let (mut display, mut sink, mut ticker) = fixtures();
        display.load_glyph(glyph_index(b'O'), Half::Visible);

        ScrollEngine::new(1).run(b"OK", &mut display, &mut sink, &mut ticker);

        assert!(display.rows().iter().all(|&row| row == 0));
    }

    #[test]
    fn test_second_char_fully_visible_after_eight_steps() {
        let (mut display, mut sink, mut ticker) = fixtures();
        display.load_glyph(glyph_index(b'N'), Half::Visible);
        let engine = ScrollEngine::new(1);

        let mut scroll = Scroll::new(b"NO");
        for _ in 0..COLUMNS_PER_CHAR {
            scroll.prepare(&mut display);
            display.commit(&mut sink).unwrap();
            ticker.tick(engine.period_ms());
            scroll.advance(&mut display);
        }

        assert_eq!(display.visible(), &GLYPHS[usize::from(glyph_index(b'O'))]);
    }

    #[test]
    fn test_first_frame_shows_first_char() {
        let (mut display, mut sink, mut ticker) = fixtures();
        display.load_glyph(glyph_index(b'A'), Half::Visible);

        // One character means 8 frames; the sink keeps the last one
        let mut scroll = Scroll::new(b"A");
        scroll.prepare(&mut display);
        display.commit(&mut sink).unwrap();
        ticker.tick(1);

        assert_eq!(&sink.frame, &GLYPHS[0]);
        assert!(!scroll.is_finished());
    }
}
