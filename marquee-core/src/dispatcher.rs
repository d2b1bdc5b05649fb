//! Command dispatcher
//!
//! Owns every piece of mutable device state (payload buffer, transfer
//! cursor, display buffer) and routes setup requests to the matching
//! action. The USB transport calls [`Dispatcher::on_setup`] for each
//! request and [`Dispatcher::on_write_chunk`] for each data packet of a
//! segmented write.
//!
//! ```text
//! DataIn(len) ──► chunks ──► PayloadBuffer
//!                               │
//!              DrawMatrix ◄─────┼─────► ScrollText
//!                  │            │            │
//!                  ▼            ▼            ▼
//!            DisplayBuffer   DataOut    ScrollEngine
//! ```
//!
//! Nothing here reports errors to the host. A request that fails to
//! reach the LED driver still completes; the failure is only counted.
//!
//! On crystal-less parts the dispatcher also owns the oscillator and
//! re-trims it at boot ([`Dispatcher::calibrate`]) and after every bus
//! reset ([`Dispatcher::on_bus_reset`]).

use marquee_hal::oscillator::NoOscillator;
use marquee_hal::{Oscillator, Watchdog};
use marquee_protocol::{glyph_index, Opcode, PayloadBuffer, SetupPacket, TransferCursor};

use crate::calibration::{Calibration, Calibrator};
use crate::config::DeviceConfig;
use crate::display::{DisplayBuffer, Half, VISIBLE_ROWS};
use crate::scroll::{ScrollEngine, ScrollReport};
use crate::traits::{MatrixSink, Ticker};

/// What the transport should do after a setup request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupReply<'a> {
    /// Request handled; acknowledge with no data
    Done,
    /// Send these bytes to the host
    Send(&'a [u8]),
    /// Collect `expected` bytes and pass them to `on_write_chunk`
    ReceiveData {
        /// Clamped length of the segmented write
        expected: usize,
    },
}

/// Device-side protocol state machine
pub struct Dispatcher<S, T, O = NoOscillator> {
    payload: PayloadBuffer,
    cursor: TransferCursor,
    display: DisplayBuffer,
    sink: S,
    ticker: T,
    engine: ScrollEngine,
    oscillator: O,
    calibrator: Option<Calibrator>,
    last_scroll: Option<ScrollReport>,
    last_calibration: Option<Calibration>,
    sink_faults: u16,
}

impl<S: MatrixSink, T: Ticker> Dispatcher<S, T> {
    /// Create a dispatcher for a crystal-clocked board
    ///
    /// There is no oscillator to trim, so calibration never runs whatever
    /// `calibrate_oscillator` says.
    pub fn new(sink: S, ticker: T, config: &DeviceConfig) -> Self {
        let mut dispatcher = Self::with_oscillator(sink, ticker, config, NoOscillator);
        dispatcher.calibrator = None;
        dispatcher
    }
}

impl<S: MatrixSink, T: Ticker, O: Oscillator> Dispatcher<S, T, O> {
    /// Create a dispatcher that owns a trimmable oscillator
    ///
    /// The oscillator is only touched when `calibrate_oscillator` is set.
    pub fn with_oscillator(sink: S, ticker: T, config: &DeviceConfig, oscillator: O) -> Self {
        Self {
            payload: PayloadBuffer::new(),
            cursor: TransferCursor::new(),
            display: DisplayBuffer::new(),
            sink,
            ticker,
            engine: ScrollEngine::new(config.scroll_tick_ms),
            oscillator,
            calibrator: config
                .calibrate_oscillator
                .then(|| Calibrator::new(config.calibration_target())),
            last_calibration: None,
            last_scroll: None,
            sink_faults: 0,
        }
    }

    /// Trim the oscillator if calibration is enabled
    ///
    /// Call at boot before the USB device starts. Returns `None` and
    /// leaves the oscillator alone when calibration is disabled.
    pub fn calibrate<W: Watchdog>(&mut self, mut watchdog: W) -> Option<Calibration> {
        let calibrator = self.calibrator?;
        let result = calibrator.run(&mut self.oscillator, &mut watchdog);
        self.last_calibration = Some(result);
        Some(result)
    }

    /// Handle a USB bus reset by re-trimming the oscillator
    pub fn on_bus_reset<W: Watchdog>(&mut self, watchdog: W) -> Option<Calibration> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Bus reset, calibration {}", self.calibrator.is_some());

        self.calibrate(watchdog)
    }

    /// Blank the matrix at start-up
    pub fn init(&mut self) {
        self.clear_all();
    }

    /// Handle one setup request
    pub fn on_setup(&mut self, packet: &SetupPacket) -> SetupReply<'_> {
        let opcode = packet.opcode();

        #[cfg(feature = "defmt")]
        defmt::debug!("Setup: {} wLength={}", opcode, packet.length);

        match opcode {
            Opcode::DataIn => {
                let expected = self.cursor.begin(packet.length);
                SetupReply::ReceiveData { expected }
            }
            Opcode::DrawMatrix => {
                self.draw_matrix();
                SetupReply::Done
            }
            Opcode::ScrollText => {
                self.scroll_text();
                SetupReply::Done
            }
            Opcode::DataOut => SetupReply::Send(self.payload.as_bytes()),
            Opcode::Other(_) => SetupReply::Done,
        }
    }

    /// Append one data packet of a segmented write
    ///
    /// Returns true once the declared length has been collected.
    pub fn on_write_chunk(&mut self, chunk: &[u8]) -> bool {
        let complete = self.cursor.accept(&mut self.payload, chunk);

        #[cfg(feature = "defmt")]
        if complete {
            defmt::debug!("Write complete: {} bytes", self.cursor.received());
        }

        complete
    }

    /// Zero the whole display buffer and push the blank frame
    pub fn clear_all(&mut self) {
        self.display.clear();
        self.commit();
    }

    /// Render the first 8 payload bytes as a bitmap
    ///
    /// Byte `i` describes column `i`, bit `j` the pixel in row `j`.
    /// Bytes past the last write keep their previous contents.
    fn draw_matrix(&mut self) {
        for i in 0..VISIBLE_ROWS {
            let mut column = self.payload.get(i);
            let x = (VISIBLE_ROWS - 1 - i) as u8;
            for y in 0..VISIBLE_ROWS as u8 {
                if column & 1 != 0 {
                    self.display.set_pixel(x, y);
                } else {
                    self.display.clear_pixel(x, y);
                }
                column >>= 1;
            }
        }
        self.commit();
    }

    /// Show or scroll the text staged in the payload buffer
    fn scroll_text(&mut self) {
        let count = self.cursor.expected();
        // Snapshot so the display can be committed while reading the text
        let staged = self.payload.clone();
        let text = staged.prefix(count);

        match text {
            [] => {}
            [b' '] => {
                self.display.clear();
                self.commit();
            }
            [code] => {
                self.display.load_glyph(glyph_index(*code), Half::Visible);
                self.commit();
            }
            [first, ..] => {
                #[cfg(feature = "defmt")]
                defmt::info!("Scrolling {} characters", count);

                self.display.load_glyph(glyph_index(*first), Half::Visible);
                self.commit();

                let report =
                    self.engine
                        .run(text, &mut self.display, &mut self.sink, &mut self.ticker);
                self.record_faults(report.sink_faults);
                self.last_scroll = Some(report);

                #[cfg(feature = "defmt")]
                defmt::info!("Scroll finished after {} steps", report.steps);
            }
        }
    }

    fn commit(&mut self) {
        if let Err(_e) = self.display.commit(&mut self.sink) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Frame not committed: {}", _e);
            self.record_faults(1);
        }
    }

    fn record_faults(&mut self, faults: u16) {
        self.sink_faults = self.sink_faults.saturating_add(faults);
    }

    /// Display buffer contents
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Payload buffer contents
    pub fn payload(&self) -> &PayloadBuffer {
        &self.payload
    }

    /// Segmented write progress
    pub fn cursor(&self) -> &TransferCursor {
        &self.cursor
    }

    /// Report of the most recent animated scroll
    pub fn last_scroll(&self) -> Option<ScrollReport> {
        self.last_scroll
    }

    /// Result of the most recent oscillator calibration
    pub fn last_calibration(&self) -> Option<Calibration> {
        self.last_calibration
    }

    /// Get access to the oscillator
    pub fn oscillator(&self) -> &O {
        &self.oscillator
    }

    /// Frames the LED driver failed to accept since start-up
    pub fn sink_faults(&self) -> u16 {
        self.sink_faults
    }

    /// Get access to the LED sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get mutable access to the LED sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get mutable access to the ticker
    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}
