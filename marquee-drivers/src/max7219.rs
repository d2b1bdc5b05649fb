//! MAX7219 LED matrix driver (bit-banged)
//!
//! The MAX7219 takes 16-bit words on a 3-wire bus:
//!
//! ```text
//! CS  ‾‾\_______________________________/‾‾   latch on rising CS
//! CLK ____/‾\_/‾\_ ... _/‾\_______________    sample DIN on rising CLK
//! DIN     D15 D14  ...  D0                    MSB first
//!         └─ address ─┘└─── data ───┘
//! ```
//!
//! Digit registers 1..=8 hold the eight row patterns; the control
//! registers are written once by [`Max7219::init`].

use embedded_hal::digital::OutputPin;
use marquee_core::config::DriverConfig;
use marquee_core::traits::{MatrixSink, SinkError, FIRST_ROW, LAST_ROW};

/// MAX7219 register addresses
pub mod reg {
    /// First digit (row) register
    pub const DIGIT0: u8 = 0x01;
    /// BCD decode per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// LED brightness (0-15)
    pub const INTENSITY: u8 = 0x0A;
    /// Number of scanned digits minus one
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// 0 = shutdown, 1 = normal operation
    pub const SHUTDOWN: u8 = 0x0C;
    /// 1 = all LEDs on
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// MAX7219 on three GPIO lines
pub struct Max7219<DIN, CLK, CS> {
    din: DIN,
    clk: CLK,
    cs: CS,
}

impl<DIN, CLK, CS> Max7219<DIN, CLK, CS>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
{
    /// Take ownership of the bus pins
    ///
    /// Pins should already be configured as push-pull outputs. Nothing is
    /// written until [`init`](Self::init).
    pub fn new(din: DIN, clk: CLK, cs: CS) -> Self {
        Self { din, clk, cs }
    }

    /// Program the control registers and leave shutdown mode
    pub fn init(&mut self, config: &DriverConfig) -> Result<(), SinkError> {
        self.write_register(reg::DECODE_MODE, config.decode_mode)?;
        self.write_register(reg::INTENSITY, config.intensity)?;
        self.write_register(reg::SCAN_LIMIT, config.scan_limit)?;
        self.write_register(reg::SHUTDOWN, 0x01)?;
        self.write_register(reg::DISPLAY_TEST, 0x00)?;

        #[cfg(feature = "defmt")]
        defmt::info!("MAX7219 initialised, intensity {}", config.intensity);

        Ok(())
    }

    /// Clock one 16-bit word out and latch it
    pub fn write_register(&mut self, address: u8, data: u8) -> Result<(), SinkError> {
        let word = u16::from_be_bytes([address, data]);

        self.cs.set_low().map_err(|_| SinkError::Bus)?;
        for bit in (0..16).rev() {
            if word & (1 << bit) != 0 {
                self.din.set_high().map_err(|_| SinkError::Bus)?;
            } else {
                self.din.set_low().map_err(|_| SinkError::Bus)?;
            }
            self.clk.set_high().map_err(|_| SinkError::Bus)?;
            self.clk.set_low().map_err(|_| SinkError::Bus)?;
        }
        self.cs.set_high().map_err(|_| SinkError::Bus)
    }
}

impl<DIN, CLK, CS> MatrixSink for Max7219<DIN, CLK, CS>
where
    DIN: OutputPin,
    CLK: OutputPin,
    CS: OutputPin,
{
    fn write_row(&mut self, row: u8, pattern: u8) -> Result<(), SinkError> {
        if !(FIRST_ROW..=LAST_ROW).contains(&row) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Row {} out of range", row);
            return Err(SinkError::InvalidRow);
        }
        self.write_register(reg::DIGIT0 + (row - FIRST_ROW), pattern)
    }
}
