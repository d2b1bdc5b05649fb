//! Device configuration
//!
//! Board-level settings: oscillator frequency for calibration, animation
//! pacing, watchdog budget and the LED driver's start-up registers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::target_frame_length;

/// Highest intensity register value
pub const MAX_INTENSITY: u8 = 0x0F;

/// Highest scan-limit register value (all 8 rows scanned)
pub const MAX_SCAN_LIMIT: u8 = 0x07;

/// Errors that can occur when validating configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Intensity above `MAX_INTENSITY`
    IntensityOutOfRange,
    /// Scan limit above `MAX_SCAN_LIMIT`
    ScanLimitOutOfRange,
    /// One scroll tick would let the watchdog expire
    TickTooSlowForWatchdog,
    /// CPU clock outside 1-200 MHz
    ClockOutOfRange,
}

/// LED driver start-up registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverConfig {
    /// Decode-mode register (0 = raw bit patterns)
    pub decode_mode: u8,
    /// Intensity register (0-15)
    pub intensity: u8,
    /// Scan-limit register (7 = all rows)
    pub scan_limit: u8,
}

impl DriverConfig {
    /// Raw patterns, low brightness, all rows scanned
    pub const DEFAULT: Self = Self {
        decode_mode: 0x00,
        intensity: 0x03,
        scan_limit: MAX_SCAN_LIMIT,
    };
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// CPU clock the oscillator is trimmed towards (Hz)
    pub clock_hz: u32,
    /// Delay between scroll frames (ms)
    pub scroll_tick_ms: u32,
    /// Watchdog timeout (ms)
    pub watchdog_timeout_ms: u32,
    /// Run oscillator calibration at boot and on USB reset
    pub calibrate_oscillator: bool,
    /// LED driver registers
    pub driver: DriverConfig,
}

impl DeviceConfig {
    /// 16.5 MHz RC oscillator, 70 ms scroll ticks, 1 s watchdog
    pub const DEFAULT: Self = Self {
        clock_hz: 16_500_000,
        scroll_tick_ms: 70,
        watchdog_timeout_ms: 1_000,
        calibrate_oscillator: true,
        driver: DriverConfig::DEFAULT,
    };

    /// Check value ranges and timing constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1_000_000..=200_000_000).contains(&self.clock_hz) {
            return Err(ConfigError::ClockOutOfRange);
        }
        if self.driver.intensity > MAX_INTENSITY {
            return Err(ConfigError::IntensityOutOfRange);
        }
        if self.driver.scan_limit > MAX_SCAN_LIMIT {
            return Err(ConfigError::ScanLimitOutOfRange);
        }
        // The watchdog is only fed between frames
        if self.scroll_tick_ms >= self.watchdog_timeout_ms {
            return Err(ConfigError::TickTooSlowForWatchdog);
        }
        Ok(())
    }

    /// Frame length the calibration search aims for
    pub fn calibration_target(&self) -> u16 {
        target_frame_length(self.clock_hz)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DeviceConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_target() {
        // 1499 * 16.5 / 10.5 = 2355.57
        assert_eq!(DeviceConfig::default().calibration_target(), 2356);
    }

    #[test]
    fn test_tick_must_fit_in_watchdog() {
        let config = DeviceConfig {
            scroll_tick_ms: 1_000,
            ..DeviceConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::TickTooSlowForWatchdog));
    }

    #[test]
    fn test_driver_ranges() {
        let mut config = DeviceConfig::DEFAULT;
        config.driver.intensity = 0x10;
        assert_eq!(config.validate(), Err(ConfigError::IntensityOutOfRange));

        config.driver.intensity = 0x0F;
        config.driver.scan_limit = 8;
        assert_eq!(config.validate(), Err(ConfigError::ScanLimitOutOfRange));
    }

    #[test]
    fn test_clock_range() {
        let config = DeviceConfig {
            clock_hz: 0,
            ..DeviceConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ClockOutOfRange));
    }
}
