//! Oscillator calibration
//!
//! Without a crystal the RC oscillator must be trimmed until the host's
//! 1 ms USB frame measures the expected number of ticks. The trim range
//! is split into two regions (0-127 and 128-255) that each get a 6-step
//! binary search; the best trial over both regions wins.
//!
//! The steps run 64, 32, 16, 8, 4, 2 and stop there: there is no final
//! step of 1. Every trial is therefore `base + 64 ± 32 ± ... ± 2`, an even
//! value between `base + 2` and `base + 126`. Odd trims (119, say) and the
//! region bases themselves are never tried, so the result can be one trim
//! unit away from the true optimum.
//!
//! Runs once at boot and again after every USB bus reset.

use marquee_hal::oscillator::Trim;
use marquee_hal::{Oscillator, Watchdog};

/// Starting trim value of each search region
pub const REGION_BASES: [Trim; 2] = [0, 128];

/// First (largest) search step
pub const INITIAL_STEP: Trim = 64;

/// Trials per region: step sizes 64, 32, 16, 8, 4, 2 (no step of 1)
pub const STEPS_PER_REGION: u8 = 6;

/// Trials over a full calibration
pub const TOTAL_TRIALS: u8 = STEPS_PER_REGION * REGION_BASES.len() as u8;

/// Expected USB frame length for a CPU clock
///
/// The transport measures a frame as 1499 ticks at 10.5 MHz; the target
/// scales linearly with the clock and is rounded to nearest.
pub fn target_frame_length(clock_hz: u32) -> u16 {
    let scaled = (1499 * u64::from(clock_hz) + 5_250_000) / 10_500_000;
    scaled.min(u64::from(u16::MAX)) as u16
}

/// Outcome of a calibration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Trim value left in the register
    pub trim: Trim,
    /// Absolute distance of its frame length from the target
    pub deviation: u16,
    /// Trials measured
    pub trials: u8,
}

/// Binary-search trim calibrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibrator {
    target: u16,
}

impl Calibrator {
    /// Create a calibrator for an explicit target frame length
    pub const fn new(target: u16) -> Self {
        Self { target }
    }

    /// Create a calibrator for a CPU clock
    pub fn for_clock(clock_hz: u32) -> Self {
        Self::new(target_frame_length(clock_hz))
    }

    /// Target frame length
    pub fn target(&self) -> u16 {
        self.target
    }

    /// Search both regions and commit the best trim
    ///
    /// The watchdog is fed after every measurement.
    pub fn run<O, W>(&self, osc: &mut O, watchdog: &mut W) -> Calibration
    where
        O: Oscillator,
        W: Watchdog,
    {
        let mut best_trim = osc.trim();
        let mut best_deviation = u32::MAX;
        let mut trials = 0u8;

        for base in REGION_BASES {
            // Starts below any target so the first move is upwards
            let mut frame_length = 0u16;
            let mut trial = base;
            let mut step = INITIAL_STEP;

            for _ in 0..STEPS_PER_REGION {
                trial = if frame_length < self.target {
                    trial.wrapping_add(step)
                } else {
                    trial.wrapping_sub(step)
                };

                osc.set_trim(trial);
                frame_length = osc.measure_frame_length();
                trials += 1;
                watchdog.feed();

                let deviation = u32::from(frame_length.abs_diff(self.target));
                if deviation < best_deviation {
                    best_trim = trial;
                    best_deviation = deviation;
                }

                step >>= 1;
            }
        }

        osc.set_trim(best_trim);

        let result = Calibration {
            trim: best_trim,
            deviation: best_deviation.min(u32::from(u16::MAX)) as u16,
            trials,
        };

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Oscillator calibrated: trim={} deviation={} target={}",
            result.trim,
            result.deviation,
            self.target
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_hal::watchdog::NoWatchdog;

    /// Oscillator whose frame length grows linearly with the trim
    struct LinearOscillator {
        trim: Trim,
        history: [Trim; 16],
        measured: usize,
    }

    impl LinearOscillator {
        fn new(start: Trim) -> Self {
            Self {
                trim: start,
                history: [0; 16],
                measured: 0,
            }
        }

        fn frame_at(trim: Trim) -> u16 {
            2000 + u16::from(trim) * 3
        }
    }

    impl Oscillator for LinearOscillator {
        fn set_trim(&mut self, trim: Trim) {
            self.trim = trim;
        }

        fn trim(&self) -> Trim {
            self.trim
        }

        fn measure_frame_length(&mut self) -> u16 {
            self.history[self.measured] = self.trim;
            self.measured += 1;
            Self::frame_at(self.trim)
        }
    }

    struct CountingWatchdog {
        feeds: u32,
    }

    impl Watchdog for CountingWatchdog {
        fn feed(&mut self) {
            self.feeds += 1;
        }
    }

    #[test]
    fn test_target_for_default_clock() {
        assert_eq!(target_frame_length(16_500_000), 2356);
        assert_eq!(target_frame_length(12_000_000), 1713);
    }

    #[test]
    fn test_twelve_trials() {
        let mut osc = LinearOscillator::new(0);
        let result = Calibrator::new(2356).run(&mut osc, &mut NoWatchdog);

        assert_eq!(result.trials, TOTAL_TRIALS);
        assert_eq!(osc.measured, 12);
    }

    #[test]
    fn test_first_region_search_path() {
        let mut osc = LinearOscillator::new(0);
        // Trim 118 is exact: 2000 + 118 * 3 = 2354
        Calibrator::new(2354).run(&mut osc, &mut NoWatchdog);

        // +64, +32, +16, +8, then overshoot: -4, +2
        assert_eq!(&osc.history[..6], &[64, 96, 112, 120, 116, 118]);
        // Second region starts at 128 + 64
        assert_eq!(osc.history[6], 192);
    }

    #[test]
    fn test_picks_minimum_deviation() {
        let mut osc = LinearOscillator::new(77);
        let result = Calibrator::new(2354).run(&mut osc, &mut NoWatchdog);

        assert_eq!(result.trim, 118);
        assert_eq!(result.deviation, 0);
        assert_eq!(osc.trim(), 118);
    }

    #[test]
    fn test_odd_trims_unreachable() {
        // Trim 119 is exact: 2000 + 119 * 3 = 2357
        let mut osc = LinearOscillator::new(0);
        let result = Calibrator::new(2357).run(&mut osc, &mut NoWatchdog);

        assert!(osc.history[..osc.measured].iter().all(|t| t % 2 == 0));
        assert!(!osc.history[..osc.measured].contains(&119));
        // Settles on a neighbour one unit off
        assert!(result.trim == 118 || result.trim == 120);
        assert_eq!(result.deviation, 3);
    }

    #[test]
    fn test_feeds_watchdog_per_trial() {
        let mut osc = LinearOscillator::new(0);
        let mut wd = CountingWatchdog { feeds: 0 };
        Calibrator::new(2356).run(&mut osc, &mut wd);

        assert_eq!(wd.feeds, 12);
    }
}
