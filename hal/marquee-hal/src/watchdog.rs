//! Watchdog abstraction
//!
//! Long-running foreground work (scroll animations, oscillator
//! calibration) must feed the watchdog often enough that the configured
//! timeout never elapses between two feeds.

/// Hardware watchdog timer
pub trait Watchdog {
    /// Reset the watchdog countdown
    fn feed(&mut self);
}

impl<W: Watchdog + ?Sized> Watchdog for &mut W {
    fn feed(&mut self) {
        (**self).feed();
    }
}

/// Watchdog that does nothing
///
/// Used before the real watchdog is started (boot-time calibration)
/// and on boards without one.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoWatchdog;

impl Watchdog for NoWatchdog {
    fn feed(&mut self) {}
}
