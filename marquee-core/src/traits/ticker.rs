//! Cooperative pacing
//!
//! Long operations never sleep directly. They call [`Ticker::tick`]
//! between frames, which lets the firmware decide how to wait and
//! guarantees the watchdog is fed at the same rate frames are drawn.

use embedded_hal::delay::DelayNs;
use marquee_hal::Watchdog;

/// Pacing hook called once per animation frame
pub trait Ticker {
    /// Wait out one frame period and service liveness obligations
    fn tick(&mut self, period_ms: u32);
}

impl<T: Ticker + ?Sized> Ticker for &mut T {
    fn tick(&mut self, period_ms: u32) {
        (**self).tick(period_ms);
    }
}

/// Ticker that blocks on a delay and then feeds a watchdog
pub struct WatchdogTicker<D, W> {
    delay: D,
    watchdog: W,
}

impl<D: DelayNs, W: Watchdog> WatchdogTicker<D, W> {
    /// Pair a delay provider with the watchdog it must keep alive
    pub fn new(delay: D, watchdog: W) -> Self {
        Self { delay, watchdog }
    }

    /// Get access to the watchdog
    pub fn watchdog_mut(&mut self) -> &mut W {
        &mut self.watchdog
    }
}

impl<D: DelayNs, W: Watchdog> Ticker for WatchdogTicker<D, W> {
    fn tick(&mut self, period_ms: u32) {
        self.delay.delay_ms(period_ms);
        self.watchdog.feed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeDelay {
        elapsed_ns: u64,
    }

    impl DelayNs for FakeDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += u64::from(ns);
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
    fn test_tick_delays_then_feeds() {
        let mut ticker = WatchdogTicker::new(
            FakeDelay { elapsed_ns: 0 },
            CountingWatchdog { feeds: 0 },
        );

        ticker.tick(70);
        ticker.tick(70);

        assert_eq!(ticker.delay.elapsed_ns, 140_000_000);
        assert_eq!(ticker.watchdog_mut().feeds, 2);
    }
}
