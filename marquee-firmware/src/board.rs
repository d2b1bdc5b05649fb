//! Board wiring
//!
//! MAX7219 on GPIO10 (CLK), GPIO11 (DIN) and GPIO13 (CS), plus the
//! hardware watchdog shared between the USB handler and the main loop.

use core::cell::RefCell;

use embassy_rp::gpio::Output;
use embassy_rp::watchdog::Watchdog as RpWatchdog;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Delay, Duration};
use marquee_core::traits::WatchdogTicker;
use marquee_drivers::Max7219;
use marquee_hal::Watchdog;

/// LED driver on three push-pull outputs
pub type Display = Max7219<Output<'static>, Output<'static>, Output<'static>>;

/// Blocking frame pacing that keeps the watchdog fed
pub type FrameTicker = WatchdogTicker<Delay, SharedWatchdog>;

/// Hardware watchdog, `None` until started
static WATCHDOG: Mutex<CriticalSectionRawMutex, RefCell<Option<RpWatchdog>>> =
    Mutex::new(RefCell::new(None));

/// Arm the hardware watchdog and hand it to the shared slot
pub fn start_watchdog(mut watchdog: RpWatchdog, timeout: Duration) {
    watchdog.start(timeout);
    WATCHDOG.lock(|cell| {
        cell.replace(Some(watchdog));
    });
}

/// Handle to the shared hardware watchdog
///
/// Feeding before [`start_watchdog`] is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedWatchdog;

impl Watchdog for SharedWatchdog {
    fn feed(&mut self) {
        WATCHDOG.lock(|cell| {
            if let Some(watchdog) = cell.borrow_mut().as_mut() {
                watchdog.feed();
            }
        });
    }
}

/// Frame ticker backed by `embassy_time`'s blocking delay
pub fn frame_ticker() -> FrameTicker {
    WatchdogTicker::new(Delay, SharedWatchdog)
}
