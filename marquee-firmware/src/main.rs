//! Marquee - USB LED Matrix Firmware
//!
//! Main firmware binary for an RP2040 driving a MAX7219 8x8 matrix.
//! The host talks to the device purely through vendor control requests
//! on the default pipe; see `marquee-protocol` for the wire format.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::watchdog::Watchdog as RpWatchdog;
use embassy_time::{Duration, Timer};
use embassy_usb::{Builder, Config};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use marquee_core::Dispatcher;
use marquee_drivers::Max7219;
use marquee_hal::{NoWatchdog, Watchdog};

mod board;
mod config;
mod usb;

use crate::board::SharedWatchdog;
use crate::config::DEVICE_CONFIG;
use crate::usb::MatrixHandler;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

// V-USB shared vendor-class IDs
const USB_VID: u16 = 0x16c0;
const USB_PID: u16 = 0x05dc;

// Static cells for USB buffers (must live forever)
static CONFIG_DESCRIPTOR: StaticCell<[u8; 64]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 64]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static HANDLER: StaticCell<MatrixHandler> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Marquee firmware starting...");

    let config = DEVICE_CONFIG;
    unwrap!(config.validate());

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // LED driver: DIN=GPIO11, CLK=GPIO10, CS=GPIO13 (idle high)
    let mut display = Max7219::new(
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_13, Level::High),
    );
    if let Err(e) = display.init(&config.driver) {
        warn!("LED driver init failed: {}", e);
    }

    let mut dispatcher = Dispatcher::new(display, board::frame_ticker(), &config);
    dispatcher.init();
    info!("Display cleared");

    // Before USB starts and before the watchdog is armed
    match dispatcher.calibrate(NoWatchdog) {
        Some(result) => info!("Boot calibration: {}", result),
        None => info!("Oscillator calibration disabled"),
    }

    let timeout = Duration::from_millis(u64::from(config.watchdog_timeout_ms));
    board::start_watchdog(RpWatchdog::new(p.WATCHDOG), timeout);
    info!("Watchdog armed: {} ms", config.watchdog_timeout_ms);

    let driver = Driver::new(p.USB, Irqs);

    let mut usb_config = Config::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some("Marquee");
    usb_config.product = Some("8x8 LED Matrix");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0; 64]),
        BOS_DESCRIPTOR.init([0; 64]),
        &mut [], // no msos descriptors
        CONTROL_BUF.init([0; 64]),
    );
    builder.handler(HANDLER.init(MatrixHandler::new(dispatcher)));

    let mut usb = builder.build();
    info!("USB device ready");

    // Foreground liveness: feed well inside the timeout while idle.
    // Scrolls block this loop and feed through the frame ticker instead.
    let feed_interval = Duration::from_millis(u64::from(config.watchdog_timeout_ms / 4));
    let feed = async {
        let mut watchdog = SharedWatchdog;
        loop {
            watchdog.feed();
            Timer::after(feed_interval).await;
        }
    };

    join(usb.run(), feed).await;
}
