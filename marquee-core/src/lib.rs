//! Board-agnostic core logic for the marquee LED matrix
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Glyph table and the 16-row display buffer
//! - Scroll engine (dual-buffer column shifting)
//! - Command dispatcher (setup requests + segmented writes)
//! - Oscillator calibration (binary search over the trim register)
//! - Device configuration
//! - Sink and pacing traits

#![no_std]
#![deny(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod glyph;
pub mod scroll;
pub mod traits;

pub use calibration::{Calibration, Calibrator};
pub use config::{ConfigError, DeviceConfig, DriverConfig};
pub use dispatcher::{Dispatcher, SetupReply};
pub use display::{DisplayBuffer, Half};
pub use scroll::{Scroll, ScrollEngine, ScrollReport};
pub use traits::{MatrixSink, SinkError, Ticker, WatchdogTicker};
