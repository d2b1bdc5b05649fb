//! Device configuration
//!
//! Generated at build time from `device.toml` (see `build.rs`).

use marquee_core::config::{DeviceConfig, DriverConfig};

include!(concat!(env!("OUT_DIR"), "/device_config.rs"));
