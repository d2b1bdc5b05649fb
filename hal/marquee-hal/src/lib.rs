//! Marquee Hardware Abstraction Layer
//!
//! This crate defines the chip-level traits the marquee firmware needs
//! beyond what `embedded-hal` already covers. GPIO and delays come from
//! `embedded-hal`; the watchdog and the oscillator trim do not have an
//! ecosystem trait, so they live here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (marquee-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  marquee-core (dispatcher, calibration) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  marquee-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`watchdog::Watchdog`] - Liveness timer that must be fed periodically
//! - [`oscillator::Oscillator`] - Internal oscillator trim + frame length meter

#![no_std]
#![deny(unsafe_code)]

pub mod oscillator;
pub mod watchdog;

pub use oscillator::{NoOscillator, Oscillator};
pub use watchdog::{NoWatchdog, Watchdog};
