//! LED driver implementations
//!
//! This crate provides concrete implementations of the sink trait defined
//! in marquee-core:
//!
//! - MAX7219 8x8 matrix driver (bit-banged 3-wire bus)

#![no_std]
#![deny(unsafe_code)]

pub mod max7219;

pub use max7219::Max7219;
