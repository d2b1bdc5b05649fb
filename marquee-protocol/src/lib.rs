//! Marquee USB Control Protocol
//!
//! This crate defines the vendor control protocol between a host PC and
//! the marquee 8x8 LED matrix. Everything travels over the default control
//! pipe; there are no interrupt or bulk endpoints.
//!
//! # Protocol Overview
//!
//! Every command is a standard 8-byte USB setup packet whose `bRequest`
//! byte carries the opcode:
//!
//! ```text
//! ┌───────────────┬──────────┬────────┬────────┬─────────┐
//! │ bmRequestType │ bRequest │ wValue │ wIndex │ wLength │
//! │ 1B            │ 1B       │ 2B LE  │ 2B LE  │ 2B LE   │
//! └───────────────┴──────────┴────────┴────────┴─────────┘
//! ```
//!
//! Text and bitmaps do not fit in a setup packet, so they are staged in a
//! 16-byte payload buffer first (segmented write, opcode 1) and then
//! rendered by a second request (opcode 2 or 3). Opcode 5 reads the buffer
//! back.

#![no_std]
#![deny(unsafe_code)]

pub mod charset;
pub mod host;
pub mod opcode;
pub mod setup;
pub mod transfer;

pub use charset::{glyph_index, BLANK_GLYPH, GLYPH_COUNT};
pub use host::{encode_text, EncodeError, TextPayload, CHUNK_SIZE};
pub use opcode::Opcode;
pub use setup::{SetupError, SetupPacket, SETUP_PACKET_LEN};
pub use transfer::{PayloadBuffer, TransferCursor, PAYLOAD_CAPACITY};
