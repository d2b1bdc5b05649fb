//! Host-side request builders
//!
//! Helpers for tools that drive the device: they build the setup packets
//! for each command, split payloads into control-transfer chunks and
//! check text before it is sent.
//!
//! A typical scroll takes two requests:
//!
//! ```text
//! DataIn(len) + chunks  →  payload buffer filled
//! ScrollText            →  animation runs on the device
//! ```

use heapless::Vec;

use crate::charset::is_displayable;
use crate::opcode::Opcode;
use crate::setup::{SetupPacket, VENDOR_IN, VENDOR_OUT};
use crate::transfer::PAYLOAD_CAPACITY;

/// Data packet size of a low-speed control endpoint
pub const CHUNK_SIZE: usize = 8;

/// Encoded text ready to be written into the payload buffer
pub type TextPayload = Vec<u8, PAYLOAD_CAPACITY>;

/// Errors that can occur while preparing a host request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// More bytes than the payload buffer holds
    TooLong,
    /// Character without a glyph on the device
    Unsupported(u8),
}

/// Encode text for a `ScrollText` command
///
/// Lowercase ASCII letters are folded to uppercase. Anything else that
/// has no glyph is rejected instead of being sent as an undefined code.
pub fn encode_text(text: &str) -> Result<TextPayload, EncodeError> {
    let mut payload = TextPayload::new();

    for byte in text.bytes() {
        let code = byte.to_ascii_uppercase();
        if !is_displayable(code) {
            return Err(EncodeError::Unsupported(byte));
        }
        payload.push(code).map_err(|_| EncodeError::TooLong)?;
    }

    Ok(payload)
}

/// Split a payload into the chunks the transport delivers
pub fn chunks(payload: &[u8]) -> core::slice::Chunks<'_, u8> {
    payload.chunks(CHUNK_SIZE)
}

impl SetupPacket {
    fn vendor(request_type: u8, opcode: Opcode, length: u16) -> Self {
        Self {
            request_type,
            request: opcode.to_byte(),
            value: 0,
            index: 0,
            length,
        }
    }

    /// `DataIn`: announce a payload of `len` bytes
    pub fn write_payload(len: usize) -> Result<Self, EncodeError> {
        if len > PAYLOAD_CAPACITY {
            return Err(EncodeError::TooLong);
        }
        Ok(Self::vendor(VENDOR_OUT, Opcode::DataIn, len as u16))
    }

    /// `DrawMatrix`: render the staged payload as a bitmap
    pub fn draw_matrix() -> Self {
        Self::vendor(VENDOR_OUT, Opcode::DrawMatrix, 0)
    }

    /// `ScrollText`: render the staged payload as text
    pub fn scroll_text() -> Self {
        Self::vendor(VENDOR_OUT, Opcode::ScrollText, 0)
    }

    /// `DataOut`: read the payload buffer back
    pub fn read_back() -> Self {
        Self::vendor(VENDOR_IN, Opcode::DataOut, PAYLOAD_CAPACITY as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text_folds_case() {
        let payload = encode_text("Hi there").unwrap();
        assert_eq!(payload.as_slice(), b"HI THERE");
    }

    #[test]
    fn test_encode_text_rejects_digits() {
        assert_eq!(encode_text("R2D2"), Err(EncodeError::Unsupported(b'2')));
    }

    #[test]
    fn test_encode_text_rejects_overflow() {
        assert_eq!(
            encode_text("ABCDEFGHIJKLMNOPQ"),
            Err(EncodeError::TooLong)
        );
        assert!(encode_text("ABCDEFGHIJKLMNOP").is_ok());
    }

    #[test]
    fn test_chunks_split_at_eight() {
        let payload = [0u8; 11];
        let mut parts = chunks(&payload);
        assert_eq!(parts.next().map(<[u8]>::len), Some(8));
        assert_eq!(parts.next().map(<[u8]>::len), Some(3));
        assert!(parts.next().is_none());
    }

    #[test]
    fn test_request_builders() {
        let write = SetupPacket::write_payload(5).unwrap();
        assert_eq!(write.opcode(), Opcode::DataIn);
        assert_eq!(write.length, 5);
        assert!(!write.is_device_to_host());

        assert_eq!(SetupPacket::draw_matrix().opcode(), Opcode::DrawMatrix);
        assert_eq!(SetupPacket::scroll_text().length, 0);

        let read = SetupPacket::read_back();
        assert!(read.is_device_to_host());
        assert_eq!(read.length, 16);

        assert_eq!(SetupPacket::write_payload(17), Err(EncodeError::TooLong));
    }
}
