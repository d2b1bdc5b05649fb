//! USB setup packet decoding and encoding
//!
//! Packet format (USB 2.0 §9.3):
//! - bmRequestType (1 byte): direction, type and recipient
//! - bRequest (1 byte): opcode
//! - wValue (2 bytes LE): unused by this protocol
//! - wIndex (2 bytes LE): unused by this protocol
//! - wLength (2 bytes LE): length of the data stage

use crate::opcode::Opcode;

/// Setup packets are always 8 bytes
pub const SETUP_PACKET_LEN: usize = 8;

/// bmRequestType: data stage flows device → host
pub const DIRECTION_IN: u8 = 0x80;
/// bmRequestType: vendor request addressed to the device, host → device
pub const VENDOR_OUT: u8 = 0x40;
/// bmRequestType: vendor request addressed to the device, device → host
pub const VENDOR_IN: u8 = VENDOR_OUT | DIRECTION_IN;

/// Errors that can occur while decoding a setup packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupError {
    /// Fewer than 8 bytes were supplied
    Truncated,
}

/// A decoded control request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetupPacket {
    /// bmRequestType
    pub request_type: u8,
    /// bRequest (the opcode)
    pub request: u8,
    /// wValue
    pub value: u16,
    /// wIndex
    pub index: u16,
    /// wLength: declared length of the data stage
    pub length: u16,
}

impl SetupPacket {
    /// Decode a setup packet from raw bytes
    ///
    /// Extra trailing bytes are ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self, SetupError> {
        let raw: &[u8; SETUP_PACKET_LEN] = bytes
            .get(..SETUP_PACKET_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(SetupError::Truncated)?;

        Ok(Self {
            request_type: raw[0],
            request: raw[1],
            value: u16::from_le_bytes([raw[2], raw[3]]),
            index: u16::from_le_bytes([raw[4], raw[5]]),
            length: u16::from_le_bytes([raw[6], raw[7]]),
        })
    }

    /// Encode this packet into its 8-byte wire form
    pub fn to_bytes(&self) -> [u8; SETUP_PACKET_LEN] {
        let value = self.value.to_le_bytes();
        let index = self.index.to_le_bytes();
        let length = self.length.to_le_bytes();
        [
            self.request_type,
            self.request,
            value[0],
            value[1],
            index[0],
            index[1],
            length[0],
            length[1],
        ]
    }

    /// Opcode carried in `bRequest`
    pub fn opcode(&self) -> Opcode {
        Opcode::from_byte(self.request)
    }

    /// True if the data stage (if any) flows device → host
    pub fn is_device_to_host(&self) -> bool {
        self.request_type & DIRECTION_IN != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_in_request() {
        // vendor OUT, bRequest=1, wLength=11
        let raw = [0x40, 0x01, 0x00, 0x00, 0x00, 0x00, 0x0B, 0x00];
        let packet = SetupPacket::parse(&raw).unwrap();

        assert_eq!(packet.opcode(), Opcode::DataIn);
        assert_eq!(packet.length, 11);
        assert!(!packet.is_device_to_host());
    }

    #[test]
    fn test_length_is_little_endian() {
        let raw = [0x40, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
        let packet = SetupPacket::parse(&raw).unwrap();
        assert_eq!(packet.length, 256);
    }

    #[test]
    fn test_truncated_packet() {
        assert_eq!(
            SetupPacket::parse(&[0xC0, 0x05, 0, 0]),
            Err(SetupError::Truncated)
        );
    }

    #[test]
    fn test_encode_matches_parse() {
        let packet = SetupPacket {
            request_type: VENDOR_IN,
            request: 5,
            value: 0x1234,
            index: 0xBEEF,
            length: 16,
        };
        let bytes = packet.to_bytes();

        assert_eq!(bytes[0], 0xC0);
        assert_eq!(bytes[2], 0x34); // wValue low byte first
        assert_eq!(SetupPacket::parse(&bytes), Ok(packet));
        assert!(packet.is_device_to_host());
    }
}
