//! Command opcodes carried in the `bRequest` field

/// Begin a segmented write into the payload buffer
pub const OP_DATA_IN: u8 = 1;
/// Render the payload buffer as 8 raw row bytes
pub const OP_DRAW_MATRIX: u8 = 2;
/// Render the payload buffer as scrolling text
pub const OP_SCROLL_TEXT: u8 = 3;
/// Read the payload buffer back to the host
pub const OP_DATA_OUT: u8 = 5;

/// Decoded request opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// Host → device payload transfer (segmented write)
    DataIn,
    /// Draw the payload buffer as a bitmap
    DrawMatrix,
    /// Show the payload buffer as text
    ScrollText,
    /// Device → host payload readback
    DataOut,
    /// Anything else; accepted and ignored
    Other(u8),
}

impl Opcode {
    /// Decode an opcode from the `bRequest` byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            OP_DATA_IN => Opcode::DataIn,
            OP_DRAW_MATRIX => Opcode::DrawMatrix,
            OP_SCROLL_TEXT => Opcode::ScrollText,
            OP_DATA_OUT => Opcode::DataOut,
            other => Opcode::Other(other),
        }
    }

    /// Encode this opcode as a `bRequest` byte
    pub fn to_byte(self) -> u8 {
        match self {
            Opcode::DataIn => OP_DATA_IN,
            Opcode::DrawMatrix => OP_DRAW_MATRIX,
            Opcode::ScrollText => OP_SCROLL_TEXT,
            Opcode::DataOut => OP_DATA_OUT,
            Opcode::Other(byte) => byte,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_opcodes() {
        assert_eq!(Opcode::from_byte(1), Opcode::DataIn);
        assert_eq!(Opcode::from_byte(2), Opcode::DrawMatrix);
        assert_eq!(Opcode::from_byte(3), Opcode::ScrollText);
        assert_eq!(Opcode::from_byte(5), Opcode::DataOut);
    }

    #[test]
    fn test_gap_opcode_is_other() {
        // 4 was never assigned
        assert_eq!(Opcode::from_byte(4), Opcode::Other(4));
        assert_eq!(Opcode::Other(4).to_byte(), 4);
    }
}
