//! LED driver sink

/// First driver row address (driver addressing is 1-based)
pub const FIRST_ROW: u8 = 1;
/// Last driver row address
pub const LAST_ROW: u8 = 8;

/// Errors that can occur while pushing a frame to the LED driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Row address outside `FIRST_ROW..=LAST_ROW`
    InvalidRow,
    /// The bus to the driver reported a failure
    Bus,
}

/// Destination for rendered frames
///
/// A frame is committed by writing each of the 8 visible rows in order;
/// the driver latches every row as soon as it is written.
pub trait MatrixSink {
    /// Write one 8-bit pattern to a row register (`1..=8`)
    fn write_row(&mut self, row: u8, pattern: u8) -> Result<(), SinkError>;
}

impl<S: MatrixSink + ?Sized> MatrixSink for &mut S {
    fn write_row(&mut self, row: u8, pattern: u8) -> Result<(), SinkError> {
        (**self).write_row(row, pattern)
    }
}
