//! Segmented write bookkeeping
//!
//! A control transfer on a low-speed device moves at most 8 bytes per
//! data packet, so a payload longer than that arrives as several chunks.
//! The host announces the total length in the setup packet (`DataIn`);
//! the device then appends chunks until that length is reached.
//!
//! Invariant: `received <= expected <= PAYLOAD_CAPACITY`.

/// Size of the shared payload/reply buffer
pub const PAYLOAD_CAPACITY: usize = 16;

/// Fixed-capacity buffer shared by the write path and the readback path
///
/// Contents persist across transfers. A short write overwrites only its
/// prefix; the tail keeps whatever the previous transfer left there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadBuffer {
    bytes: [u8; PAYLOAD_CAPACITY],
}

impl PayloadBuffer {
    /// Create a zeroed buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; PAYLOAD_CAPACITY],
        }
    }

    /// Whole buffer, including stale tail bytes
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_CAPACITY] {
        &self.bytes
    }

    /// Byte at `index`, or 0 past the end
    pub fn get(&self, index: usize) -> u8 {
        self.bytes.get(index).copied().unwrap_or(0)
    }

    /// First `len` bytes, clamped to capacity
    pub fn prefix(&self, len: usize) -> &[u8] {
        &self.bytes[..len.min(PAYLOAD_CAPACITY)]
    }
}

/// Progress of the current segmented write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferCursor {
    expected: usize,
    received: usize,
}

impl TransferCursor {
    /// Create an idle cursor (nothing expected)
    pub const fn new() -> Self {
        Self {
            expected: 0,
            received: 0,
        }
    }

    /// Start a new write of `declared` bytes
    ///
    /// The declared length is clamped to the buffer capacity; returns the
    /// length that will actually be collected.
    pub fn begin(&mut self, declared: u16) -> usize {
        self.expected = usize::from(declared).min(PAYLOAD_CAPACITY);
        self.received = 0;
        self.expected
    }

    /// Append one chunk into `buffer`
    ///
    /// Bytes beyond the declared length are dropped. Returns true once
    /// the declared length has been collected.
    pub fn accept(&mut self, buffer: &mut PayloadBuffer, chunk: &[u8]) -> bool {
        let take = self.remaining().min(chunk.len());
        let end = self.received + take;

        buffer.bytes[self.received..end].copy_from_slice(&chunk[..take]);
        self.received = end;

        self.is_complete()
    }

    /// Declared (clamped) length of the current write
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Bytes collected so far
    pub fn received(&self) -> usize {
        self.received
    }

    /// Bytes still missing
    pub fn remaining(&self) -> usize {
        self.expected - self.received
    }

    /// True once every declared byte has arrived
    pub fn is_complete(&self) -> bool {
        self.received == self.expected
    }
}
