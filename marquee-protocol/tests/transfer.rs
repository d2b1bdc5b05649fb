//! Property tests for the segmented write path

use marquee_protocol::{PayloadBuffer, TransferCursor, PAYLOAD_CAPACITY};
use proptest::prelude::*;

proptest! {
    #[test]
    fn single_byte_chunks_complete_on_last(len in 1u16..=16) {
        let mut buffer = PayloadBuffer::new();
        let mut cursor = TransferCursor::new();
        cursor.begin(len);

        for i in 0..len {
            let done = cursor.accept(&mut buffer, &[i as u8]);
            prop_assert_eq!(done, i == len - 1);
        }
        prop_assert_eq!(cursor.received(), usize::from(len));
    }

    #[test]
    fn oversized_declaration_behaves_like_capacity(
        len in 17u16..=u16::MAX,
        data in proptest::collection::vec(any::<u8>(), 0..40),
    ) {
        let mut clamped_buf = PayloadBuffer::new();
        let mut clamped = TransferCursor::new();
        clamped.begin(len);

        let mut exact_buf = PayloadBuffer::new();
        let mut exact = TransferCursor::new();
        exact.begin(PAYLOAD_CAPACITY as u16);

        for chunk in data.chunks(8) {
            let a = clamped.accept(&mut clamped_buf, chunk);
            let b = exact.accept(&mut exact_buf, chunk);
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(clamped, exact);
        prop_assert_eq!(clamped_buf, exact_buf);
    }

    #[test]
    fn cursor_never_exceeds_declared_length(
        len in any::<u16>(),
        chunks in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..9), 0..8),
    ) {
        let mut buffer = PayloadBuffer::new();
        let mut cursor = TransferCursor::new();
        cursor.begin(len);

        for chunk in &chunks {
            cursor.accept(&mut buffer, chunk);
            prop_assert!(cursor.received() <= cursor.expected());
            prop_assert!(cursor.expected() <= PAYLOAD_CAPACITY);
        }
    }
}
