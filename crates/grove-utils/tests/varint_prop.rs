use grove_utils::varint::{
    read_offset_varint, read_uvarint, write_offset_varint, write_uvarint,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn uvarint_roundtrip(value in any::<u64>()) {
        let encoded = write_uvarint(value);
        let (decoded, used) = read_uvarint(&encoded).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(used, encoded.len());
    }

    #[test]
    fn offset_varint_roundtrip(value in 0u64..(1u64 << 62)) {
        let encoded = write_offset_varint(value);
        let (decoded, used) = read_offset_varint(&encoded).unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert_eq!(used, encoded.len());
    }

    #[test]
    fn decoders_ignore_trailing_bytes(
        value in any::<u32>(),
        tail in proptest::collection::vec(any::<u8>(), 0..8),
    ) {
        let mut encoded = write_uvarint(u64::from(value));
        let len = encoded.len();
        encoded.extend_from_slice(&tail);
        prop_assert_eq!(read_uvarint(&encoded).unwrap(), (u64::from(value), len));

        let mut encoded = write_offset_varint(u64::from(value));
        let len = encoded.len();
        encoded.extend_from_slice(&tail);
        prop_assert_eq!(read_offset_varint(&encoded).unwrap(), (u64::from(value), len));
    }
}
