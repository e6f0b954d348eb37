//! Git's two variable-length integer encodings.
//!
//! - [`read_uvarint`]: little-endian base-128 (LEB128). Each byte carries 7
//!   bits, least significant group first, top bit set on every byte but the
//!   last. Used for the base/target sizes in delta headers.
//! - [`read_offset_varint`]: the `OFS_DELTA` base distance. Groups arrive
//!   most significant first, and every continuation adds one before shifting,
//!   so an n-byte encoding carries an implicit `2^7 + 2^14 + ... + 2^(7*(n-1))`.
//!   That addend removes redundant encodings: `[0x80, 0x00]` is 128, not 0.

use crate::{Result, UtilError};

/// Longest encoding of a 64-bit value in either format.
pub const MAX_VARINT_LEN: usize = 10;

/// Read a LEB128 varint from the front of `data`.
///
/// Returns `(value, bytes_consumed)`.
pub fn read_uvarint(data: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0u32;

    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(UtilError::VarintOverflow);
        }
        let group = u64::from(byte & 0x7f);
        if shift == 63 && group > 1 {
            return Err(UtilError::VarintOverflow);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }

    Err(UtilError::TruncatedVarint { read: data.len() })
}

/// Read an `OFS_DELTA` offset varint from the front of `data`.
///
/// Returns `(value, bytes_consumed)`.
pub fn read_offset_varint(data: &[u8]) -> Result<(u64, usize)> {
    let mut byte = *data.first().ok_or(UtilError::TruncatedVarint { read: 0 })?;
    let mut value = u64::from(byte & 0x7f);
    let mut pos = 1;

    while byte & 0x80 != 0 {
        byte = *data
            .get(pos)
            .ok_or(UtilError::TruncatedVarint { read: pos })?;
        pos += 1;
        value = value
            .checked_add(1)
            .and_then(|v| v.checked_mul(128))
            .ok_or(UtilError::VarintOverflow)?
            | u64::from(byte & 0x7f);
    }

    Ok((value, pos))
}

/// Encode a LEB128 varint.
pub fn write_uvarint(mut value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
    buf
}

/// Encode an `OFS_DELTA` offset varint.
pub fn write_offset_varint(offset: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
    let mut off = offset;

    buf.push((off & 0x7f) as u8);
    off >>= 7;
    while off > 0 {
        off -= 1;
        buf.push(0x80 | (off & 0x7f) as u8);
        off >>= 7;
    }
    buf.reverse();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uvarint_single_byte() {
        assert_eq!(read_uvarint(&[0x05]).unwrap(), (5, 1));
        assert_eq!(read_uvarint(&[0x7f]).unwrap(), (127, 1));
    }

    #[test]
    fn uvarint_multi_byte() {
        // 150 = 0b1001_0110 -> 0x96 0x01
        assert_eq!(read_uvarint(&[0x96, 0x01]).unwrap(), (150, 2));
    }

    #[test]
    fn uvarint_stops_at_terminator() {
        let (value, used) = read_uvarint(&[0x80, 0x01, 0xff, 0xff]).unwrap();
        assert_eq!(value, 128);
        assert_eq!(used, 2);
    }

    #[test]
    fn uvarint_truncated() {
        let err = read_uvarint(&[0x80, 0x80]).unwrap_err();
        assert!(matches!(err, UtilError::TruncatedVarint { read: 2 }));
        assert!(read_uvarint(&[]).is_err());
    }

    #[test]
    fn uvarint_overflow() {
        let data = [0xff; 11];
        assert!(matches!(
            read_uvarint(&data).unwrap_err(),
            UtilError::VarintOverflow
        ));
    }

    #[test]
    fn uvarint_max_value() {
        let encoded = write_uvarint(u64::MAX);
        assert_eq!(encoded.len(), MAX_VARINT_LEN);
        assert_eq!(read_uvarint(&encoded).unwrap(), (u64::MAX, MAX_VARINT_LEN));
    }

    #[test]
    fn offset_varint_single_byte() {
        assert_eq!(read_offset_varint(&[0x2a]).unwrap(), (42, 1));
    }

    #[test]
    fn offset_varint_applies_addend() {
        // A plain concatenation would give 0; the implicit 2^7 makes it 128.
        assert_eq!(read_offset_varint(&[0x80, 0x00]).unwrap(), (128, 2));
        // ((0x11 + 1) << 7) | 0x2e
        assert_eq!(read_offset_varint(&[0x91, 0x2e]).unwrap(), (2350, 2));
        // Three bytes: addend is 2^7 + 2^14.
        assert_eq!(
            read_offset_varint(&[0x80, 0x80, 0x00]).unwrap(),
            (128 + 16384, 3)
        );
    }

    #[test]
    fn offset_varint_truncated() {
        let err = read_offset_varint(&[0x81]).unwrap_err();
        assert!(matches!(err, UtilError::TruncatedVarint { read: 1 }));
        assert!(read_offset_varint(&[]).is_err());
    }

    #[test]
    fn offset_varint_overflow() {
        assert!(matches!(
            read_offset_varint(&[0xff; 12]).unwrap_err(),
            UtilError::VarintOverflow
        ));
    }

    #[test]
    fn offset_encoding_uses_shortest_form() {
        assert_eq!(write_offset_varint(127), vec![0x7f]);
        assert_eq!(write_offset_varint(128), vec![0x80, 0x00]);
        assert_eq!(write_offset_varint(2350), vec![0x91, 0x2e]);
    }
}
