//! Delta instruction decoding.
//!
//! ```text
//! [base_size: varint] [target_size: varint] [instruction]*
//! ```
//!
//! - Copy:   `1SSSOOOO [offset bytes] [size bytes]`. Each `O` bit gates one
//!   little-endian offset byte, each `S` bit one size byte; absent bytes are
//!   zero. A size of zero means `0x10000`.
//! - Insert: `0NNNNNNN [N literal bytes]`, `N` in 1..=127.
//!
//! The two header sizes are read past but not enforced; the output is
//! whatever the instructions produce.

use grove_utils::varint::read_uvarint;

use crate::PackError;

/// Apply a delta instruction stream to a base object, producing the target.
pub fn apply_delta(base: &[u8], delta: &[u8]) -> Result<Vec<u8>, PackError> {
    let (_base_size, used) =
        read_uvarint(delta).map_err(|e| invalid(0, format!("base size: {e}")))?;
    let mut pos = used;
    let (target_size, used) =
        read_uvarint(&delta[pos..]).map_err(|e| invalid(pos, format!("target size: {e}")))?;
    pos += used;

    let mut output = Vec::with_capacity(target_size.min(base.len() as u64 * 2 + 4096) as usize);

    while pos < delta.len() {
        let op_pos = pos;
        let cmd = delta[pos];
        pos += 1;

        if cmd & 0x80 != 0 {
            let mut offset: usize = 0;
            let mut size: usize = 0;
            for (bit, shift) in [(0x01, 0), (0x02, 8), (0x04, 16), (0x08, 24)] {
                if cmd & bit != 0 {
                    offset |= usize::from(next_byte(delta, &mut pos, "copy offset")?) << shift;
                }
            }
            for (bit, shift) in [(0x10, 0), (0x20, 8), (0x40, 16)] {
                if cmd & bit != 0 {
                    size |= usize::from(next_byte(delta, &mut pos, "copy size")?) << shift;
                }
            }
            if size == 0 {
                size = 0x10000;
            }

            let chunk = offset
                .checked_add(size)
                .and_then(|end| base.get(offset..end))
                .ok_or_else(|| {
                    invalid(
                        op_pos,
                        format!(
                            "copy out of bounds: offset={offset}, size={size}, base_len={}",
                            base.len()
                        ),
                    )
                })?;
            output.extend_from_slice(chunk);
        } else if cmd != 0 {
            let n = usize::from(cmd);
            let literal = delta
                .get(pos..pos + n)
                .ok_or_else(|| invalid(op_pos, format!("insert of {n} bytes past end of delta")))?;
            output.extend_from_slice(literal);
            pos += n;
        } else {
            return Err(invalid(op_pos, "reserved opcode 0".into()));
        }
    }

    Ok(output)
}

fn next_byte(delta: &[u8], pos: &mut usize, what: &str) -> Result<u8, PackError> {
    let byte = *delta
        .get(*pos)
        .ok_or_else(|| invalid(*pos, format!("truncated {what}")))?;
    *pos += 1;
    Ok(byte)
}

fn invalid(position: usize, reason: String) -> PackError {
    PackError::InvalidDelta { position, reason }
}
