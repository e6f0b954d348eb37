//! Pack entry header parsing.
//!
//! Every entry starts with a type-and-size header: bit 7 of each byte is a
//! continuation flag, bits 4-6 of the first byte are the type, and the size
//! is spread over the low nibble of the first byte and the low 7 bits of each
//! continuation byte. Delta entries follow it with a reference to their base.

use grove_hash::{ObjectId, RAW_LEN};
use grove_object::ObjectKind;
use grove_utils::varint;

use crate::PackError;

/// Where an entry's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A complete commit, tree, blob or tag.
    Base(ObjectKind),
    /// Delta against the entry at this absolute offset in the same pack.
    OffsetDelta { base_offset: u64 },
    /// Delta against the object with this id, wherever it is packed.
    RefDelta { base_oid: ObjectId },
}

/// A decoded entry header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    pub kind: EntryKind,
    /// Declared inflated size. Only used as an allocation hint.
    pub size: u64,
    /// Absolute offset of the zlib stream.
    pub data_offset: u64,
}

/// Parse the header of the entry at `entry_offset`, given the pack bytes
/// starting at that offset.
pub fn parse_entry_header(data: &[u8], entry_offset: u64) -> Result<PackEntry, PackError> {
    let corrupt = |reason| PackError::CorruptEntry {
        offset: entry_offset,
        reason,
    };

    let mut byte = *data.first().ok_or(corrupt("truncated header"))?;
    let mut pos = 1;
    let type_code = (byte >> 4) & 0x07;
    let mut size = u64::from(byte & 0x0f);
    let mut shift = 4u32;

    while byte & 0x80 != 0 {
        byte = *data.get(pos).ok_or(corrupt("truncated header"))?;
        pos += 1;
        if shift > 57 {
            return Err(corrupt("size overflows 64 bits"));
        }
        size |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }

    let kind = match ObjectKind::from_pack_type(type_code) {
        ObjectKind::OffsetDelta => {
            let (distance, used) = varint::read_offset_varint(&data[pos..])
                .map_err(|_| corrupt("bad base offset"))?;
            pos += used;
            if distance == 0 || distance > entry_offset {
                return Err(corrupt("base offset outside pack"));
            }
            EntryKind::OffsetDelta {
                base_offset: entry_offset - distance,
            }
        }
        ObjectKind::RefDelta => {
            let raw = data
                .get(pos..pos + RAW_LEN)
                .ok_or(corrupt("truncated base id"))?;
            pos += RAW_LEN;
            EntryKind::RefDelta {
                base_oid: ObjectId::from_bytes(raw).map_err(|_| corrupt("truncated base id"))?,
            }
        }
        ObjectKind::Invalid => return Err(corrupt("invalid object type")),
        base => EntryKind::Base(base),
    };

    Ok(PackEntry {
        kind,
        size,
        data_offset: entry_offset + pos as u64,
    })
}
