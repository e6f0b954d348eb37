//! Pack index (v2) reading and lookup.
//!
//! ```text
//! Header:  \xff tOc (4 bytes) | version (4 bytes = 2)
//! Fanout:  256 × 4-byte big-endian cumulative counts
//! OIDs:    N × 20-byte sorted OIDs
//! CRC32:   N × 4-byte CRC32 values
//! Offsets: N × 4-byte offsets (high bit = 1 → use 64-bit table)
//! 64-bit:  M × 8-byte offsets (for packs > 2GB)
//! Trailer: 20-byte pack checksum | 20-byte index checksum
//! ```
//!
//! `fanout[b]` is the exclusive upper bound of the entries whose id starts
//! with byte `b`. Lookup scans backward from `fanout[b] - 1` and stops at
//! the first entry with a different leading byte, so the lower bound never
//! has to be read.

use std::fs::File;
use std::path::{Path, PathBuf};

use grove_hash::{ObjectId, RAW_LEN};
use memmap2::Mmap;
use tracing::debug;

use crate::{PackError, IDX_SIGNATURE, IDX_VERSION};

const FANOUT_OFFSET: usize = 8;
const OID_OFFSET: usize = FANOUT_OFFSET + 256 * 4;
const LARGE_OFFSET_FLAG: u32 = 0x8000_0000;

/// A memory-mapped version 2 pack index.
///
/// Holds the file mapped only for as long as the value lives; callers that
/// want per-lookup acquisition use [`search`].
pub struct PackIndex {
    data: Mmap,
    num_objects: usize,
    crc_offset: usize,
    offset32_offset: usize,
    offset64_offset: usize,
    idx_path: PathBuf,
}

impl PackIndex {
    /// Map an index file and check its header and table sizes.
    pub fn open(idx_path: impl AsRef<Path>) -> Result<Self, PackError> {
        let idx_path = idx_path.as_ref().to_path_buf();
        let io_err = |source| PackError::Io {
            path: idx_path.clone(),
            source,
        };
        let file = File::open(&idx_path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();
        if len < OID_OFFSET as u64 {
            return Err(invalid(&idx_path, format!("file too small ({len} bytes)")));
        }
        // SAFETY: the map is read-only and git never rewrites an index in place.
        let data = unsafe { Mmap::map(&file) }.map_err(io_err)?;

        if data[0..4] != IDX_SIGNATURE {
            return Err(invalid(&idx_path, "bad signature".into()));
        }
        let version = be_u32(&data, 4);
        if version != IDX_VERSION {
            return Err(invalid(
                &idx_path,
                format!("unsupported version {version}, expected {IDX_VERSION}"),
            ));
        }

        let num_objects = be_u32(&data, FANOUT_OFFSET + 255 * 4) as usize;
        let crc_offset = OID_OFFSET + num_objects * RAW_LEN;
        let offset32_offset = crc_offset + num_objects * 4;
        let offset64_offset = offset32_offset + num_objects * 4;
        if data.len() < offset64_offset {
            return Err(invalid(
                &idx_path,
                format!(
                    "{} objects need {offset64_offset} bytes, file has {}",
                    num_objects,
                    data.len()
                ),
            ));
        }

        Ok(Self {
            data,
            num_objects,
            crc_offset,
            offset32_offset,
            offset64_offset,
            idx_path,
        })
    }

    /// Look up an id, returning its offset in the pack file.
    pub fn lookup(&self, oid: &ObjectId) -> Result<Option<u64>, PackError> {
        let first = oid.first_byte();
        let upper = self.fanout_entry(first) as usize;
        if upper > self.num_objects {
            return Err(invalid(
                &self.idx_path,
                format!(
                    "fanout entry {first:#04x} is {upper}, beyond {} objects",
                    self.num_objects
                ),
            ));
        }

        let target = oid.as_bytes();
        for i in (0..upper).rev() {
            let candidate = self.oid_bytes_at(i);
            if candidate[0] != first {
                break;
            }
            if candidate == target {
                return self.offset_at(i).map(Some);
            }
        }
        Ok(None)
    }

    /// Id at a position of the sorted listing.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_objects()`.
    pub fn oid_at(&self, index: usize) -> ObjectId {
        let mut raw = [0u8; RAW_LEN];
        raw.copy_from_slice(self.oid_bytes_at(index));
        ObjectId::from(raw)
    }

    /// Pack offset at a position of the sorted listing.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_objects()`.
    pub fn offset_at(&self, index: usize) -> Result<u64, PackError> {
        let word = be_u32(&self.data, self.offset32_offset + index * 4);
        if word & LARGE_OFFSET_FLAG == 0 {
            return Ok(u64::from(word));
        }

        let slot = (word & !LARGE_OFFSET_FLAG) as usize;
        let pos = self.offset64_offset + slot * 8;
        let bytes = self.data.get(pos..pos + 8).ok_or_else(|| {
            invalid(
                &self.idx_path,
                format!("64-bit offset slot {slot} out of range"),
            )
        })?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(raw))
    }

    /// CRC32 of the packed entry at a position of the sorted listing.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num_objects()`.
    pub fn crc32_at(&self, index: usize) -> u32 {
        be_u32(&self.data, self.crc_offset + index * 4)
    }

    /// Total number of objects, i.e. the last fanout entry.
    pub fn num_objects(&self) -> usize {
        self.num_objects
    }

    pub fn path(&self) -> &Path {
        &self.idx_path
    }

    /// Iterate over all (id, offset) pairs in sorted order.
    pub fn iter(&self) -> PackIndexIter<'_> {
        PackIndexIter {
            index: self,
            pos: 0,
        }
    }

    fn fanout_entry(&self, first_byte: u8) -> u32 {
        be_u32(&self.data, FANOUT_OFFSET + first_byte as usize * 4)
    }

    fn oid_bytes_at(&self, index: usize) -> &[u8] {
        let start = OID_OFFSET + index * RAW_LEN;
        &self.data[start..start + RAW_LEN]
    }
}

/// Iterator over (id, offset) pairs in a pack index.
pub struct PackIndexIter<'a> {
    index: &'a PackIndex,
    pos: usize,
}

impl Iterator for PackIndexIter<'_> {
    type Item = Result<(ObjectId, u64), PackError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.index.num_objects {
            return None;
        }
        let i = self.pos;
        self.pos += 1;
        Some(
            self.index
                .offset_at(i)
                .map(|offset| (self.index.oid_at(i), offset)),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.index.num_objects - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PackIndexIter<'_> {}

/// Open `idx_path`, look up `oid`, and release the file again.
pub fn search(idx_path: &Path, oid: &ObjectId) -> Result<Option<u64>, PackError> {
    let found = PackIndex::open(idx_path)?.lookup(oid)?;
    debug!(idx = %idx_path.display(), %oid, ?found, "searched pack index");
    Ok(found)
}

fn be_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

fn invalid(path: &Path, reason: String) -> PackError {
    PackError::InvalidIndex {
        path: path.to_path_buf(),
        reason,
    }
}
