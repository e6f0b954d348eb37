//! Synthetic pack/idx fixtures.
//!
//! Object ids here are arbitrary labels: nothing in the read path hashes
//! content, so tests pick ids that make bucket placement obvious.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use grove_hash::ObjectId;
use grove_pack::{IDX_SIGNATURE, IDX_VERSION, PACK_HEADER_SIZE, PACK_SIGNATURE};
use grove_utils::varint::{write_offset_varint, write_uvarint};

pub const COMMIT: u8 = 1;
pub const TREE: u8 = 2;
pub const BLOB: u8 = 3;
const OFS_DELTA: u8 = 6;
const REF_DELTA: u8 = 7;

/// An id whose every byte is `n`.
pub fn oid(n: u8) -> ObjectId {
    ObjectId::from([n; 20])
}

/// An id with a chosen leading byte and a distinguishing last byte.
pub fn oid2(first: u8, last: u8) -> ObjectId {
    let mut raw = [0u8; 20];
    raw[0] = first;
    raw[19] = last;
    ObjectId::from(raw)
}

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

/// Delta header plus instructions.
pub fn delta(base_len: usize, target_len: usize, instructions: &[u8]) -> Vec<u8> {
    let mut out = write_uvarint(base_len as u64);
    out.extend(write_uvarint(target_len as u64));
    out.extend_from_slice(instructions);
    out
}

/// Copy instruction with every offset and size byte present.
pub fn copy(offset: u32, size: u32) -> Vec<u8> {
    let mut out = vec![0xff];
    out.extend_from_slice(&offset.to_le_bytes());
    out.extend_from_slice(&size.to_le_bytes()[..3]);
    out
}

/// Insert instruction; `data` must be 1..=127 bytes.
pub fn insert(data: &[u8]) -> Vec<u8> {
    assert!(!data.is_empty() && data.len() < 128);
    let mut out = vec![data.len() as u8];
    out.extend_from_slice(data);
    out
}

fn entry_header(type_code: u8, size: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut rest = size >> 4;
    let mut byte = (type_code << 4) | (size & 0x0f) as u8;
    while rest > 0 {
        out.push(byte | 0x80);
        byte = (rest & 0x7f) as u8;
        rest >>= 7;
    }
    out.push(byte);
    out
}

/// Builds a `.pack` and matching v2 `.idx` byte by byte.
pub struct PackBuilder {
    pack: Vec<u8>,
    entries: Vec<(ObjectId, u64, u32)>,
}

impl Default for PackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackBuilder {
    pub fn new() -> Self {
        Self {
            pack: vec![0u8; PACK_HEADER_SIZE],
            entries: Vec::new(),
        }
    }

    /// Append a complete object; returns its offset.
    pub fn base(&mut self, id: ObjectId, type_code: u8, data: &[u8]) -> u64 {
        let mut raw = entry_header(type_code, data.len());
        raw.extend(zlib(data));
        self.push(id, raw)
    }

    /// Append a delta against the entry at `base_offset`.
    pub fn ofs_delta(&mut self, id: ObjectId, base_offset: u64, delta: &[u8]) -> u64 {
        let offset = self.pack.len() as u64;
        let mut raw = entry_header(OFS_DELTA, delta.len());
        raw.extend(write_offset_varint(offset - base_offset));
        raw.extend(zlib(delta));
        self.push(id, raw)
    }

    /// Append a delta against the object named `base`.
    pub fn ref_delta(&mut self, id: ObjectId, base: ObjectId, delta: &[u8]) -> u64 {
        let mut raw = entry_header(REF_DELTA, delta.len());
        raw.extend_from_slice(base.as_bytes());
        raw.extend(zlib(delta));
        self.push(id, raw)
    }

    fn push(&mut self, id: ObjectId, raw: Vec<u8>) -> u64 {
        let offset = self.pack.len() as u64;
        let crc = crc32fast::hash(&raw);
        self.pack.extend(raw);
        self.entries.push((id, offset, crc));
        offset
    }

    /// Write `pack-<name>.pack` and `pack-<name>.idx` into `pack_dir`;
    /// returns the `.pack` path.
    pub fn write(mut self, pack_dir: &Path, name: &str) -> PathBuf {
        std::fs::create_dir_all(pack_dir).unwrap();

        self.pack[..4].copy_from_slice(PACK_SIGNATURE);
        self.pack[4..8].copy_from_slice(&2u32.to_be_bytes());
        self.pack[8..12].copy_from_slice(&(self.entries.len() as u32).to_be_bytes());
        self.pack.extend_from_slice(&[0u8; 20]);

        let pack_path = pack_dir.join(format!("pack-{name}.pack"));
        std::fs::write(&pack_path, &self.pack).unwrap();
        std::fs::write(pack_path.with_extension("idx"), build_index(&self.entries)).unwrap();
        pack_path
    }

    /// Entries written so far as (id, offset, crc32).
    pub fn entries(&self) -> &[(ObjectId, u64, u32)] {
        &self.entries
    }
}

pub fn build_index(entries: &[(ObjectId, u64, u32)]) -> Vec<u8> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let mut buf = Vec::new();
    buf.extend_from_slice(&IDX_SIGNATURE);
    buf.extend_from_slice(&IDX_VERSION.to_be_bytes());

    let mut fanout = [0u32; 256];
    for (id, _, _) in &sorted {
        fanout[id.first_byte() as usize] += 1;
    }
    for i in 1..256 {
        fanout[i] += fanout[i - 1];
    }
    for count in fanout {
        buf.extend_from_slice(&count.to_be_bytes());
    }
    for (id, _, _) in &sorted {
        buf.extend_from_slice(id.as_bytes());
    }
    for (_, _, crc) in &sorted {
        buf.extend_from_slice(&crc.to_be_bytes());
    }
    for (_, offset, _) in &sorted {
        buf.extend_from_slice(&(*offset as u32).to_be_bytes());
    }
    buf.extend_from_slice(&[0u8; 40]);
    buf
}
