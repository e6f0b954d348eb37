//! Packfile reading for grove.
//!
//! A pack concatenates many zlib-compressed objects, some of them stored as
//! deltas against another object. Its `.idx` sibling maps object ids to byte
//! offsets inside the pack. This crate covers the whole read path:
//!
//! - [`index`]: the version 2 `.idx` format and the bucket search over it
//! - [`entry`]: the per-object header at the start of every pack entry
//! - [`delta`]: the copy/insert instruction stream
//! - [`pack`]: reading an entry at an offset and resolving its delta chain
//! - [`search`]: looking an id up across every pack in `objects/pack/`

pub mod delta;
pub mod entry;
pub mod index;
pub mod pack;
pub mod search;

use std::path::PathBuf;

use grove_hash::ObjectId;
use grove_object::ObjectKind;

pub use index::PackIndex;
pub use pack::{read_at, read_pack_header, PackFile};
pub use search::{find_indexes, search_all_packs};

/// Errors that can occur while reading packs and their indexes.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pack index {path}: {reason}")]
    InvalidIndex { path: PathBuf, reason: String },

    #[error("invalid pack header: {0}")]
    InvalidHeader(String),

    #[error("unsupported pack version: {0}")]
    UnsupportedVersion(u32),

    #[error("corrupt pack entry at offset {offset}: {reason}")]
    CorruptEntry { offset: u64, reason: &'static str },

    #[error("failed to decompress pack entry at offset {offset}")]
    Inflate {
        offset: u64,
        #[source]
        source: grove_utils::UtilError,
    },

    #[error("invalid delta at byte {position}: {reason}")]
    InvalidDelta { position: usize, reason: String },

    #[error("delta base not found: {0}")]
    MissingBase(ObjectId),

    #[error("unexpected nested delta: base {base} resolved to {kind}")]
    NestedDelta { base: ObjectId, kind: ObjectKind },

    #[error("delta chain too deep (>{max_depth} links) at offset {offset}")]
    DeltaChainTooDeep { offset: u64, max_depth: usize },
}

/// Pack format constants.
pub const PACK_SIGNATURE: &[u8; 4] = b"PACK";
pub const PACK_HEADER_SIZE: usize = 12;

/// Pack index v2 constants.
pub const IDX_SIGNATURE: [u8; 4] = [0xff, 0x74, 0x4f, 0x63]; // "\377tOc"
pub const IDX_VERSION: u32 = 2;

/// Longest delta chain followed before giving up. Also bounds ref-delta
/// cycles that span several packs.
pub const MAX_DELTA_CHAIN_DEPTH: usize = 512;
