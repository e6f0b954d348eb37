//! Git object model for grove.
//!
//! Pure byte-level parsers: the loose object header, tree entries and commit
//! text. Nothing in this crate touches the filesystem; the readers in
//! `grove-loose` and `grove-pack` hand their decompressed bytes in here.

mod commit;
pub mod header;
mod tree;

pub use commit::Commit;
pub use tree::{extract_tree_entries, TreeEntry, DIRECTORY_MODE};

use grove_hash::HashError;

/// Errors produced by object parsing.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("malformed object header: {0}")]
    InvalidHeader(&'static str),

    #[error("invalid tree entry at offset {offset}: {reason}")]
    InvalidTreeEntry { offset: usize, reason: &'static str },

    #[error("malformed commit: missing '{field}' header")]
    MissingCommitField { field: &'static str },

    #[error("malformed commit: invalid {field} id")]
    InvalidCommitId {
        field: &'static str,
        #[source]
        source: HashError,
    },
}

/// The kind of a stored object.
///
/// The delta kinds only exist inside pack files. A reader that hands an
/// object to its caller has already resolved it to one of the four concrete
/// kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
    OffsetDelta,
    RefDelta,
    Invalid,
}

impl ObjectKind {
    /// Map a loose header type word. Unknown words yield [`ObjectKind::Invalid`].
    pub fn from_name(name: &[u8]) -> Self {
        match name {
            b"commit" => Self::Commit,
            b"tree" => Self::Tree,
            b"blob" => Self::Blob,
            b"tag" => Self::Tag,
            _ => Self::Invalid,
        }
    }

    /// Map the 3-bit type field of a pack entry header.
    pub fn from_pack_type(code: u8) -> Self {
        match code {
            1 => Self::Commit,
            2 => Self::Tree,
            3 => Self::Blob,
            4 => Self::Tag,
            6 => Self::OffsetDelta,
            7 => Self::RefDelta,
            _ => Self::Invalid,
        }
    }

    pub fn is_delta(&self) -> bool {
        matches!(self, Self::OffsetDelta | Self::RefDelta)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Tree => "tree",
            Self::Blob => "blob",
            Self::Tag => "tag",
            Self::OffsetDelta => "ofs-delta",
            Self::RefDelta => "ref-delta",
            Self::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object's kind together with its fully reconstructed payload.
///
/// Produced fresh by every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    pub kind: ObjectKind,
    pub data: Vec<u8>,
}

impl RawObject {
    pub fn new(kind: ObjectKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_name() {
        assert_eq!(ObjectKind::from_name(b"commit"), ObjectKind::Commit);
        assert_eq!(ObjectKind::from_name(b"tree"), ObjectKind::Tree);
        assert_eq!(ObjectKind::from_name(b"blob"), ObjectKind::Blob);
        assert_eq!(ObjectKind::from_name(b"tag"), ObjectKind::Tag);
        assert_eq!(ObjectKind::from_name(b"Blob"), ObjectKind::Invalid);
        assert_eq!(ObjectKind::from_name(b""), ObjectKind::Invalid);
    }

    #[test]
    fn kind_from_pack_type() {
        assert_eq!(ObjectKind::from_pack_type(1), ObjectKind::Commit);
        assert_eq!(ObjectKind::from_pack_type(3), ObjectKind::Blob);
        assert_eq!(ObjectKind::from_pack_type(6), ObjectKind::OffsetDelta);
        assert_eq!(ObjectKind::from_pack_type(7), ObjectKind::RefDelta);
        // 0 and 5 are reserved.
        assert_eq!(ObjectKind::from_pack_type(0), ObjectKind::Invalid);
        assert_eq!(ObjectKind::from_pack_type(5), ObjectKind::Invalid);
    }

    #[test]
    fn only_delta_kinds_are_deltas() {
        assert!(ObjectKind::OffsetDelta.is_delta());
        assert!(ObjectKind::RefDelta.is_delta());
        assert!(!ObjectKind::Blob.is_delta());
        assert!(!ObjectKind::Invalid.is_delta());
    }

    #[test]
    fn kind_display() {
        assert_eq!(ObjectKind::Tree.to_string(), "tree");
        assert_eq!(ObjectKind::RefDelta.to_string(), "ref-delta");
    }
}
