//! Loose object reader.
//!
//! Each loose object lives at `<gitdir>/objects/XX/YYYY...` where `XX` is the
//! first byte of the id in hex and `YYYY...` the remaining 38 characters. The
//! file holds one zlib stream of `"<type> <size>\0<content>"`.

mod read;

use std::path::{Path, PathBuf};

use grove_hash::ObjectId;

/// Read access to a repository's loose object directory (`objects/`).
#[derive(Debug, Clone)]
pub struct LooseObjectStore {
    objects_dir: PathBuf,
}

impl LooseObjectStore {
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// File path a loose object with this id would live at.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// Errors from loose object reads.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("failed to read loose object {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decompress loose object {oid}")]
    Inflate {
        oid: ObjectId,
        #[source]
        source: grove_utils::UtilError,
    },

    #[error("malformed loose object {oid}")]
    Malformed {
        oid: ObjectId,
        #[source]
        source: grove_object::ObjectError,
    },
}
