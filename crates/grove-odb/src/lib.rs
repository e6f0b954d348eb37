//! Object database for grove.
//!
//! A single read path over a repository's `objects/` directory: the loose
//! file is tried first and, when it does not exist, every pack index under
//! `objects/pack/` is searched. Nothing is cached; each read opens and
//! releases its own files.

mod search;

use std::path::{Path, PathBuf};

use grove_hash::ObjectId;
use grove_loose::LooseObjectStore;
use grove_object::RawObject;

pub use error::OdbError;

mod error {
    use grove_hash::ObjectId;

    #[derive(Debug, thiserror::Error)]
    pub enum OdbError {
        #[error("object not found: {0}")]
        NotFound(ObjectId),

        #[error(transparent)]
        Loose(#[from] grove_loose::LooseError),

        #[error(transparent)]
        Pack(#[from] grove_pack::PackError),
    }
}

/// Read-only view of one `objects/` directory.
#[derive(Debug, Clone)]
pub struct ObjectDatabase {
    loose: LooseObjectStore,
    objects_dir: PathBuf,
}

impl ObjectDatabase {
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        let objects_dir = objects_dir.as_ref().to_path_buf();
        Self {
            loose: LooseObjectStore::open(&objects_dir),
            objects_dir,
        }
    }

    /// Read an object, loose storage first, then packs.
    ///
    /// `Ok(None)` means no loose file exists and no pack index lists the id.
    pub fn read(&self, oid: &ObjectId) -> Result<Option<RawObject>, OdbError> {
        search::find_object(self, oid)
    }

    /// Like [`read`](Self::read), with absence reported as [`OdbError::NotFound`].
    pub fn read_existing(&self, oid: &ObjectId) -> Result<RawObject, OdbError> {
        self.read(oid)?.ok_or(OdbError::NotFound(*oid))
    }
}
