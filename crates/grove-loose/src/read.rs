use std::fs;
use std::io;

use grove_hash::ObjectId;
use grove_object::{header, RawObject};
use tracing::debug;

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    /// Check if a loose object exists.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read a loose object by id.
    ///
    /// Returns `Ok(None)` if no such file exists so the caller can fall back
    /// to the packs. Any other I/O failure, a corrupt zlib stream, or a
    /// header without its space/NUL separators is an error.
    pub fn read(&self, oid: &ObjectId) -> Result<Option<RawObject>, LooseError> {
        let path = self.object_path(oid);
        let compressed = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%oid, "no loose object");
                return Ok(None);
            }
            Err(source) => return Err(LooseError::Io { path, source }),
        };

        let decompressed = grove_utils::zlib::inflate(&compressed)
            .map_err(|source| LooseError::Inflate { oid: *oid, source })?;
        let object = header::split_loose(&decompressed)
            .map_err(|source| LooseError::Malformed { oid: *oid, source })?;

        debug!(%oid, kind = %object.kind, size = object.data.len(), "read loose object");
        Ok(Some(object))
    }
}
