//! Lookup order: loose, then packs (newest index first).
//!
//! A loose file that exists but cannot be read or parsed is an error; it
//! does not fall through to the packs.

use grove_hash::ObjectId;
use grove_object::RawObject;
use tracing::debug;

use crate::{ObjectDatabase, OdbError};

pub(crate) fn find_object(
    odb: &ObjectDatabase,
    oid: &ObjectId,
) -> Result<Option<RawObject>, OdbError> {
    if let Some(obj) = odb.loose.read(oid)? {
        debug!(%oid, kind = %obj.kind, "read loose object");
        return Ok(Some(obj));
    }

    debug!(%oid, "no loose object, searching packs");
    let found = grove_pack::search_all_packs(&odb.objects_dir, oid)?;
    if let Some(obj) = &found {
        debug!(%oid, kind = %obj.kind, size = obj.data.len(), "read packed object");
    }
    Ok(found)
}
