//! Object lookup across every pack of a repository.

use std::io;
use std::path::{Path, PathBuf};

use grove_hash::ObjectId;
use grove_object::RawObject;
use tracing::{debug, warn};

use crate::{index, PackError, PackFile};

/// List the `.idx` files in `pack_dir`, newest first.
///
/// A missing directory has no indexes. Ties on modification time are broken
/// by file name so the order is stable.
pub fn find_indexes(pack_dir: &Path) -> Result<Vec<PathBuf>, PackError> {
    let entries = match std::fs::read_dir(pack_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PackError::Io {
                path: pack_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut found: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "idx"))
        .map(|p| {
            let modified = p.metadata().and_then(|m| m.modified()).ok();
            (modified, p)
        })
        .collect();

    found.sort_by(|(a_time, a_path), (b_time, b_path)| {
        b_time.cmp(a_time).then_with(|| a_path.cmp(b_path))
    });
    Ok(found.into_iter().map(|(_, p)| p).collect())
}

/// Find `oid` in any pack under `<objects_dir>/pack/` and resolve it.
///
/// Returns `Ok(None)` when no index lists the id, including when there are
/// no packs at all. An index that cannot be read is skipped with a warning;
/// once an index does list the id, failures reading its pack are returned.
pub fn search_all_packs(
    objects_dir: &Path,
    oid: &ObjectId,
) -> Result<Option<RawObject>, PackError> {
    search_pack_dir(&objects_dir.join("pack"), oid, 0)
}

/// [`search_all_packs`] over a pack directory, carrying the number of delta
/// links already followed by the caller.
pub(crate) fn search_pack_dir(
    pack_dir: &Path,
    oid: &ObjectId,
    depth: usize,
) -> Result<Option<RawObject>, PackError> {
    for idx_path in find_indexes(pack_dir)? {
        let offset = match index::search(&idx_path, oid) {
            Ok(Some(offset)) => offset,
            Ok(None) => continue,
            Err(e) => {
                warn!(idx = %idx_path.display(), error = %e, "skipping unreadable pack index");
                continue;
            }
        };

        let pack_path = idx_path.with_extension("pack");
        debug!(%oid, pack = %pack_path.display(), offset, "found packed object");
        return PackFile::open(&pack_path)?.resolve(offset, depth).map(Some);
    }

    debug!(%oid, dir = %pack_dir.display(), "object not in any pack");
    Ok(None)
}
