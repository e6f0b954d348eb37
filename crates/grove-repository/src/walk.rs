//! Path lookup through nested trees.

use bstr::{BString, ByteSlice, ByteVec};
use grove_hash::ObjectId;
use grove_object::{extract_tree_entries, ObjectKind, RawObject, TreeEntry};

use crate::{RepoError, Repository};

/// Walk from the tree `root` down `path`, returning the object at its end
/// and its id.
///
/// Empty segments are dropped. A path with none left, or exactly `.`,
/// returns the root tree itself; a `.` anywhere else is an ordinary name.
/// `observer` sees the cumulative path and id of every entry scanned along
/// the way, matching or not.
pub(crate) fn walk_tree<F, E>(
    repo: &Repository,
    root: ObjectId,
    root_data: Vec<u8>,
    path: &str,
    observer: &mut F,
) -> Result<(ObjectId, RawObject), RepoError>
where
    F: FnMut(&bstr::BStr, &ObjectId) -> Result<(), E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let segments: Vec<&str> = match path {
        "." => Vec::new(),
        _ => path.split('/').filter(|s| !s.is_empty()).collect(),
    };
    let Some((leaf, dirs)) = segments.split_last() else {
        return Ok((root, RawObject::new(ObjectKind::Tree, root_data)));
    };

    let mut tree = (root, root_data);
    let mut walked = BString::default();
    for dir in dirs {
        let entry = scan(&tree, &walked, dir, observer)?;
        let obj = repo.read_object(&entry.oid)?;
        if obj.kind != ObjectKind::Tree {
            return Err(RepoError::NotATree(entry.oid));
        }
        walked = join(&walked, dir.as_bytes());
        tree = (entry.oid, obj.data);
    }

    let entry = scan(&tree, &walked, leaf, observer)?;
    Ok((entry.oid, repo.read_object(&entry.oid)?))
}

/// Find `name` in one tree, reporting every entry inspected.
fn scan<F, E>(
    (id, data): &(ObjectId, Vec<u8>),
    walked: &BString,
    name: &str,
    observer: &mut F,
) -> Result<TreeEntry, RepoError>
where
    F: FnMut(&bstr::BStr, &ObjectId) -> Result<(), E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let entries = extract_tree_entries(data).map_err(|source| RepoError::MalformedTree {
        id: *id,
        source,
    })?;
    for entry in entries {
        let path = join(walked, &entry.name);
        observer(path.as_bstr(), &entry.oid).map_err(|e| RepoError::Aborted {
            path: path.clone(),
            source: e.into(),
        })?;
        if entry.name == name.as_bytes() {
            return Ok(entry);
        }
    }
    Err(RepoError::PathNotFound(join(walked, name.as_bytes())))
}

fn join(dir: &BString, name: &[u8]) -> BString {
    let mut path = dir.clone();
    if !path.is_empty() {
        path.push_byte(b'/');
    }
    path.push_str(name);
    path
}
