//! `HEAD` resolution.
//!
//! Only two ref sources are consulted: the loose ref file under the git
//! directory and the `info/refs` listing that `git update-server-info`
//! writes for dumb-HTTP clones.

use std::path::Path;

use grove_hash::{ObjectId, HEX_LEN};
use tracing::{debug, warn};

/// Resolve a trimmed `HEAD` value to a commit id.
///
/// Returns [`ObjectId::NULL`] when nothing resolves; that is a valid
/// outcome (unborn branch, dangling ref), not an error.
pub(crate) fn resolve_head(git_dir: &Path, head: &str) -> ObjectId {
    let mut fields = head.split_whitespace();
    let Some(first) = fields.next() else {
        return ObjectId::NULL;
    };
    if first.len() == HEX_LEN {
        return parse_or_null(first, "HEAD");
    }
    if !head.starts_with("ref: ") {
        warn!(head, "unrecognized HEAD");
        return ObjectId::NULL;
    }
    let Some(refname) = fields.next() else {
        return ObjectId::NULL;
    };

    if let Ok(contents) = std::fs::read_to_string(git_dir.join(refname)) {
        debug!(refname, "resolved HEAD from ref file");
        return parse_or_null(contents.trim(), refname);
    }

    if let Ok(listing) = std::fs::read_to_string(git_dir.join("info").join("refs")) {
        let hit = listing.lines().find_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(id), Some(name)) if name == refname => Some(id),
                _ => None,
            }
        });
        if let Some(id) = hit {
            debug!(refname, "resolved HEAD from info/refs");
            return parse_or_null(id, refname);
        }
    }

    debug!(refname, "HEAD does not resolve");
    ObjectId::NULL
}

fn parse_or_null(hex: &str, source: &str) -> ObjectId {
    ObjectId::from_hex(hex).unwrap_or_else(|e| {
        warn!(source, value = hex, error = %e, "ref does not hold an object id");
        ObjectId::NULL
    })
}
