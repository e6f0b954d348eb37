use std::fmt;

use bstr::{BString, ByteSlice};
use grove_hash::{ObjectId, RAW_LEN};

use crate::ObjectError;

/// Mode string of a subdirectory entry.
pub const DIRECTORY_MODE: &str = "40000";

/// A single entry of a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Octal mode exactly as stored, e.g. `"100644"` or `"40000"`.
    pub mode: String,
    pub name: BString,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn is_directory(&self) -> bool {
        self.mode == DIRECTORY_MODE
    }
}

impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) [{}] {}", &self.oid.to_hex()[..9], self.mode, self.name)?;
        if self.is_directory() {
            f.write_str("/")?;
        }
        Ok(())
    }
}

/// Parse the body of a tree object into its entries, in stored order.
///
/// Each entry is `<mode> <name>\0<20-byte id>`.
pub fn extract_tree_entries(data: &[u8]) -> Result<Vec<TreeEntry>, ObjectError> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let rest = &data[pos..];

        let space = rest.find_byte(b' ').ok_or(ObjectError::InvalidTreeEntry {
            offset: pos,
            reason: "missing space after mode",
        })?;
        let mode = std::str::from_utf8(&rest[..space])
            .ok()
            .filter(|m| !m.is_empty() && m.bytes().all(|b| b.is_ascii_digit()))
            .ok_or(ObjectError::InvalidTreeEntry {
                offset: pos,
                reason: "invalid mode",
            })?;

        let name_start = space + 1;
        let nul = rest[name_start..]
            .find_byte(0)
            .ok_or(ObjectError::InvalidTreeEntry {
                offset: pos,
                reason: "missing null after name",
            })?
            + name_start;

        let id_start = nul + 1;
        let id_bytes = rest
            .get(id_start..id_start + RAW_LEN)
            .ok_or(ObjectError::InvalidTreeEntry {
                offset: pos,
                reason: "truncated object id",
            })?;
        let oid = ObjectId::from_bytes(id_bytes).map_err(|_| ObjectError::InvalidTreeEntry {
            offset: pos,
            reason: "truncated object id",
        })?;

        entries.push(TreeEntry {
            mode: mode.to_owned(),
            name: BString::from(&rest[name_start..nul]),
            oid,
        });
        pos += id_start + RAW_LEN;
    }

    Ok(entries)
}
