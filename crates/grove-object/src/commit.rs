use std::fmt;

use bstr::{BString, ByteSlice};
use grove_hash::ObjectId;
use tracing::warn;

use crate::ObjectError;

/// A parsed commit object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Id the commit was read under.
    pub id: ObjectId,
    /// Root tree.
    pub tree: ObjectId,
    /// Parents in stored order. The first is the primary parent.
    pub parents: Vec<ObjectId>,
    /// Raw `author` value, identity and timestamp unparsed.
    pub author: Option<BString>,
    /// Raw `committer` value.
    pub committer: Option<BString>,
    /// Everything after the header block, byte for byte.
    pub message: BString,
}

impl Commit {
    /// Parse commit text read under `id`.
    ///
    /// Headers run until the first empty line. `tree` is mandatory, `parent`
    /// may repeat, a repeated `author` or `committer` overwrites the earlier
    /// one, and unknown headers are skipped. Without an empty line the message
    /// is whatever follows the last recognized header.
    pub fn parse(id: ObjectId, text: &[u8]) -> Result<Self, ObjectError> {
        let lines: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();

        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;
        let mut message_start = None;
        let mut last_header = None;

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                message_start = Some(i + 1);
                break;
            }
            let Some((key, value)) = line.split_once_str(" ") else {
                continue;
            };
            match key {
                b"tree" => tree = Some(parse_id("tree", value)?),
                b"parent" => parents.push(parse_id("parent", value)?),
                b"author" => author = Some(BString::from(value)),
                b"committer" => committer = Some(BString::from(value)),
                _ => continue,
            }
            last_header = Some(i);
        }

        let tree = tree.ok_or(ObjectError::MissingCommitField { field: "tree" })?;
        if author.is_none() || committer.is_none() {
            warn!(commit = %id, "commit is missing author or committer");
        }

        let start = message_start.unwrap_or_else(|| last_header.map_or(lines.len(), |i| i + 1));
        let message = lines.get(start..).unwrap_or_default().join(&b'\n');

        Ok(Self {
            id,
            tree,
            parents,
            author,
            committer,
            message: BString::from(message),
        })
    }

    /// The parent a first-parent history walk follows.
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

fn parse_id(field: &'static str, value: &[u8]) -> Result<ObjectId, ObjectError> {
    let hex = value.to_str_lossy();
    ObjectId::from_hex(hex.trim_end())
        .map_err(|source| ObjectError::InvalidCommitId { field, source })
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit {}", self.id)?;
        f.write_str("Author: ")?;
        if let Some(author) = &self.author {
            write!(f, "{author}")?;
        }
        writeln!(f)?;
        writeln!(f, "Tree: {}", self.tree)?;
        for (i, parent) in self.parents.iter().enumerate() {
            writeln!(f, "Parent[{i}]: {parent}")?;
        }
        write!(f, "\n{}", self.message)
    }
}
