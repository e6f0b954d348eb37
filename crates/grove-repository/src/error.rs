use std::path::PathBuf;

use bstr::BString;
use grove_hash::ObjectId;
use grove_loose::LooseError;
use grove_object::{Commit, ObjectError};
use grove_odb::OdbError;
use grove_pack::PackError;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a git repository: {0}")]
    NotFound(PathBuf),

    #[error("invalid .git file {path}: {reason}")]
    InvalidGitFile { path: PathBuf, reason: String },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed object id: {0:?}")]
    MalformedShasum(String),

    #[error(transparent)]
    Odb(#[from] OdbError),

    #[error("malformed commit {id}")]
    MalformedCommit {
        id: ObjectId,
        #[source]
        source: ObjectError,
    },

    #[error("malformed tree {id}")]
    MalformedTree {
        id: ObjectId,
        #[source]
        source: ObjectError,
    },

    #[error("{0} is not a tree")]
    NotATree(ObjectId),

    #[error("{0} is not a commit")]
    NotACommit(ObjectId),

    #[error("commit {0} appears twice in its own first-parent history")]
    CommitCycle(ObjectId),

    #[error("path not found: {0}")]
    PathNotFound(BString),

    #[error("tree walk stopped at {path}")]
    Aborted {
        path: BString,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Coarse classification of a [`RepoError`], for callers that map failures
/// to responses without inspecting nested errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedShasum,
    MalformedObject,
    MalformedCommit,
    ObjectNotFound,
    NotATree,
    NotACommit,
    NestedDelta,
    Io,
    Aborted,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::InvalidGitFile { .. } | Self::Io { .. } => ErrorKind::Io,
            Self::MalformedShasum(_) => ErrorKind::MalformedShasum,
            Self::Odb(e) => odb_kind(e),
            Self::MalformedCommit { .. } => ErrorKind::MalformedCommit,
            Self::MalformedTree { .. } | Self::CommitCycle(_) => ErrorKind::MalformedObject,
            Self::NotATree(_) => ErrorKind::NotATree,
            Self::NotACommit(_) => ErrorKind::NotACommit,
            Self::PathNotFound(_) => ErrorKind::ObjectNotFound,
            Self::Aborted { .. } => ErrorKind::Aborted,
        }
    }
}

fn odb_kind(err: &OdbError) -> ErrorKind {
    match err {
        OdbError::NotFound(_) => ErrorKind::ObjectNotFound,
        OdbError::Loose(LooseError::Malformed { .. }) => ErrorKind::MalformedObject,
        OdbError::Loose(LooseError::Io { .. } | LooseError::Inflate { .. }) => ErrorKind::Io,
        OdbError::Pack(e) => match e {
            PackError::Io { .. } | PackError::Inflate { .. } => ErrorKind::Io,
            PackError::MissingBase(_) => ErrorKind::ObjectNotFound,
            PackError::NestedDelta { .. } => ErrorKind::NestedDelta,
            PackError::InvalidIndex { .. }
            | PackError::InvalidHeader(_)
            | PackError::UnsupportedVersion(_)
            | PackError::CorruptEntry { .. }
            | PackError::InvalidDelta { .. }
            | PackError::DeltaChainTooDeep { .. } => ErrorKind::MalformedObject,
        },
    }
}

/// A log that stopped early: the commits resolved before `error`, newest
/// first.
#[derive(Debug, thiserror::Error)]
#[error("log stopped after {} commits", .commits.len())]
pub struct PartialLog {
    pub commits: Vec<Commit>,
    #[source]
    pub error: RepoError,
}
