//! Repository access for grove: locating the git directory, resolving
//! `HEAD`, and reading commits, trees and paths through the object database.
//!
//! Every method that takes an id as `&str` accepts either 40 hex characters
//! or the empty string, which stands for `HEAD`'s commit.

mod discover;
mod error;
mod refs;
pub mod registry;
mod walk;

pub use error::{ErrorKind, PartialLog, RepoError};
pub use registry::{RepoEntry, RepoRegistry};

use std::collections::HashSet;
use std::convert::Infallible;
use std::path::{Path, PathBuf};

use bstr::BStr;
use grove_hash::ObjectId;
use grove_object::{Commit, ObjectKind, RawObject};
use grove_odb::ObjectDatabase;

/// An opened repository. `HEAD` is read once at [`open`](Self::open); reopen
/// to observe later changes.
pub struct Repository {
    git_dir: PathBuf,
    head: String,
    odb: ObjectDatabase,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("git_dir", &self.git_dir)
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @{}", self.git_dir.display(), self.head)
    }
}

impl Repository {
    /// Open the repository at `path`: a git directory, a work tree with a
    /// `.git` directory, or a work tree whose `.git` file points elsewhere.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let (git_dir, head) = discover::locate(path.as_ref())?;
        Ok(Self {
            odb: ObjectDatabase::open(git_dir.join("objects")),
            git_dir,
            head,
        })
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Raw `HEAD` contents, whitespace-trimmed.
    pub fn head(&self) -> &str {
        &self.head
    }

    /// The commit `HEAD` points at, or [`ObjectId::NULL`] if it resolves to
    /// nothing. Callers must check for the null id.
    pub fn head_commit(&self) -> ObjectId {
        refs::resolve_head(&self.git_dir, &self.head)
    }

    /// Parse an external id; the empty string means `HEAD`'s commit.
    pub fn resolve_id(&self, id: &str) -> Result<ObjectId, RepoError> {
        if id.is_empty() {
            return Ok(self.head_commit());
        }
        ObjectId::from_hex(id).map_err(|_| RepoError::MalformedShasum(id.to_string()))
    }

    /// Read an object by its external id.
    pub fn object(&self, id: &str) -> Result<RawObject, RepoError> {
        let id = self.resolve_id(id)?;
        self.read_object(&id)
    }

    /// Read an object that must exist.
    pub fn read_object(&self, id: &ObjectId) -> Result<RawObject, RepoError> {
        Ok(self.odb.read_existing(id)?)
    }

    pub fn commit(&self, id: &str) -> Result<Commit, RepoError> {
        let id = self.resolve_id(id)?;
        self.read_commit(&id)
    }

    pub fn read_commit(&self, id: &ObjectId) -> Result<Commit, RepoError> {
        let obj = self.read_object(id)?;
        if obj.kind != ObjectKind::Commit {
            return Err(RepoError::NotACommit(*id));
        }
        Commit::parse(*id, &obj.data)
            .map_err(|source| RepoError::MalformedCommit { id: *id, source })
    }

    /// Raw bytes of a tree object.
    pub fn tree(&self, id: &str) -> Result<Vec<u8>, RepoError> {
        let id = self.resolve_id(id)?;
        self.read_tree(&id)
    }

    pub fn read_tree(&self, id: &ObjectId) -> Result<Vec<u8>, RepoError> {
        let obj = self.read_object(id)?;
        if obj.kind != ObjectKind::Tree {
            return Err(RepoError::NotATree(*id));
        }
        Ok(obj.data)
    }

    /// First-parent history from `id`, newest first.
    ///
    /// A commit that fails to load ends the walk; the commits read before it
    /// come back inside the [`PartialLog`]. So does a commit seen twice, which
    /// only a forged parent link can produce.
    pub fn log(&self, id: &str) -> Result<Vec<Commit>, PartialLog> {
        let mut commits = Vec::new();
        let mut next = match self.resolve_id(id) {
            Ok(id) => id,
            Err(error) => return Err(PartialLog { commits, error }),
        };
        let mut seen = HashSet::new();
        loop {
            if !seen.insert(next) {
                let error = RepoError::CommitCycle(next);
                return Err(PartialLog { commits, error });
            }
            let commit = match self.read_commit(&next) {
                Ok(commit) => commit,
                Err(error) => return Err(PartialLog { commits, error }),
            };
            let parent = commit.first_parent().copied();
            commits.push(commit);
            match parent {
                Some(parent) => next = parent,
                None => return Ok(commits),
            }
        }
    }

    /// Resolve `path` inside the tree of commit `commit`.
    pub fn walk_to_path(&self, commit: &str, path: &str) -> Result<RawObject, RepoError> {
        self.walk_to_path_with(commit, path, |_, _| Ok::<(), Infallible>(()))
            .map(|(_, obj)| obj)
    }

    /// [`walk_to_path`](Self::walk_to_path), calling `observer` with the
    /// cumulative path and id of every tree entry scanned. An observer error
    /// stops the walk with [`RepoError::Aborted`].
    ///
    /// Also returns the id of the object reached; for the root path that is
    /// the commit's tree.
    pub fn walk_to_path_with<F, E>(
        &self,
        commit: &str,
        path: &str,
        mut observer: F,
    ) -> Result<(ObjectId, RawObject), RepoError>
    where
        F: FnMut(&BStr, &ObjectId) -> Result<(), E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let commit = self.commit(commit)?;
        let root = self.read_tree(&commit.tree)?;
        walk::walk_tree(self, commit.tree, root, path, &mut observer)
    }
}
