//! The set of repositories found under a root directory.
//!
//! A registry is built once by [`RepoRegistry::scan`] and never changes;
//! rescan to pick up new repositories.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{RepoError, Repository};

/// One registered repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Last component of the repository's directory.
    pub name: String,
    /// Directory relative to the registry root, `/`-separated. Empty when the
    /// root itself is a repository.
    pub path: String,
    pub git_dir: PathBuf,
    /// Contents of the `description` file, unless absent or git's default.
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RepoRegistry {
    root: PathBuf,
    entries: Vec<RepoEntry>,
}

impl RepoRegistry {
    /// Walk `root` and register every work tree with a `.git` directory and
    /// every bare repository (a directory holding `config` and `HEAD`).
    ///
    /// Repositories are not searched for nested ones. Directories that cannot
    /// be read and repositories that fail to open are logged and skipped.
    pub fn scan(root: impl AsRef<Path>) -> Result<Self, RepoError> {
        let root = root.as_ref().to_path_buf();
        if let Err(source) = std::fs::read_dir(&root) {
            return Err(RepoError::Io { path: root, source });
        }
        debug!(root = %root.display(), "scanning for repositories");

        let mut entries = Vec::new();
        let mut walker = WalkDir::new(&root).sort_by_file_name().into_iter();
        while let Some(item) = walker.next() {
            let dir = match item {
                Ok(dir) => dir,
                Err(e) => {
                    warn!(error = %e, "cannot open directory");
                    continue;
                }
            };
            if !dir.file_type().is_dir() {
                continue;
            }

            let repo_dir = if dir.file_name() == ".git" {
                match dir.path().parent() {
                    Some(parent) => parent.to_path_buf(),
                    None => continue,
                }
            } else if dir.path().join("config").is_file() && dir.path().join("HEAD").is_file() {
                dir.path().to_path_buf()
            } else {
                continue;
            };
            walker.skip_current_dir();

            match Repository::open(&repo_dir) {
                Ok(repo) => entries.push(entry_for(&root, &repo_dir, repo.git_dir())),
                Err(e) => warn!(
                    path = %repo_dir.display(),
                    error = %e,
                    "failed to open repository"
                ),
            }
        }

        info!(root = %root.display(), count = entries.len(), "registered repositories");
        Ok(Self { root, entries })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[RepoEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry whose relative path is exactly `path` (leading `/` ignored).
    pub fn get(&self, path: &str) -> Option<&RepoEntry> {
        let path = path.trim_matches('/');
        self.entries.iter().find(|e| e.path == path)
    }

    /// Entries whose relative path starts with `prefix` (leading `/` ignored).
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a RepoEntry> + 'a {
        let prefix = prefix.trim_start_matches('/');
        self.entries.iter().filter(move |e| e.path.starts_with(prefix))
    }
}

fn entry_for(root: &Path, repo_dir: &Path, git_dir: &Path) -> RepoEntry {
    let relative = repo_dir.strip_prefix(root).unwrap_or(repo_dir);
    let path = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let name = repo_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let description = std::fs::read_to_string(git_dir.join("description"))
        .ok()
        .map(|d| d.trim_end().to_string())
        .filter(|d| !d.is_empty() && !d.starts_with("Unnamed repository"));

    RepoEntry {
        name,
        path,
        git_dir: git_dir.to_path_buf(),
        description,
    }
}
