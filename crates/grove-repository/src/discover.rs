use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::RepoError;

/// Locate the git directory for `path` and read its `HEAD`.
///
/// Tried in order:
/// 1. `path/HEAD` exists: `path` is the git directory (bare repo or `.git`).
/// 2. `path/.git` is a directory holding `HEAD`.
/// 3. `path/.git` is a file with a `gitdir: <path>` line (submodules,
///    linked worktrees); the target is resolved relative to `path`.
pub(crate) fn locate(path: &Path) -> Result<(PathBuf, String), RepoError> {
    if let Some(head) = read_head(path)? {
        debug!(git_dir = %path.display(), "opened git directory");
        return Ok((path.to_path_buf(), head));
    }

    let dot_git = path.join(".git");
    let meta = match std::fs::metadata(&dot_git) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RepoError::NotFound(path.to_path_buf()))
        }
        Err(source) => return Err(RepoError::Io { path: dot_git, source }),
    };

    let git_dir = if meta.is_dir() {
        dot_git
    } else {
        let target = parse_gitdir_file(&dot_git)?;
        std::fs::canonicalize(path.join(&target)).map_err(|e| RepoError::InvalidGitFile {
            path: dot_git.clone(),
            reason: format!("cannot resolve gitdir {}: {e}", target.display()),
        })?
    };

    match read_head(&git_dir)? {
        Some(head) => {
            debug!(git_dir = %git_dir.display(), "opened git directory");
            Ok((git_dir, head))
        }
        None => Err(RepoError::NotFound(path.to_path_buf())),
    }
}

/// `HEAD` contents, trimmed. `None` when there is no `HEAD` file.
fn read_head(git_dir: &Path) -> Result<Option<String>, RepoError> {
    let path = git_dir.join("HEAD");
    match std::fs::read_to_string(&path) {
        Ok(head) => Ok(Some(head.trim().to_string())),
        // `git_dir` may itself be a regular file
        Err(e) if e.kind() == io::ErrorKind::NotFound || !git_dir.is_dir() => Ok(None),
        Err(source) => Err(RepoError::Io { path, source }),
    }
}

/// Parse a `.git` file for its `gitdir:` line.
pub(crate) fn parse_gitdir_file(path: &Path) -> Result<PathBuf, RepoError> {
    let content = std::fs::read_to_string(path).map_err(|source| RepoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    content
        .lines()
        .find_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("gitdir:"), Some(target)) => Some(PathBuf::from(target)),
                _ => None,
            }
        })
        .ok_or_else(|| RepoError::InvalidGitFile {
            path: path.to_path_buf(),
            reason: "no 'gitdir:' line".to_string(),
        })
}
