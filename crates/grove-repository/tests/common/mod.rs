//! Synthetic repositories written object by object.
//!
//! Ids are labels handed out by a counter; nothing on the read path hashes
//! content, so there is no need to compute real SHA-1s.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use grove_hash::ObjectId;

pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub git_dir: PathBuf,
    next: u8,
}

impl Fixture {
    /// A bare repository at the temp dir root, `HEAD` on `refs/heads/main`.
    pub fn bare() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().to_path_buf();
        init_git_dir(&git_dir);
        Self { dir, git_dir, next: 1 }
    }

    /// A work tree with its git directory at `.git/`.
    pub fn work_tree() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let git_dir = dir.path().join(".git");
        init_git_dir(&git_dir);
        Self { dir, git_dir, next: 1 }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&mut self, kind: &str, data: &[u8]) -> ObjectId {
        let mut raw = [0x5a; 20];
        raw[0] = self.next;
        raw[19] = self.next;
        self.next += 1;
        let id = ObjectId::from(raw);
        self.write_as(&id, kind, data);
        id
    }

    pub fn write_as(&self, id: &ObjectId, kind: &str, data: &[u8]) {
        let mut content = format!("{kind} {}\0", data.len()).into_bytes();
        content.extend_from_slice(data);
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&content).unwrap();

        let path = self.git_dir.join("objects").join(id.loose_path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, enc.finish().unwrap()).unwrap();
    }

    pub fn blob(&mut self, data: &[u8]) -> ObjectId {
        self.write("blob", data)
    }

    /// `entries` are `(mode, name, id)`.
    pub fn tree(&mut self, entries: &[(&str, &str, ObjectId)]) -> ObjectId {
        let mut data = Vec::new();
        for (mode, name, id) in entries {
            data.extend_from_slice(mode.as_bytes());
            data.push(b' ');
            data.extend_from_slice(name.as_bytes());
            data.push(0);
            data.extend_from_slice(id.as_bytes());
        }
        self.write("tree", &data)
    }

    pub fn commit(&mut self, tree: ObjectId, parents: &[ObjectId], message: &str) -> ObjectId {
        let id = self.write("commit", b"");
        self.commit_as(&id, tree, parents, message);
        id
    }

    /// Write a commit under a chosen id, e.g. to rewrite history in place.
    pub fn commit_as(&self, id: &ObjectId, tree: ObjectId, parents: &[ObjectId], message: &str) {
        let mut text = format!("tree {tree}\n");
        for parent in parents {
            text.push_str(&format!("parent {parent}\n"));
        }
        text.push_str("author A U Thor <author@example.com> 1700000000 +0000\n");
        text.push_str("committer C O Mitter <committer@example.com> 1700000000 +0000\n");
        text.push('\n');
        text.push_str(message);
        self.write_as(id, "commit", text.as_bytes());
    }

    pub fn set_ref(&self, name: &str, id: &ObjectId) {
        let path = self.git_dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, format!("{id}\n")).unwrap();
    }

    pub fn set_head(&self, contents: &str) {
        std::fs::write(self.git_dir.join("HEAD"), contents).unwrap();
    }
}

pub fn init_git_dir(git_dir: &Path) {
    std::fs::create_dir_all(git_dir.join("objects").join("pack")).unwrap();
    std::fs::create_dir_all(git_dir.join("refs").join("heads")).unwrap();
    std::fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
    std::fs::write(git_dir.join("config"), "[core]\n\trepositoryformatversion = 0\n").unwrap();
}
