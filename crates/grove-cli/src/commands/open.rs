use std::convert::Infallible;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{open_repo, write_object};

#[derive(Args)]
pub struct OpenArgs {
    /// Repository or git directory
    repo: PathBuf,

    /// Slash-separated path inside the tree; `.` for the root
    path: String,

    /// Commit to read from; defaults to HEAD
    #[arg(default_value = "")]
    commit: String,
}

pub fn run(args: &OpenArgs) -> Result<i32> {
    let repo = open_repo(&args.repo)?;

    let (leaf, obj) =
        repo.walk_to_path_with(&args.commit, &args.path, |_, _| Ok::<(), Infallible>(()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_object(&mut out, leaf, &obj)?;
    out.flush()?;
    Ok(0)
}
