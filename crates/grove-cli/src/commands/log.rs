use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use grove_object::Commit;

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Repository or git directory
    repo: PathBuf,

    /// Commit to start from; defaults to HEAD
    #[arg(default_value = "")]
    id: String,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let repo = open_repo(&args.repo)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match repo.log(&args.id) {
        Ok(commits) => {
            write_commits(&mut out, &commits)?;
            Ok(0)
        }
        Err(partial) => {
            write_commits(&mut out, &partial.commits)?;
            out.flush()?;
            eprintln!("error: {:#}", anyhow::Error::new(partial.error));
            Ok(1)
        }
    }
}

fn write_commits(out: &mut impl Write, commits: &[Commit]) -> Result<()> {
    for (i, commit) in commits.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{commit}")?;
    }
    out.flush()?;
    Ok(())
}
