use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{open_repo, write_object};

#[derive(Args)]
pub struct ObjectArgs {
    /// Repository or git directory
    repo: PathBuf,

    /// 40-hex object id; defaults to HEAD's commit
    #[arg(default_value = "")]
    id: String,
}

pub fn run(args: &ObjectArgs) -> Result<i32> {
    let repo = open_repo(&args.repo)?;
    let id = repo.resolve_id(&args.id)?;
    let obj = repo.read_object(&id)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_object(&mut out, id, &obj)?;
    out.flush()?;
    Ok(0)
}
