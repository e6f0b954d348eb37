use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use grove_repository::RepoRegistry;

#[derive(Args)]
pub struct ReposArgs {
    /// Directory to scan
    #[arg(long, env = "GROVE_ROOT", default_value = ".")]
    root: PathBuf,

    /// Only list repositories whose path starts with this
    #[arg(default_value = "")]
    prefix: String,
}

pub fn run(args: &ReposArgs) -> Result<i32> {
    let registry = RepoRegistry::scan(&args.root)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in registry.with_prefix(&args.prefix) {
        match &entry.description {
            Some(description) => writeln!(out, "{}\t{description}", entry.path)?,
            None => writeln!(out, "{}", entry.path)?,
        }
    }
    out.flush()?;
    Ok(0)
}
