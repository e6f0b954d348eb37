use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct HeadArgs {
    /// Repository or git directory
    repo: PathBuf,
}

/// Prints 40 zeros when HEAD does not resolve.
pub fn run(args: &HeadArgs) -> Result<i32> {
    let repo = open_repo(&args.repo)?;
    println!("{}", repo.head_commit());
    Ok(0)
}
