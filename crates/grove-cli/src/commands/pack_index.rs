use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use grove_pack::PackIndex;

#[derive(Args)]
pub struct PackIndexArgs {
    /// A version 2 `.idx` file
    idx: PathBuf,
}

pub fn run(args: &PackIndexArgs) -> Result<i32> {
    let index = PackIndex::open(&args.idx)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for item in index.iter() {
        let (id, offset) = item?;
        writeln!(out, "{id} {offset}")?;
    }
    out.flush()?;
    Ok(0)
}
