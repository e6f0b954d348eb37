use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct InflateArgs {
    /// A zlib-compressed file, such as a loose object
    file: PathBuf,
}

pub fn run(args: &InflateArgs) -> Result<i32> {
    let file = File::open(&args.file)
        .with_context(|| format!("cannot open '{}'", args.file.display()))?;
    let data = grove_utils::zlib::inflate_reader(BufReader::new(file), 0)
        .with_context(|| format!("cannot inflate '{}'", args.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(&data)?;
    out.flush()?;
    Ok(0)
}
