use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use grove_hash::ObjectId;

#[derive(Args)]
pub struct SearchIndexArgs {
    /// A version 2 `.idx` file
    idx: PathBuf,

    /// 40-hex object id
    id: String,
}

pub fn run(args: &SearchIndexArgs) -> Result<i32> {
    let id = ObjectId::from_hex(&args.id)
        .with_context(|| format!("invalid object id '{}'", args.id))?;
    match grove_pack::index::search(&args.idx, &id)? {
        Some(offset) => println!("{offset}"),
        None => println!("not found"),
    }
    Ok(0)
}
