use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct PackHeaderArgs {
    /// A `.pack` file
    pack: PathBuf,
}

pub fn run(args: &PackHeaderArgs) -> Result<i32> {
    let (version, objects) = grove_pack::read_pack_header(&args.pack)?;
    println!("signature: PACK");
    println!("version: {version}");
    println!("objects: {objects}");
    Ok(0)
}
