pub mod head;
pub mod inflate;
pub mod log;
pub mod object;
pub mod open;
pub mod pack_header;
pub mod pack_index;
pub mod repos;
pub mod search_index;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use grove_hash::ObjectId;
use grove_object::{extract_tree_entries, Commit, ObjectKind, RawObject};
use grove_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Print an object (default: the commit HEAD points at)
    Object(object::ObjectArgs),
    /// Print the object at a path inside a commit's tree
    Open(open::OpenArgs),
    /// Show first-parent history
    Log(log::LogArgs),
    /// Print the commit HEAD resolves to
    Head(head::HeadArgs),
    /// Decompress a zlib file to stdout
    Inflate(inflate::InflateArgs),
    /// Show a packfile's header
    PackHeader(pack_header::PackHeaderArgs),
    /// List the objects in a pack index
    PackIndex(pack_index::PackIndexArgs),
    /// Look up one object in a pack index
    SearchIndex(search_index::SearchIndexArgs),
    /// List the repositories found under a directory
    Repos(repos::ReposArgs),
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Object(args) => object::run(args),
        Commands::Open(args) => open::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Head(args) => head::run(args),
        Commands::Inflate(args) => inflate::run(args),
        Commands::PackHeader(args) => pack_header::run(args),
        Commands::PackIndex(args) => pack_index::run(args),
        Commands::SearchIndex(args) => search_index::run(args),
        Commands::Repos(args) => repos::run(args),
    }
}

pub fn open_repo(path: &Path) -> Result<Repository> {
    Repository::open(path).with_context(|| format!("cannot open repository '{}'", path.display()))
}

/// Print an object the way `object` and `open` show it: trees as one entry
/// per line, commits in their display form, anything else verbatim.
pub fn write_object(out: &mut impl Write, id: ObjectId, obj: &RawObject) -> Result<()> {
    match obj.kind {
        ObjectKind::Tree => {
            for entry in extract_tree_entries(&obj.data)? {
                writeln!(out, "{entry}")?;
            }
        }
        ObjectKind::Commit => write!(out, "{}", Commit::parse(id, &obj.data)?)?,
        _ => out.write_all(&obj.data)?,
    }
    Ok(())
}
