//! Reading `.pack` files.
//!
//! A pack file is a 12-byte header (`PACK`, version, object count), a run of
//! entries, and a trailing checksum. Objects are read by offset; the offset
//! comes from the pack's index.

use std::fs::File;
use std::path::{Path, PathBuf};

use grove_hash::ObjectId;
use grove_object::RawObject;
use memmap2::Mmap;
use tracing::debug;

use crate::entry::{parse_entry_header, EntryKind, PackEntry};
use crate::{delta, search, PackError, MAX_DELTA_CHAIN_DEPTH, PACK_HEADER_SIZE, PACK_SIGNATURE};

/// A memory-mapped pack file.
pub struct PackFile {
    data: Mmap,
    pack_path: PathBuf,
    version: u32,
    num_objects: u32,
}

impl PackFile {
    /// Map a pack file and validate its header.
    pub fn open(pack_path: impl AsRef<Path>) -> Result<Self, PackError> {
        let pack_path = pack_path.as_ref().to_path_buf();
        let io_err = |source| PackError::Io {
            path: pack_path.clone(),
            source,
        };
        let file = File::open(&pack_path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();
        if len < PACK_HEADER_SIZE as u64 {
            return Err(PackError::InvalidHeader(format!(
                "{}: file too small",
                pack_path.display()
            )));
        }
        // SAFETY: the map is read-only and git never rewrites a pack in place.
        let data = unsafe { Mmap::map(&file) }.map_err(io_err)?;
        let (version, num_objects) = parse_header(&data, &pack_path)?;

        Ok(Self {
            data,
            pack_path,
            version,
            num_objects,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Object count from the pack header.
    pub fn num_objects(&self) -> u32 {
        self.num_objects
    }

    pub fn path(&self) -> &Path {
        &self.pack_path
    }

    /// Read and fully resolve the object at `offset`.
    ///
    /// Ref-delta bases are looked up in every pack of the directory this
    /// pack lives in, never among loose objects.
    pub fn read_at(&self, offset: u64) -> Result<RawObject, PackError> {
        self.resolve(offset, 0)
    }

    /// Like [`read_at`](Self::read_at), with a caller-supplied lookup for
    /// ref-delta bases.
    ///
    /// The resolver gets the base id and the number of delta links followed
    /// so far, and returns the fully resolved base or `None`.
    pub fn read_at_with_resolver<F>(&self, offset: u64, resolver: F) -> Result<RawObject, PackError>
    where
        F: FnMut(&ObjectId, usize) -> Result<Option<RawObject>, PackError>,
    {
        self.resolve_with(offset, 0, resolver)
    }

    pub(crate) fn resolve(&self, offset: u64, depth: usize) -> Result<RawObject, PackError> {
        let pack_dir = self
            .pack_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.resolve_with(offset, depth, |oid, depth| {
            search::search_pack_dir(&pack_dir, oid, depth)
        })
    }

    /// Walk the delta chain down to a concrete base, then apply the deltas
    /// innermost-last.
    fn resolve_with<F>(
        &self,
        offset: u64,
        depth: usize,
        mut resolver: F,
    ) -> Result<RawObject, PackError>
    where
        F: FnMut(&ObjectId, usize) -> Result<Option<RawObject>, PackError>,
    {
        let mut deltas: Vec<Vec<u8>> = Vec::new();
        let mut current = offset;

        let base = loop {
            if depth + deltas.len() > MAX_DELTA_CHAIN_DEPTH {
                return Err(PackError::DeltaChainTooDeep {
                    offset,
                    max_depth: MAX_DELTA_CHAIN_DEPTH,
                });
            }

            let entry = self.entry_at(current)?;
            match entry.kind {
                EntryKind::Base(kind) => {
                    break RawObject::new(kind, self.inflate(&entry, current)?);
                }
                EntryKind::OffsetDelta { base_offset } => {
                    deltas.push(self.inflate(&entry, current)?);
                    current = base_offset;
                }
                EntryKind::RefDelta { base_oid } => {
                    deltas.push(self.inflate(&entry, current)?);
                    let base = resolver(&base_oid, depth + deltas.len())?
                        .ok_or(PackError::MissingBase(base_oid))?;
                    if base.kind.is_delta() {
                        return Err(PackError::NestedDelta {
                            base: base_oid,
                            kind: base.kind,
                        });
                    }
                    break base;
                }
            }
        };

        if !deltas.is_empty() {
            debug!(
                pack = %self.pack_path.display(),
                offset,
                chain = deltas.len(),
                "resolving delta chain"
            );
        }

        let kind = base.kind;
        let mut data = base.data;
        for instructions in deltas.iter().rev() {
            data = delta::apply_delta(&data, instructions)?;
        }
        Ok(RawObject::new(kind, data))
    }

    fn entry_at(&self, offset: u64) -> Result<PackEntry, PackError> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|&o| o >= PACK_HEADER_SIZE && o < self.data.len())
            .ok_or(PackError::CorruptEntry {
                offset,
                reason: "offset outside pack",
            })?;
        parse_entry_header(&self.data[start..], offset)
    }

    fn inflate(&self, entry: &PackEntry, offset: u64) -> Result<Vec<u8>, PackError> {
        let start = usize::try_from(entry.data_offset)
            .ok()
            .filter(|&o| o <= self.data.len())
            .ok_or(PackError::CorruptEntry {
                offset,
                reason: "data outside pack",
            })?;
        let hint = usize::try_from(entry.size).unwrap_or(usize::MAX);
        grove_utils::zlib::inflate_with_capacity(&self.data[start..], hint)
            .map_err(|source| PackError::Inflate { offset, source })
    }
}

/// Open `pack_path`, read the object at `offset`, and release the file.
pub fn read_at(pack_path: &Path, offset: u64) -> Result<RawObject, PackError> {
    PackFile::open(pack_path)?.read_at(offset)
}

/// Read a pack's header, returning `(version, object count)`.
pub fn read_pack_header(pack_path: &Path) -> Result<(u32, u32), PackError> {
    use std::io::Read;

    let mut header = [0u8; PACK_HEADER_SIZE];
    File::open(pack_path)
        .and_then(|mut f| f.read_exact(&mut header))
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::UnexpectedEof => {
                PackError::InvalidHeader(format!("{}: file too small", pack_path.display()))
            }
            _ => PackError::Io {
                path: pack_path.to_path_buf(),
                source,
            },
        })?;
    parse_header(&header, pack_path)
}

fn parse_header(data: &[u8], path: &Path) -> Result<(u32, u32), PackError> {
    if &data[0..4] != PACK_SIGNATURE {
        return Err(PackError::InvalidHeader(format!(
            "{}: bad PACK signature",
            path.display()
        )));
    }
    let version = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
    if version != 2 && version != 3 {
        return Err(PackError::UnsupportedVersion(version));
    }
    let num_objects = u32::from_be_bytes([data[8], data[9], data[10], data[11]]);
    Ok((version, num_objects))
}
