//! Single-frame zlib decoding.
//!
//! Loose objects are one zlib stream per file. Pack entries are one zlib
//! stream each, packed back to back, so the decoder must stop at the end of
//! its own stream and ignore whatever follows.

use std::io::{BufRead, Read};

use flate2::bufread::ZlibDecoder;

use crate::{Result, UtilError};

/// Upper bound on how much a caller-supplied size hint may preallocate.
const MAX_PREALLOC: usize = 16 << 20;

/// Decompress the zlib stream at the front of `compressed`.
///
/// Bytes after the end of the stream are ignored.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    inflate_with_capacity(compressed, 0)
}

/// Like [`inflate`], preallocating for an expected decompressed size.
///
/// The hint comes from on-disk headers and is never trusted beyond
/// sizing the first allocation.
pub fn inflate_with_capacity(compressed: &[u8], size_hint: usize) -> Result<Vec<u8>> {
    inflate_reader(compressed, size_hint)
}

/// Decompress one zlib stream pulled from a buffered reader.
pub fn inflate_reader<R: BufRead>(reader: R, size_hint: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(reader);
    let mut buf = Vec::with_capacity(size_hint.min(MAX_PREALLOC));
    decoder.read_to_end(&mut buf).map_err(UtilError::Inflate)?;
    Ok(buf)
}
