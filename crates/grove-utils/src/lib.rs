//! Foundation codecs shared by the grove object readers.
//!
//! Both loose objects and pack entries are zlib streams, and the pack format
//! uses two different variable-length integer encodings. Neither concern knows
//! anything about git objects, so they live here at the bottom of the crate graph.

pub mod error;
pub mod varint;
pub mod zlib;

pub use error::UtilError;

pub type Result<T> = std::result::Result<T, UtilError>;
