//! Object identity for grove.
//!
//! Every object in a repository is named by the 20-byte SHA-1 of its content.
//! This crate provides [`ObjectId`] and the hex codec used to move ids between
//! their on-disk binary form and the 40-character form users see.

mod error;
pub mod hex;
mod oid;

pub use error::HashError;
pub use oid::{ObjectId, HEX_LEN, RAW_LEN};
