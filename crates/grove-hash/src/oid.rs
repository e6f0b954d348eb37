use std::fmt;
use std::str::FromStr;

use crate::{hex, HashError};

/// Length of a raw object id in bytes.
pub const RAW_LEN: usize = 20;
/// Length of an object id in hex characters.
pub const HEX_LEN: usize = 40;

/// A git object identifier: the SHA-1 of an object's content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId([u8; RAW_LEN]);

impl ObjectId {
    /// The all-zero id. Repository lookups use it to mean "no commit".
    pub const NULL: Self = Self([0u8; RAW_LEN]);

    /// Build an id from exactly 20 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        let raw: [u8; RAW_LEN] = bytes.try_into().map_err(|_| HashError::InvalidLength {
            expected: RAW_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(raw))
    }

    /// Parse an id from exactly 40 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        if s.len() != HEX_LEN {
            return Err(HashError::InvalidHexLength {
                expected: HEX_LEN,
                actual: s.len(),
            });
        }
        let mut raw = [0u8; RAW_LEN];
        hex::decode_into(s, &mut raw)?;
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8; RAW_LEN] {
        &self.0
    }

    /// Lowercase 40-character hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Leading byte, used to pick a pack index fanout bucket.
    pub fn first_byte(&self) -> u8 {
        self.0[0]
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; RAW_LEN]
    }

    /// Path of the loose object relative to `objects/`: `"xx/yyyy..."`.
    pub fn loose_path(&self) -> String {
        let hex = self.to_hex();
        format!("{}/{}", &hex[..2], &hex[2..])
    }
}

impl From<[u8; RAW_LEN]> for ObjectId {
    fn from(raw: [u8; RAW_LEN]) -> Self {
        Self(raw)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
