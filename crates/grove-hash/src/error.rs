/// Errors produced while decoding object ids.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid hex character at position {position}: '{character}'")]
    InvalidHex { position: usize, character: char },

    #[error("malformed object id: expected {expected} hex characters, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },

    #[error("malformed object id: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
