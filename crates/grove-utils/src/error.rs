/// Base error type for grove-utils operations.
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    #[error("truncated varint after {read} bytes")]
    TruncatedVarint { read: usize },

    #[error("varint overflows a 64-bit integer")]
    VarintOverflow,

    #[error("zlib stream error: {0}")]
    Inflate(#[source] std::io::Error),
}
