//! Error types for the wire codec.

/// Error raised while decoding wire data.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("invalid character {ch:?} at offset {offset} in bit-encoded data")]
    InvalidBitEncoding { offset: usize, ch: char },
    #[error("malformed record: {0}")]
    Malformed(#[from] postcard::Error),
    #[error("{0} trailing bytes after record")]
    TrailingBytes(usize),
    #[error("string id {id} out of range (table has {len} entries)")]
    StringIdOutOfRange { id: u32, len: usize },
    #[error("truncated input: needed {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("negative length: {0}")]
    NegativeLength(i32),
}
