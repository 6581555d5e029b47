//! Codec error types.

use mpack_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unsupported tag 0x{tag:02x} at offset {offset}")]
    UnsupportedTag { tag: u8, offset: usize },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("{remaining} trailing bytes after value")]
    TrailingBytes { remaining: usize },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unsigned integer at offset {offset} does not fit in i64")]
    IntegerOverflow { offset: usize },
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => DecodeError::UnexpectedEndOfInput,
            // Callers that know the position map this themselves.
            BufferError::InvalidUtf8 => DecodeError::InvalidUtf8 { offset: 0 },
        }
    }
}

/// A value that cannot be represented by [`Value`](crate::Value).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("integer {0} is outside the signed 64-bit range")]
    IntegerOutOfRange(u64),
}
