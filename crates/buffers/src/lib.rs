//! Byte buffer primitives for the mpack codec.
//!
//! - [`Writer`] appends big-endian scalars, tag/payload combos and raw bytes
//!   to a growing buffer.
//! - [`Reader`] reads from the front of a borrowed byte slice with bounds
//!   checks and hands back the unconsumed suffix.
//!
//! # Example
//!
//! ```
//! use mpack_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.u16(), Ok(0x0203));
//! assert_eq!(reader.utf8(5), Ok("hello"));
//! assert!(reader.rest().is_empty());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::{Writer, DEFAULT_CAPACITY};

use thiserror::Error;

/// Error type for buffer reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer")]
    EndOfBuffer,
    /// Bytes requested as text are not valid UTF-8.
    #[error("invalid UTF-8 sequence")]
    InvalidUtf8,
}
