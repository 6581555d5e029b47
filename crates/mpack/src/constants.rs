//! Wire tag bytes.
//!
//! Binary (`0xc4..=0xc6`) and extension (`0xc7..=0xc9`, `0xd4..=0xd8`) tags
//! are part of the format but not of this codec, and `0xc1` is never used by
//! the format. The decoder rejects all of them with
//! [`DecodeError::UnsupportedTag`](crate::DecodeError::UnsupportedTag).

pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;

pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;

pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;

pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

/// Positive fixint: `0x00..=0x7f`, the tag is the value.
pub const POSITIVE_FIXINT_MAX: u8 = 0x7f;
/// Negative fixint: `0xe0..=0xff`, the tag is the value as `i8`.
pub const NEGATIVE_FIXINT_MIN: u8 = 0xe0;

/// Fixmap: `0x80..=0x8f`, low nibble is the pair count.
pub const FIXMAP: u8 = 0x80;
/// Fixarray: `0x90..=0x9f`, low nibble is the element count.
pub const FIXARRAY: u8 = 0x90;
/// Fixstr: `0xa0..=0xbf`, low five bits are the byte length.
pub const FIXSTR: u8 = 0xa0;

pub const FIXSTR_MASK: u8 = 0x1f;
pub const FIXCOLLECTION_MASK: u8 = 0x0f;

/// Longest string (in bytes) that fits a fixstr tag.
pub const MAX_FIXSTR_LEN: usize = 31;
/// Longest array or map that fits a fixarray/fixmap tag.
pub const MAX_FIXCOLLECTION_LEN: usize = 15;
