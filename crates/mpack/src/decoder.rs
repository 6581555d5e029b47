//! `Decoder` — recursive-descent decoder that threads the unconsumed suffix.
//!
//! Each step reads one value from the front of a byte slice and returns it
//! together with the exact remainder. Container children are decoded one
//! after another from the remainder the previous child left, so siblings stay
//! aligned and bytes after the value (another message, say) are handed back
//! untouched.

use std::iter::FusedIterator;

use mpack_buffers::{BufferError, Reader};

use crate::constants::*;
use crate::error::DecodeError;
use crate::Value;

/// Containers nested deeper than this are rejected by [`Decoder::new`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Decoder configuration. Decoding itself keeps no state, so one decoder can
/// be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Limits how many containers may be open at once. A top-level array
    /// counts as one level; scalars count as none.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes the value at the front of `input`.
    ///
    /// Returns the value and the bytes that follow it. The remainder is
    /// not required to be empty; see [`Decoder::decode_exact`].
    pub fn decode<'a>(&self, input: &'a [u8]) -> Result<(Value, &'a [u8]), DecodeError> {
        self.pass(input)
            .read_any(input, 0)
            .inspect_err(|err| log_rejection(err, input.len()))
    }

    /// Decodes exactly one value and fails if anything follows it.
    pub fn decode_exact(&self, input: &[u8]) -> Result<Value, DecodeError> {
        let (value, rest) = self.decode(input)?;
        ensure_consumed(rest, input.len())?;
        Ok(value)
    }

    /// Steps over the value at the front of `input` without building it.
    ///
    /// Applies the same checks as [`Decoder::decode`] and returns the same
    /// remainder.
    pub fn skip<'a>(&self, input: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        self.pass(input)
            .skip_any(input, 0)
            .inspect_err(|err| log_rejection(err, input.len()))
    }

    /// Checks that `input` holds exactly one well-formed value.
    pub fn validate(&self, input: &[u8]) -> Result<(), DecodeError> {
        let rest = self.skip(input)?;
        ensure_consumed(rest, input.len())
    }

    /// Iterates over values laid out back-to-back in `input`.
    pub fn iter<'a>(&self, input: &'a [u8]) -> Values<'a> {
        Values {
            pass: self.pass(input),
            rest: input,
            failed: false,
        }
    }

    fn pass(&self, input: &[u8]) -> Pass {
        Pass {
            len: input.len(),
            max_depth: self.max_depth,
        }
    }
}

fn ensure_consumed(rest: &[u8], len: usize) -> Result<(), DecodeError> {
    if rest.is_empty() {
        return Ok(());
    }
    let err = DecodeError::TrailingBytes {
        remaining: rest.len(),
    };
    log_rejection(&err, len);
    Err(err)
}

fn log_rejection(err: &DecodeError, input_len: usize) {
    tracing::debug!(error = %err, input_len, "rejected mpack input");
}

/// Iterator returned by [`Decoder::iter`].
///
/// Yields one `Result` per value and stops after the first error.
#[derive(Debug, Clone)]
pub struct Values<'a> {
    pass: Pass,
    rest: &'a [u8],
    failed: bool,
}

impl<'a> Values<'a> {
    /// Bytes not yet decoded. After an error this starts at the value that
    /// failed.
    pub fn rest(&self) -> &'a [u8] {
        self.rest
    }
}

impl Iterator for Values<'_> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        match self.pass.read_any(self.rest, 0) {
            Ok((value, rest)) => {
                self.rest = rest;
                Some(Ok(value))
            }
            Err(err) => {
                log_rejection(&err, self.pass.len);
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Values<'_> {}

/// What a tag (plus any fixed-size payload) announced.
enum Head<'a> {
    Scalar(Value),
    Str(&'a str),
    Array(usize),
    Map(usize),
}

/// One decode over a buffer of `len` bytes; error offsets are relative to
/// its start.
#[derive(Debug, Clone, Copy)]
struct Pass {
    len: usize,
    max_depth: usize,
}

impl Pass {
    fn offset(&self, reader: &Reader<'_>) -> usize {
        self.len - reader.uint8.len() + reader.x
    }

    fn enter(&self, depth: usize) -> Result<usize, DecodeError> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(DecodeError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(depth)
    }

    fn read_any<'a>(
        &self,
        input: &'a [u8],
        depth: usize,
    ) -> Result<(Value, &'a [u8]), DecodeError> {
        let mut reader = Reader::new(input);
        let value = match self.read_head(&mut reader)? {
            Head::Scalar(value) => value,
            Head::Str(s) => Value::String(s.to_owned()),
            Head::Array(size) => {
                let depth = self.enter(depth)?;
                let mut rest = reader.rest();
                let mut arr = Vec::with_capacity(size.min(rest.len()));
                for _ in 0..size {
                    let (item, after) = self.read_any(rest, depth)?;
                    arr.push(item);
                    rest = after;
                }
                return Ok((Value::Array(arr), rest));
            }
            Head::Map(size) => {
                let depth = self.enter(depth)?;
                let mut rest = reader.rest();
                let mut pairs = Vec::with_capacity(size.min(rest.len() / 2));
                for _ in 0..size {
                    let (key, after_key) = self.read_any(rest, depth)?;
                    let (val, after_val) = self.read_any(after_key, depth)?;
                    pairs.push((key, val));
                    rest = after_val;
                }
                return Ok((Value::Map(pairs), rest));
            }
        };
        Ok((value, reader.rest()))
    }

    fn skip_any<'a>(&self, input: &'a [u8], depth: usize) -> Result<&'a [u8], DecodeError> {
        let mut reader = Reader::new(input);
        let count = match self.read_head(&mut reader)? {
            Head::Scalar(_) | Head::Str(_) => return Ok(reader.rest()),
            Head::Array(size) => size,
            Head::Map(size) => size.saturating_mul(2),
        };
        let depth = self.enter(depth)?;
        let mut rest = reader.rest();
        for _ in 0..count {
            rest = self.skip_any(rest, depth)?;
        }
        Ok(rest)
    }

    fn read_head<'a>(&self, reader: &mut Reader<'a>) -> Result<Head<'a>, DecodeError> {
        let tag = reader.u8()?;

        if tag <= POSITIVE_FIXINT_MAX {
            return Ok(Head::Scalar(Value::Integer(tag as i64)));
        }
        if tag >= NEGATIVE_FIXINT_MIN {
            return Ok(Head::Scalar(Value::Integer(tag as i8 as i64)));
        }
        if tag & 0xe0 == FIXSTR {
            return self.read_str(reader, (tag & FIXSTR_MASK) as usize);
        }
        if tag & 0xf0 == FIXARRAY {
            return Ok(Head::Array((tag & FIXCOLLECTION_MASK) as usize));
        }
        if tag & 0xf0 == FIXMAP {
            return Ok(Head::Map((tag & FIXCOLLECTION_MASK) as usize));
        }

        let head = match tag {
            NIL => Head::Scalar(Value::Null),
            FALSE => Head::Scalar(Value::Boolean(false)),
            TRUE => Head::Scalar(Value::Boolean(true)),
            UINT8 => Head::Scalar(Value::Integer(reader.u8()? as i64)),
            UINT16 => Head::Scalar(Value::Integer(reader.u16()? as i64)),
            UINT32 => Head::Scalar(Value::Integer(reader.u32()? as i64)),
            UINT64 => {
                let offset = self.offset(reader) - 1;
                let int = i64::try_from(reader.u64()?)
                    .map_err(|_| DecodeError::IntegerOverflow { offset })?;
                Head::Scalar(Value::Integer(int))
            }
            INT8 => Head::Scalar(Value::Integer(reader.i8()? as i64)),
            INT16 => Head::Scalar(Value::Integer(reader.i16()? as i64)),
            INT32 => Head::Scalar(Value::Integer(reader.i32()? as i64)),
            INT64 => Head::Scalar(Value::Integer(reader.i64()?)),
            FLOAT32 => Head::Scalar(Value::Float32(reader.f32()?)),
            FLOAT64 => Head::Scalar(Value::Float64(reader.f64()?)),
            STR8 => {
                let size = reader.u8()? as usize;
                self.read_str(reader, size)?
            }
            STR16 => {
                let size = reader.u16()? as usize;
                self.read_str(reader, size)?
            }
            STR32 => {
                let size = reader.u32()? as usize;
                self.read_str(reader, size)?
            }
            ARRAY16 => Head::Array(reader.u16()? as usize),
            ARRAY32 => Head::Array(reader.u32()? as usize),
            MAP16 => Head::Map(reader.u16()? as usize),
            MAP32 => Head::Map(reader.u32()? as usize),
            _ => {
                return Err(DecodeError::UnsupportedTag {
                    tag,
                    offset: self.offset(reader) - 1,
                })
            }
        };
        Ok(head)
    }

    fn read_str<'a>(
        &self,
        reader: &mut Reader<'a>,
        size: usize,
    ) -> Result<Head<'a>, DecodeError> {
        let offset = self.offset(reader);
        match reader.utf8(size) {
            Ok(s) => Ok(Head::Str(s)),
            Err(BufferError::InvalidUtf8) => Err(DecodeError::InvalidUtf8 { offset }),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_families_are_recognised_by_range() {
        let decoder = Decoder::new();
        assert_eq!(decoder.decode_exact(&[0x00]), Ok(Value::Integer(0)));
        assert_eq!(decoder.decode_exact(&[0x7f]), Ok(Value::Integer(127)));
        assert_eq!(decoder.decode_exact(&[0xe0]), Ok(Value::Integer(-32)));
        assert_eq!(decoder.decode_exact(&[0xff]), Ok(Value::Integer(-1)));
        assert_eq!(decoder.decode_exact(&[0x80]), Ok(Value::Map(vec![])));
        assert_eq!(decoder.decode_exact(&[0x90]), Ok(Value::Array(vec![])));
        assert_eq!(
            decoder.decode_exact(&[0xa0]),
            Ok(Value::String(String::new()))
        );
    }

    #[test]
    fn offsets_are_relative_to_the_whole_buffer() {
        let decoder = Decoder::new();
        assert_eq!(
            decoder.decode(&[0x93, 0x01, 0x02, 0xc1]),
            Err(DecodeError::UnsupportedTag {
                tag: 0xc1,
                offset: 3
            })
        );
        assert_eq!(
            decoder.decode(&[0x92, 0xa1, b'a', 0xa2, 0xc3, 0x28]),
            Err(DecodeError::InvalidUtf8 { offset: 4 })
        );
    }

    #[test]
    fn depth_counts_open_containers() {
        let decoder = Decoder::with_max_depth(2);
        assert!(decoder.decode_exact(&[0x91, 0x91, 0x01]).is_ok());
        assert_eq!(
            decoder.decode_exact(&[0x91, 0x91, 0x91, 0x01]),
            Err(DecodeError::NestingTooDeep { limit: 2 })
        );
        assert_eq!(
            decoder.skip(&[0x91, 0x91, 0x91, 0x01]),
            Err(DecodeError::NestingTooDeep { limit: 2 })
        );
        assert_eq!(Decoder::with_max_depth(0).decode_exact(&[0x2a]), Ok(42.into()));
        assert_eq!(
            Decoder::with_max_depth(0).decode_exact(&[0x90]),
            Err(DecodeError::NestingTooDeep { limit: 0 })
        );
    }

    #[test]
    fn skip_matches_decode_remainder() {
        let decoder = Decoder::new();
        let input = [0x82, 0xa1, b'a', 0x91, 0xc0, 0x05, 0xcb, 0, 0, 0, 0, 0, 0, 0, 0, 0xc3];
        let (_, rest) = decoder.decode(&input).unwrap();
        assert_eq!(decoder.skip(&input).unwrap(), rest);
        assert_eq!(rest, &[0xc3]);
    }

    #[test]
    fn forged_lengths_do_not_preallocate() {
        let decoder = Decoder::new();
        assert_eq!(
            decoder.decode(&[0xdd, 0xff, 0xff, 0xff, 0xff]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
        assert_eq!(
            decoder.decode(&[0xdf, 0xff, 0xff, 0xff, 0xff, 0x01]),
            Err(DecodeError::UnexpectedEndOfInput)
        );
    }
}
