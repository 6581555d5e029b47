//! Schema-less binary codec for a MessagePack-style wire format.
//!
//! [`Value`] is a closed tree of null, booleans, 64-bit integers, floats,
//! UTF-8 strings, arrays and ordered maps. [`encode`] writes a value in its
//! shortest form; [`decode`] reads one value from the front of a buffer and
//! returns it together with the bytes that follow, so several values can be
//! read back-to-back from one buffer.
//!
//! ```
//! use mpack::{decode, encode, Value};
//!
//! let value = Value::Map(vec![
//!     (Value::from("a"), Value::from(1)),
//!     (Value::from("a"), Value::from(2)),
//! ]);
//! let mut bytes = encode(&value);
//! bytes.push(0xc0);
//!
//! let (decoded, rest) = decode(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! assert_eq!(rest, &[0xc0]);
//! ```
//!
//! Binary and extension types are not supported; their tags decode to
//! [`DecodeError::UnsupportedTag`].

pub mod constants;
mod decoder;
mod encoder;
mod error;
mod value;

pub use decoder::{Decoder, Values, DEFAULT_MAX_DEPTH};
pub use encoder::Encoder;
pub use error::{DecodeError, ValueError};
pub use value::Value;

/// Encodes `value` into a new buffer.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(value, &mut out);
    out
}

/// Appends the encoding of `value` to `out`.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) {
    let mut encoder = Encoder {
        writer: mpack_buffers::Writer::from_vec(std::mem::take(out)),
    };
    encoder.write_any(value);
    *out = encoder.writer.into_inner();
}

/// Decodes the first value in `input` with the default [`Decoder`].
pub fn decode(input: &[u8]) -> Result<(Value, &[u8]), DecodeError> {
    Decoder::new().decode(input)
}

/// Decodes `input` as exactly one value.
pub fn decode_exact(input: &[u8]) -> Result<Value, DecodeError> {
    Decoder::new().decode_exact(input)
}
