//! `Encoder` — writes [`Value`] trees in their shortest wire form.

use mpack_buffers::Writer;

use crate::constants::*;
use crate::Value;

/// Encoder over a reusable [`Writer`].
///
/// Encoding is total: every [`Value`] has a wire form. The only inputs that
/// are refused are strings, arrays or maps longer than `u32::MAX`, which the
/// format cannot express at all.
#[derive(Debug, Default)]
pub struct Encoder {
    pub writer: Writer,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes one value into a fresh byte vector.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    /// Writes `value` preorder: container headers before children.
    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.write_null(),
            Value::Boolean(b) => self.write_boolean(*b),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float32(f) => self.write_f32(*f),
            Value::Float64(f) => self.write_f64(*f),
            Value::String(s) => self.write_str(s),
            Value::Array(arr) => self.write_arr(arr),
            Value::Map(pairs) => self.write_map(pairs),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    /// Picks the narrowest tag whose closed range contains `int`.
    ///
    /// Negative values never use the negative fixint band: `-1..=-128` are
    /// written as `int8`.
    pub fn write_integer(&mut self, int: i64) {
        let writer = &mut self.writer;
        if int >= 0 {
            if int <= POSITIVE_FIXINT_MAX as i64 {
                writer.u8(int as u8);
            } else if int <= u8::MAX as i64 {
                writer.u8u8(UINT8, int as u8);
            } else if int <= u16::MAX as i64 {
                writer.u8u16(UINT16, int as u16);
            } else if int <= u32::MAX as i64 {
                writer.u8u32(UINT32, int as u32);
            } else {
                writer.u8u64(UINT64, int as u64);
            }
        } else if int >= i8::MIN as i64 {
            writer.u8(INT8);
            writer.i8(int as i8);
        } else if int >= i16::MIN as i64 {
            writer.u8(INT16);
            writer.i16(int as i16);
        } else if int >= i32::MIN as i64 {
            writer.u8(INT32);
            writer.i32(int as i32);
        } else {
            writer.u8(INT64);
            writer.i64(int);
        }
    }

    /// Widens to `f64` and writes a `float64`; the `float32` tag is never
    /// emitted.
    pub fn write_f32(&mut self, float: f32) {
        self.write_f64(f64::from(float));
    }

    pub fn write_f64(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    /// # Panics
    ///
    /// If `length` exceeds `u32::MAX`.
    pub fn write_str_hdr(&mut self, length: usize) {
        if length <= MAX_FIXSTR_LEN {
            self.writer.u8(FIXSTR | length as u8);
        } else if length <= u8::MAX as usize {
            self.writer.u8u8(STR8, length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(STR16, length as u16);
        } else {
            self.writer.u8u32(STR32, wire_len(length));
        }
    }

    /// Writes a string; its length is counted in UTF-8 bytes.
    pub fn write_str(&mut self, s: &str) {
        self.write_str_hdr(s.len());
        self.writer.utf8(s);
    }

    /// # Panics
    ///
    /// If `length` exceeds `u32::MAX`.
    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= MAX_FIXCOLLECTION_LEN {
            self.writer.u8(FIXARRAY | length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(ARRAY16, length as u16);
        } else {
            self.writer.u8u32(ARRAY32, wire_len(length));
        }
    }

    pub fn write_arr(&mut self, arr: &[Value]) {
        self.write_arr_hdr(arr.len());
        for item in arr {
            self.write_any(item);
        }
    }

    /// Writes a map header; `length` counts pairs.
    ///
    /// # Panics
    ///
    /// If `length` exceeds `u32::MAX`.
    pub fn write_map_hdr(&mut self, length: usize) {
        if length <= MAX_FIXCOLLECTION_LEN {
            self.writer.u8(FIXMAP | length as u8);
        } else if length <= u16::MAX as usize {
            self.writer.u8u16(MAP16, length as u16);
        } else {
            self.writer.u8u32(MAP32, wire_len(length));
        }
    }

    pub fn write_map(&mut self, pairs: &[(Value, Value)]) {
        self.write_map_hdr(pairs.len());
        for (key, val) in pairs {
            self.write_any(key);
            self.write_any(val);
        }
    }
}

fn wire_len(length: usize) -> u32 {
    match u32::try_from(length) {
        Ok(len) => len,
        Err(_) => panic!("length {length} does not fit a 32-bit length prefix"),
    }
}
