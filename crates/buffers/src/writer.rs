//! Append-only binary writer.

/// Default initial capacity of a [`Writer`] buffer.
pub const DEFAULT_CAPACITY: usize = 1024;

/// A binary buffer writer that grows as needed.
///
/// All multi-byte scalars are written big-endian.
///
/// # Example
///
/// ```
/// use mpack_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// let data = writer.flush();
/// assert_eq!(data, [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Writer {
    /// The underlying byte buffer.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates a new writer with [`DEFAULT_CAPACITY`] bytes preallocated.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a new writer with a custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Creates a writer that appends to an existing buffer.
    pub fn from_vec(uint8: Vec<u8>) -> Self {
        Self { uint8 }
    }

    /// Gives back the underlying buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.uint8
    }

    /// Discards everything written so far, keeping the allocation.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Returns an exact-size copy of the written data and empties the
    /// writer. The writer keeps its allocation for the next value.
    pub fn flush(&mut self) -> Vec<u8> {
        let data = self.uint8.to_vec();
        self.uint8.clear();
        data
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes a signed 8-bit integer (two's complement).
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.uint8.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer.
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer.
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer.
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer.
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer.
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer.
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit IEEE754 float.
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a tag byte followed by one payload byte.
    pub fn u8u8(&mut self, tag: u8, val: u8) {
        self.uint8.extend_from_slice(&[tag, val]);
    }

    /// Writes a tag byte followed by a u16.
    pub fn u8u16(&mut self, tag: u8, val: u16) {
        self.uint8.reserve(3);
        self.uint8.push(tag);
        self.u16(val);
    }

    /// Writes a tag byte followed by a u32.
    pub fn u8u32(&mut self, tag: u8, val: u32) {
        self.uint8.reserve(5);
        self.uint8.push(tag);
        self.u32(val);
    }

    /// Writes a tag byte followed by a u64.
    pub fn u8u64(&mut self, tag: u8, val: u64) {
        self.uint8.reserve(9);
        self.uint8.push(tag);
        self.u64(val);
    }

    /// Writes a tag byte followed by a f64.
    pub fn u8f64(&mut self, tag: u8, val: f64) {
        self.uint8.reserve(9);
        self.uint8.push(tag);
        self.f64(val);
    }

    /// Writes the UTF-8 bytes of `s`.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }
}
