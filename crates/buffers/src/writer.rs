//! Binary buffer writer over an auto-growing byte vector.

/// A binary buffer writer that appends big-endian data to a growable buffer.
///
/// # Example
///
/// ```
/// use thrift_wire_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x2a);
/// writer.i32(-1);
/// let data = writer.flush();
/// assert_eq!(data, [0x2a, 0xff, 0xff, 0xff, 0xff]);
/// ```
#[derive(Default)]
pub struct Writer {
    out: Vec<u8>,
}

impl Writer {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    /// Creates a writer with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Takes the accumulated bytes, leaving the writer empty and reusable.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.out)
    }

    /// Writes an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.out.push(val);
    }

    /// Writes a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.out.push(val as u8);
    }

    /// Writes an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian IEEE-754).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.out.extend_from_slice(&val.to_be_bytes());
    }

    /// Appends raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.out.extend_from_slice(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u16(0x0203);
        writer.i32(-1);
        assert_eq!(
            writer.flush(),
            [0x01, 0x02, 0x03, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_i64_big_endian() {
        let mut writer = Writer::new();
        writer.i64(1);
        assert_eq!(writer.flush(), [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_f64() {
        let mut writer = Writer::new();
        writer.f64(1.5);
        assert_eq!(writer.flush(), 1.5f64.to_be_bytes());
    }

    #[test]
    fn test_flush_resets() {
        let mut writer = Writer::new();
        writer.u8(0xaa);
        assert_eq!(writer.flush(), [0xaa]);
        assert!(writer.is_empty());
        writer.u8(0xbb);
        assert_eq!(writer.flush(), [0xbb]);
    }

    #[test]
    fn test_buf() {
        let mut writer = Writer::new();
        writer.buf(b"abc");
        writer.buf(b"");
        assert_eq!(writer.flush(), b"abc");
    }
}
