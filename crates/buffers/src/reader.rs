//! Bounds-checked binary buffer reader with cursor tracking.

use crate::ReadError;

/// A binary buffer reader that reads big-endian data from a byte slice.
///
/// The reader maintains a cursor position; every accessor checks the
/// remaining length first and returns [`ReadError::UnexpectedEnd`] on
/// truncated input rather than panicking.
///
/// # Example
///
/// ```
/// use thrift_wire_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// ```
pub struct Reader<'a> {
    data: &'a [u8],
    /// Current cursor position.
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, data: &'a [u8]) {
        self.data = data;
        self.x = 0;
    }

    /// Current cursor position from the start of the slice.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of remaining bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.x
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, ReadError> {
        if self.x < self.data.len() {
            Ok(self.data[self.x])
        } else {
            Err(ReadError::UnexpectedEnd)
        }
    }

    /// Advances the cursor past `length` bytes without materializing them.
    pub fn advance(&mut self, length: usize) -> Result<(), ReadError> {
        self.take(length).map(|_| ())
    }

    /// Returns the next `size` bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], ReadError> {
        self.take(size)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        if self.remaining() < n {
            return Err(ReadError::UnexpectedEnd);
        }
        let out = &self.data[self.x..self.x + n];
        self.x += n;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, ReadError> {
        Ok(self.array::<1>()?[0])
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self) -> Result<i8, ReadError> {
        Ok(self.array::<1>()?[0] as i8)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self) -> Result<u16, ReadError> {
        Ok(u16::from_be_bytes(self.array()?))
    }

    /// Reads a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self) -> Result<i16, ReadError> {
        Ok(i16::from_be_bytes(self.array()?))
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self) -> Result<u32, ReadError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    /// Reads a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self) -> Result<i32, ReadError> {
        Ok(i32::from_be_bytes(self.array()?))
    }

    /// Reads a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self) -> Result<i64, ReadError> {
        Ok(i64::from_be_bytes(self.array()?))
    }

    /// Reads a 64-bit floating point number (big-endian IEEE-754).
    #[inline]
    pub fn f64(&mut self) -> Result<f64, ReadError> {
        Ok(f64::from_be_bytes(self.array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(reader.u8().unwrap(), 0x02);
        assert_eq!(reader.u8().unwrap(), 0x03);
        assert_eq!(reader.u8(), Err(ReadError::UnexpectedEnd));
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16().unwrap(), 0x0102);
        assert_eq!(reader.u16().unwrap(), 0x0304);
    }

    #[test]
    fn test_i32() {
        let data = [0xff, 0xff, 0xff, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i32().unwrap(), -2);
    }

    #[test]
    fn test_i64() {
        let data = 0x0102_0304_0506_0708i64.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i64().unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_f64() {
        let data = 1.5f64.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.f64().unwrap(), 1.5);
    }

    #[test]
    fn test_advance_and_buf() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05];
        let mut reader = Reader::new(&data);
        reader.advance(2).unwrap();
        assert_eq!(reader.buf(2).unwrap(), &[0x03, 0x04]);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.buf(2), Err(ReadError::UnexpectedEnd));
    }

    #[test]
    fn test_truncated_multibyte_read() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i32(), Err(ReadError::UnexpectedEnd));
        // A failed read does not advance the cursor.
        assert_eq!(reader.u16().unwrap(), 0x0102);
    }

    #[test]
    fn test_reset() {
        let a = [0x01];
        let b = [0x02, 0x03];
        let mut reader = Reader::new(&a);
        assert_eq!(reader.u8().unwrap(), 0x01);
        reader.reset(&b);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.u16().unwrap(), 0x0203);
    }
}
