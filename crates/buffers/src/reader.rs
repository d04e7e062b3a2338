//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides methods for reading
/// fixed-width integers, floats, and UTF-8 strings. Every read is bounds
/// checked and returns `Err(BufferError::EndOfBuffer)` when the slice is
/// exhausted, so malformed input surfaces as an ordinary error rather than
/// a panic.
///
/// # Example
///
/// ```
/// use modlink_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// ```
pub struct Reader<'a> {
    uint8: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Current cursor position from the start of the slice.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.uint8
            .get(self.x)
            .copied()
            .ok_or(BufferError::EndOfBuffer)
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.take(length).map(|_| ())
    }

    /// Returns a subslice of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.take(size)
    }

    fn take(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        let end = self.x.checked_add(size).ok_or(BufferError::EndOfBuffer)?;
        if end > self.uint8.len() {
            return Err(BufferError::EndOfBuffer);
        }
        let bin = &self.uint8[self.x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        let b = self.take(1)?;
        Ok(b[0])
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.u8()? as i8)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Reads a signed 16-bit integer (big-endian).
    #[inline]
    pub fn i16(&mut self) -> Result<i16, BufferError> {
        Ok(self.u16()? as i16)
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        Ok(self.u32()? as i32)
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Reads a signed 64-bit integer (big-endian).
    #[inline]
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        Ok(self.u64()? as i64)
    }

    /// Reads a 32-bit floating point number (big-endian).
    #[inline]
    pub fn f32(&mut self) -> Result<f32, BufferError> {
        Ok(f32::from_bits(self.u32()?))
    }

    /// Reads a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self) -> Result<f64, BufferError> {
        Ok(f64::from_bits(self.u64()?))
    }

    /// Reads a UTF-8 string of the given byte length.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let bin = self.take(size)?;
        str::from_utf8(bin).map_err(|_| BufferError::InvalidUtf8)
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
        assert_eq!(reader.u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16().unwrap(), 0x0102);
        assert_eq!(reader.u16().unwrap(), 0x0304);
    }

    #[test]
    fn test_u32() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32().unwrap(), 0x01020304);
    }

    #[test]
    fn test_u64_and_signed() {
        let data = u64::MAX.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64().unwrap(), u64::MAX);

        let data = i64::MIN.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.i64().unwrap(), i64::MIN);
    }

    #[test]
    fn test_floats() {
        let data = 1.5f32.to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.f32().unwrap(), 1.5);

        let data = (-2.75f64).to_be_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.f64().unwrap(), -2.75);
    }

    #[test]
    fn test_skip() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        reader.skip(2).unwrap();
        assert_eq!(reader.u8().unwrap(), 0x03);
        assert!(reader.skip(2).is_err());
    }

    #[test]
    fn test_utf8() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.utf8(5).unwrap(), "hello");
        assert_eq!(reader.utf8(6).unwrap(), " world");
    }

    #[test]
    fn test_utf8_invalid() {
        let data = [0xff, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.utf8(2), Err(BufferError::InvalidUtf8));
    }

    #[test]
    fn test_truncated_read() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32(), Err(BufferError::EndOfBuffer));
        // A failed read does not advance the cursor.
        assert_eq!(reader.u16().unwrap(), 0x0102);
    }
}
