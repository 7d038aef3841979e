//! Bounds-checked little-endian byte cursor.

use std::str;

use crate::BufferError;

/// A binary buffer reader over a borrowed byte slice.
///
/// The reader never owns the bytes it walks. Every read is checked against
/// `end`, which may sit before the physical end of the slice: BOS buffers
/// declare their own size in a header and nothing past that size belongs to
/// the encoded value.
///
/// # Example
///
/// ```
/// use bos_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0302));
/// assert!(reader.try_u8().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader with custom start and end positions.
    ///
    /// `end` is clamped to the slice length so a reader can never index past
    /// the borrowed bytes, whatever the caller claims.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        let end = end.min(uint8.len());
        Self { uint8, x, end }
    }

    /// Returns the current cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.x
    }

    /// Returns the number of bytes left before `end`.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    /// Returns `true` when the cursor has reached `end`.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.x >= self.end
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        match self.x.checked_add(n) {
            Some(to) if to <= self.end => Ok(()),
            _ => Err(BufferError::EndOfBuffer),
        }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    #[inline]
    pub fn try_i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.try_u8()? as i8)
    }

    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.array().map(i16::from_le_bytes)
    }

    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.array().map(i32::from_le_bytes)
    }

    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.array().map(u64::from_le_bytes)
    }

    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.array().map(i64::from_le_bytes)
    }

    /// Reads an IEEE-754 binary32 value.
    #[inline]
    pub fn try_f32(&mut self) -> Result<f32, BufferError> {
        self.array().map(f32::from_le_bytes)
    }

    /// Reads an IEEE-754 binary64 value.
    #[inline]
    pub fn try_f64(&mut self) -> Result<f64, BufferError> {
        self.array().map(f64::from_le_bytes)
    }

    /// Reads `size` raw bytes and advances the cursor.
    ///
    /// The cursor does not move when the read fails.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.uint8[x..end];
        self.x = end;
        Ok(bin)
    }

    /// Reads a UTF-8 string of `size` bytes.
    ///
    /// Fails on out-of-bounds or invalid UTF-8; the cursor only advances on
    /// success.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let start = self.x;
        let s = str::from_utf8(&self.uint8[start..start + size])
            .map_err(|_| BufferError::InvalidUtf8)?;
        self.x = start + size;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_u8_success() {
        let data = [0x42u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x42));
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn test_try_u8_end_of_buffer() {
        let data: [u8; 0] = [];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
        // Cursor must not advance on error
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i8_negative() {
        let data = [0xfeu8]; // -2 in two's complement
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i8(), Ok(-2i8));
    }

    #[test]
    fn test_try_u16_little_endian() {
        let data = [0x01u8, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Ok(0x0201u16));
        assert_eq!(reader.x, 2);
    }

    #[test]
    fn test_try_u16_partial() {
        let data = [0x01u8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i16_negative() {
        let data = (-300i16).to_le_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i16(), Ok(-300));
    }

    #[test]
    fn test_try_u32_and_i32() {
        let mut data = 4_294_967_290u32.to_le_bytes().to_vec();
        data.extend_from_slice(&(-2_147_483_640i32).to_le_bytes());
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Ok(4_294_967_290));
        assert_eq!(reader.try_i32(), Ok(-2_147_483_640));
        assert!(reader.is_eof());
    }

    #[test]
    fn test_try_u64_and_i64() {
        let mut data = 1_099_511_627_775u64.to_le_bytes().to_vec();
        data.extend_from_slice(&(-1_099_511_627_775i64).to_le_bytes());
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u64(), Ok(1_099_511_627_775));
        assert_eq!(reader.try_i64(), Ok(-1_099_511_627_775));
    }

    #[test]
    fn test_try_f32_success() {
        let data = 5.5f32.to_le_bytes();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_f32(), Ok(5.5));
    }

    #[test]
    fn test_try_f64_success() {
        let data = std::f64::consts::PI.to_le_bytes();
        let mut reader = Reader::new(&data);
        let got = reader.try_f64().unwrap();
        assert!((got - std::f64::consts::PI).abs() < 1e-10);
    }

    #[test]
    fn test_try_f64_end_of_buffer() {
        let data = [0u8; 7]; // one short of an f64
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_f64(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_try_buf_success() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(3), Ok([1u8, 2, 3].as_ref()));
        assert_eq!(reader.x, 3);
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_try_buf_end_of_buffer() {
        let data = [1u8, 2];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(5), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_buf_huge_length_does_not_overflow() {
        let data = [1u8, 2];
        let mut reader = Reader::new(&data);
        reader.try_u8().unwrap();
        assert_eq!(reader.try_buf(usize::MAX), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_try_utf8_success() {
        let data = b"hello";
        let mut reader = Reader::new(data);
        assert_eq!(reader.try_utf8(5), Ok("hello"));
    }

    #[test]
    fn test_try_utf8_invalid() {
        // 0xff is not valid UTF-8
        let data = [0xffu8, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_utf8(2), Err(BufferError::InvalidUtf8));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_end_limits_reads_before_slice_end() {
        let data = [1u8, 2, 3, 4];
        let mut reader = Reader::from_slice(&data, 1, 3);
        assert_eq!(reader.try_u8(), Ok(2));
        assert_eq!(reader.try_u8(), Ok(3));
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_from_slice_clamps_end() {
        let data = [1u8, 2];
        let mut reader = Reader::from_slice(&data, 0, 100);
        assert_eq!(reader.end, 2);
        assert_eq!(reader.try_buf(3), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.try_buf(2), Ok(&data[..]));
    }
}
