//! Tuple reader: O(1) random access plus sequential streaming decode.

use ftjson_alphabets::{base64, unzigzag};
use ftjson_codecs::{binary, boolean, decimal, float, Decimal};

use crate::TupleError;

/// A reader over a sealed tuple.
///
/// Random-access `get_*` methods cost two fixed-width offset decodes at
/// any index — no preceding value is scanned. Sequential `read_*`
/// methods advance an internal cursor through the values in declaration
/// order and never touch earlier offsets again.
///
/// This is the fast path: it trusts that the bytes are a sealed tuple
/// (garbage may decode to garbage or panic on slice bounds, never
/// unsafely). The validating facade is [`crate::SafeTupleReader`].
/// Distinct readers over the same bytes are independent.
pub struct TupleReader<'a> {
    buf: &'a [u8],
    count: usize,
    width: usize,
    next: usize,
    value_offset: u64,
}

impl<'a> TupleReader<'a> {
    /// Creates a reader over a sealed tuple of `count` values.
    pub fn new(buf: &'a [u8], count: usize) -> Self {
        let width = base64::read(1, buf) as usize;
        Self {
            buf,
            count,
            width,
            next: 0,
            value_offset: 0,
        }
    }

    /// Declared value count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Offset-element width decoded from the header.
    pub fn width(&self) -> usize {
        self.width
    }

    fn values_start(&self) -> usize {
        1 + self.count * self.width
    }

    fn offset_at(&self, index: usize) -> u64 {
        base64::read(self.width, &self.buf[1 + index * self.width..])
    }

    fn check_index(&self, index: usize) -> Result<(), TupleError> {
        if index >= self.count {
            return Err(TupleError::OutOfRange {
                index,
                count: self.count,
            });
        }
        Ok(())
    }

    /// Returns the byte position and length of value `index`.
    pub fn get_at_position(&self, index: usize) -> Result<(usize, usize), TupleError> {
        self.check_index(index)?;
        let prev = if index == 0 {
            0
        } else {
            self.offset_at(index - 1)
        };
        let cur = self.offset_at(index);
        Ok((
            self.values_start() + prev as usize,
            (cur - prev) as usize,
        ))
    }

    /// Returns the byte length of value `index`.
    pub fn get_length(&self, index: usize) -> Result<usize, TupleError> {
        self.get_at_position(index).map(|(_, len)| len)
    }

    /// Returns the raw bytes of value `index`. Nested tuples reparse
    /// from this slice.
    pub fn get_bytes_at(&self, index: usize) -> Result<&'a [u8], TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(&self.buf[start..start + len])
    }

    /// Reads value `index` as a nested tuple of `count` values.
    pub fn get_tuple(&self, index: usize, count: usize) -> Result<TupleReader<'a>, TupleError> {
        Ok(TupleReader::new(self.get_bytes_at(index)?, count))
    }

    /// Reads value `index` as an unsigned integer.
    pub fn get_u64(&self, index: usize) -> Result<u64, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(base64::read(len, &self.buf[start..]))
    }

    /// Reads value `index` as a signed integer.
    pub fn get_i64(&self, index: usize) -> Result<i64, TupleError> {
        self.get_u64(index).map(unzigzag)
    }

    /// Reads value `index` as an optional unsigned integer.
    pub fn get_u64_nullable(&self, index: usize) -> Result<Option<u64>, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(base64::read_nullable(len, &self.buf[start..]))
    }

    /// Reads value `index` as an optional signed integer.
    pub fn get_i64_nullable(&self, index: usize) -> Result<Option<i64>, TupleError> {
        Ok(self.get_u64_nullable(index)?.map(unzigzag))
    }

    /// Reads value `index` as a string.
    pub fn get_str(&self, index: usize) -> Result<&'a str, TupleError> {
        let bytes = self.get_bytes_at(index)?;
        std::str::from_utf8(bytes).map_err(|_| TupleError::InvalidUtf8)
    }

    /// Reads value `index` as a packed byte array.
    pub fn get_bytes(&self, index: usize) -> Result<Option<Vec<u8>>, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(binary::read(len, &self.buf[start..])?)
    }

    /// Reads value `index` as a boolean.
    pub fn get_bool(&self, index: usize) -> Result<bool, TupleError> {
        let (start, _) = self.get_at_position(index)?;
        Ok(boolean::read_boolean(&self.buf[start..]))
    }

    /// Reads value `index` as an optional boolean.
    pub fn get_bool_nullable(&self, index: usize) -> Result<Option<bool>, TupleError> {
        let (start, _) = self.get_at_position(index)?;
        Ok(boolean::read_boolean_nullable(&self.buf[start..])?)
    }

    /// Reads value `index` as a double.
    pub fn get_f64(&self, index: usize) -> Result<f64, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(float::read_f64(len, &self.buf[start..]))
    }

    /// Reads value `index` as a single.
    pub fn get_f32(&self, index: usize) -> Result<f32, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(float::read_f32(len, &self.buf[start..]))
    }

    /// Reads value `index` as an optional double.
    pub fn get_f64_nullable(&self, index: usize) -> Result<Option<f64>, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(float::read_f64_nullable(len, &self.buf[start..])?)
    }

    /// Reads value `index` as an optional single.
    pub fn get_f32_nullable(&self, index: usize) -> Result<Option<f32>, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(float::read_f32_nullable(len, &self.buf[start..])?)
    }

    /// Reads value `index` as a decimal.
    pub fn get_decimal(&self, index: usize) -> Result<Decimal, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(decimal::read(len, &self.buf[start..])?)
    }

    /// Advances the sequential cursor past the next value, returning its
    /// position and length.
    fn next_value(&mut self) -> Result<(usize, usize), TupleError> {
        self.check_index(self.next)?;
        let cur = self.offset_at(self.next);
        let start = self.values_start() + self.value_offset as usize;
        let len = (cur - self.value_offset) as usize;
        self.next += 1;
        self.value_offset = cur;
        Ok((start, len))
    }

    /// Reads the next value as raw bytes.
    pub fn read_bytes_raw(&mut self) -> Result<&'a [u8], TupleError> {
        let (start, len) = self.next_value()?;
        Ok(&self.buf[start..start + len])
    }

    /// Reads the next value as an unsigned integer.
    pub fn read_u64(&mut self) -> Result<u64, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(base64::read(len, &self.buf[start..]))
    }

    /// Reads the next value as a signed integer.
    pub fn read_i64(&mut self) -> Result<i64, TupleError> {
        self.read_u64().map(unzigzag)
    }

    /// Reads the next value as an optional unsigned integer.
    pub fn read_u64_nullable(&mut self) -> Result<Option<u64>, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(base64::read_nullable(len, &self.buf[start..]))
    }

    /// Reads the next value as an optional signed integer.
    pub fn read_i64_nullable(&mut self) -> Result<Option<i64>, TupleError> {
        Ok(self.read_u64_nullable()?.map(unzigzag))
    }

    /// Reads the next value as a string.
    pub fn read_str(&mut self) -> Result<&'a str, TupleError> {
        let bytes = self.read_bytes_raw()?;
        std::str::from_utf8(bytes).map_err(|_| TupleError::InvalidUtf8)
    }

    /// Reads the next value as a packed byte array.
    pub fn read_bytes(&mut self) -> Result<Option<Vec<u8>>, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(binary::read(len, &self.buf[start..])?)
    }

    /// Reads the next value as a boolean.
    pub fn read_bool(&mut self) -> Result<bool, TupleError> {
        let (start, _) = self.next_value()?;
        Ok(boolean::read_boolean(&self.buf[start..]))
    }

    /// Reads the next value as an optional boolean.
    pub fn read_bool_nullable(&mut self) -> Result<Option<bool>, TupleError> {
        let (start, _) = self.next_value()?;
        Ok(boolean::read_boolean_nullable(&self.buf[start..])?)
    }

    /// Reads the next value as a double.
    pub fn read_f64(&mut self) -> Result<f64, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(float::read_f64(len, &self.buf[start..]))
    }

    /// Reads the next value as a single.
    pub fn read_f32(&mut self) -> Result<f32, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(float::read_f32(len, &self.buf[start..]))
    }

    /// Reads the next value as an optional double.
    pub fn read_f64_nullable(&mut self) -> Result<Option<f64>, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(float::read_f64_nullable(len, &self.buf[start..])?)
    }

    /// Reads the next value as an optional single.
    pub fn read_f32_nullable(&mut self) -> Result<Option<f32>, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(float::read_f32_nullable(len, &self.buf[start..])?)
    }

    /// Reads the next value as a decimal.
    pub fn read_decimal(&mut self) -> Result<Decimal, TupleError> {
        let (start, len) = self.next_value()?;
        Ok(decimal::read(len, &self.buf[start..])?)
    }

    /// Reads the next value as a nested tuple of `count` values.
    pub fn read_tuple(&mut self, count: usize) -> Result<TupleReader<'a>, TupleError> {
        let bytes = self.read_bytes_raw()?;
        Ok(TupleReader::new(bytes, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TupleWriter;

    fn sample() -> (Vec<u8>, usize) {
        let mut buf = vec![0u8; 128];
        let mut writer = TupleWriter::new(&mut buf, 4);
        writer.append_u64(300).unwrap();
        writer.append_str("mid").unwrap();
        writer.append_i64(-5).unwrap();
        writer.append_bool(false).unwrap();
        let len = writer.seal().unwrap();
        (buf, len)
    }

    #[test]
    fn random_access_is_position_independent() {
        let (buf, len) = sample();
        let reader = TupleReader::new(&buf[..len], 4);
        // Read back to front; each access is two offset decodes.
        assert!(!reader.get_bool(3).unwrap());
        assert_eq!(reader.get_i64(2).unwrap(), -5);
        assert_eq!(reader.get_str(1).unwrap(), "mid");
        assert_eq!(reader.get_u64(0).unwrap(), 300);
    }

    #[test]
    fn sequential_matches_random_access() {
        let (buf, len) = sample();
        let mut reader = TupleReader::new(&buf[..len], 4);
        assert_eq!(reader.read_u64().unwrap(), 300);
        assert_eq!(reader.read_str().unwrap(), "mid");
        assert_eq!(reader.read_i64().unwrap(), -5);
        assert!(!reader.read_bool().unwrap());
        assert!(matches!(
            reader.read_u64(),
            Err(TupleError::OutOfRange { index: 4, count: 4 })
        ));
    }

    #[test]
    fn out_of_range_index_rejected() {
        let (buf, len) = sample();
        let reader = TupleReader::new(&buf[..len], 4);
        assert!(matches!(
            reader.get_u64(4),
            Err(TupleError::OutOfRange { index: 4, count: 4 })
        ));
    }

    #[test]
    fn independent_readers_coexist() {
        let (buf, len) = sample();
        let mut a = TupleReader::new(&buf[..len], 4);
        let mut b = TupleReader::new(&buf[..len], 4);
        assert_eq!(a.read_u64().unwrap(), 300);
        assert_eq!(b.read_u64().unwrap(), 300);
        assert_eq!(a.read_str().unwrap(), "mid");
        assert_eq!(b.read_str().unwrap(), "mid");
    }

    #[test]
    fn lengths_follow_offset_deltas() {
        let (buf, len) = sample();
        let reader = TupleReader::new(&buf[..len], 4);
        let total: usize = (0..4).map(|i| reader.get_length(i).unwrap()).sum();
        assert_eq!(len, 1 + 4 * reader.width() + total);
    }
}
