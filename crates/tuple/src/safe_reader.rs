//! Validating tuple reader for untrusted bytes.

use ftjson_alphabets::{base64, unzigzag};
use ftjson_codecs::{binary, boolean, decimal, float, Decimal};

use crate::TupleError;

/// A bounds- and structure-checked reader over possibly untrusted bytes.
///
/// Every width travels through the checked integer-read entry point, so
/// a corrupted header or offset array is rejected as
/// [`TupleError::BadArgument`] (or an alphabet error) instead of
/// decoding garbage. Random access only; there is no cursor to poison.
pub struct SafeTupleReader<'a> {
    buf: &'a [u8],
    count: usize,
    width: usize,
}

impl<'a> SafeTupleReader<'a> {
    /// Creates a checked reader over a sealed tuple of `count` values.
    pub fn new(buf: &'a [u8], count: usize) -> Result<Self, TupleError> {
        let width = base64::read_safe(1, buf)? as usize;
        if !base64::is_legal_width(width) {
            return Err(ftjson_alphabets::AlphabetError::InvalidWidth(width).into());
        }
        if buf.len() < 1 + count * width {
            return Err(TupleError::BadArgument("offset array extends past buffer"));
        }
        Ok(Self { buf, count, width })
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

    fn offset_at(&self, index: usize) -> Result<u64, TupleError> {
        Ok(base64::read_safe(
            self.width,
            &self.buf[1 + index * self.width..],
        )?)
    }

    /// Returns the byte position and length of value `index`, validating
    /// the offsets it touches.
    pub fn get_at_position(&self, index: usize) -> Result<(usize, usize), TupleError> {
        if index >= self.count {
            return Err(TupleError::OutOfRange {
                index,
                count: self.count,
            });
        }
        let prev = if index == 0 { 0 } else { self.offset_at(index - 1)? };
        let cur = self.offset_at(index)?;
        if cur < prev {
            return Err(TupleError::BadArgument("offsets are not non-decreasing"));
        }
        let start = self.values_start() + prev as usize;
        let len = (cur - prev) as usize;
        if start + len > self.buf.len() {
            return Err(TupleError::BadArgument("value extends past buffer"));
        }
        Ok((start, len))
    }

    /// Returns the byte length of value `index`.
    pub fn get_length(&self, index: usize) -> Result<usize, TupleError> {
        self.get_at_position(index).map(|(_, len)| len)
    }

    /// Returns the raw bytes of value `index`.
    pub fn get_bytes_at(&self, index: usize) -> Result<&'a [u8], TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(&self.buf[start..start + len])
    }

    /// Reads value `index` as a nested tuple of `count` values, itself
    /// checked.
    pub fn get_tuple(&self, index: usize, count: usize) -> Result<SafeTupleReader<'a>, TupleError> {
        SafeTupleReader::new(self.get_bytes_at(index)?, count)
    }

    /// Reads value `index` as an unsigned integer.
    pub fn get_u64(&self, index: usize) -> Result<u64, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(base64::read_safe(len, &self.buf[start..])?)
    }

    /// Reads value `index` as a signed integer.
    pub fn get_i64(&self, index: usize) -> Result<i64, TupleError> {
        self.get_u64(index).map(unzigzag)
    }

    /// Reads value `index` as an optional unsigned integer.
    pub fn get_u64_nullable(&self, index: usize) -> Result<Option<u64>, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(base64::read_nullable_safe(len, &self.buf[start..])?)
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
        Ok(binary::read_safe(len, &self.buf[start..])?)
    }

    /// Reads value `index` as a boolean.
    pub fn get_bool(&self, index: usize) -> Result<bool, TupleError> {
        let (start, _) = self.get_at_position(index)?;
        Ok(boolean::read_boolean_safe(&self.buf[start..])?)
    }

    /// Reads value `index` as an optional boolean.
    pub fn get_bool_nullable(&self, index: usize) -> Result<Option<bool>, TupleError> {
        let (start, _) = self.get_at_position(index)?;
        Ok(boolean::read_boolean_nullable(&self.buf[start..])?)
    }

    /// Reads value `index` as a double.
    pub fn get_f64(&self, index: usize) -> Result<f64, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(float::read_f64_safe(len, &self.buf[start..])?)
    }

    /// Reads value `index` as a single.
    pub fn get_f32(&self, index: usize) -> Result<f32, TupleError> {
        let (start, len) = self.get_at_position(index)?;
        Ok(float::read_f32_safe(len, &self.buf[start..])?)
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
}
