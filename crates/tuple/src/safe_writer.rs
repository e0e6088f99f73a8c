//! Bounds-checked tuple writer.

use ftjson_alphabets::{base64, zigzag};
use ftjson_codecs::{binary, decimal, float, Decimal};

use crate::{TupleError, TupleWriter, MAX_SAFE_LENGTH};

/// A capacity-tracked facade over [`TupleWriter`] for length-constrained
/// or untrusted use.
///
/// The writer is constructed with a `max_length` ceiling and never lets
/// the tuple exceed it: every append measures the value first — counting
/// any offset-array widening the new running length would force — and
/// fails with [`TupleError::ValueTooBig`] before touching any state when
/// the result would not fit.
pub struct SafeTupleWriter<'a> {
    inner: TupleWriter<'a>,
    max_length: usize,
    available: usize,
}

impl<'a> SafeTupleWriter<'a> {
    /// Creates a bounds-checked writer for `count` values within
    /// `max_length` bytes.
    ///
    /// Fails with [`TupleError::TooBig`] when `max_length` is at or
    /// above the five-symbol offset ceiling, and with
    /// [`TupleError::ValueTooBig`] when the minimal header plus offset
    /// array alone would not fit.
    pub fn new(buf: &'a mut [u8], count: usize, max_length: usize) -> Result<Self, TupleError> {
        if max_length >= MAX_SAFE_LENGTH {
            return Err(TupleError::TooBig);
        }
        if buf.len() < max_length {
            return Err(TupleError::BadArgument("buffer shorter than max length"));
        }
        let minimal = 1 + count;
        if minimal > max_length {
            return Err(TupleError::ValueTooBig);
        }
        // The inner writer only ever sees max_length bytes, so even a
        // bookkeeping bug cannot write past the ceiling.
        let inner = TupleWriter::new(&mut buf[..max_length], count);
        Ok(Self {
            inner,
            max_length,
            available: max_length - minimal,
        })
    }

    /// The construction-time length ceiling.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Bytes still available for value data and offset widening.
    pub fn available(&self) -> usize {
        self.available
    }

    /// Values appended so far.
    pub fn written(&self) -> usize {
        self.inner.written()
    }

    /// Declared value count.
    pub fn count(&self) -> usize {
        self.inner.count()
    }

    fn check_fits(&self, value_len: usize) -> Result<(), TupleError> {
        let new_offset = self.inner.value_offset() + value_len as u64;
        let new_width = base64::measure_needed_size(new_offset).max(self.inner.width());
        let total = 1 + self.inner.count() * new_width + new_offset as usize;
        if total > self.max_length {
            return Err(TupleError::ValueTooBig);
        }
        Ok(())
    }

    fn update_available(&mut self) {
        self.available = self.max_length - self.inner.total_len();
    }

    /// The unwritten remainder of the value area, capped at the length
    /// ceiling. A nested tuple should be built here through its own
    /// `SafeTupleWriter` bounded by [`SafeTupleWriter::available`],
    /// then recorded with [`SafeTupleWriter::have_written`].
    pub fn tail_mut(&mut self) -> &mut [u8] {
        self.inner.tail_mut()
    }

    /// Records `len` externally written value bytes, capacity-checked.
    pub fn have_written(&mut self, len: usize) -> Result<(), TupleError> {
        self.check_fits(len)?;
        self.inner.have_written(len)?;
        self.update_available();
        Ok(())
    }

    /// Finalizes the tuple and returns its total byte length.
    pub fn seal(self) -> Result<usize, TupleError> {
        self.inner.seal()
    }

    /// Appends an unsigned integer at its minimal width.
    pub fn append_u64(&mut self, value: u64) -> Result<(), TupleError> {
        self.check_fits(base64::measure_needed_size(value))?;
        self.inner.append_u64(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends a 32-bit unsigned integer.
    pub fn append_u32(&mut self, value: u32) -> Result<(), TupleError> {
        self.append_u64(value as u64)
    }

    /// Appends a signed integer through the zigzag mapping.
    pub fn append_i64(&mut self, value: i64) -> Result<(), TupleError> {
        self.append_u64(zigzag(value))
    }

    /// Appends an optional unsigned integer; `None` occupies zero bytes.
    pub fn append_u64_nullable(&mut self, value: Option<u64>) -> Result<(), TupleError> {
        let needed = value.map_or(0, base64::measure_needed_size);
        self.check_fits(needed)?;
        self.inner.append_u64_nullable(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends an optional signed integer; `None` occupies zero bytes.
    pub fn append_i64_nullable(&mut self, value: Option<i64>) -> Result<(), TupleError> {
        self.append_u64_nullable(value.map(zigzag))
    }

    /// Appends a string as its raw UTF-8 bytes.
    pub fn append_str(&mut self, value: &str) -> Result<(), TupleError> {
        self.check_fits(value.len())?;
        self.inner.append_str(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends a byte array in the packed 6-bit form.
    pub fn append_bytes(&mut self, value: Option<&[u8]>) -> Result<(), TupleError> {
        self.check_fits(binary::measure_needed_size_to_encode(value.map(<[u8]>::len)))?;
        self.inner.append_bytes(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends a boolean quartet.
    pub fn append_bool(&mut self, value: bool) -> Result<(), TupleError> {
        self.check_fits(1)?;
        self.inner.append_bool(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends an optional boolean quartet.
    pub fn append_bool_nullable(&mut self, value: Option<bool>) -> Result<(), TupleError> {
        self.check_fits(1)?;
        self.inner.append_bool_nullable(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends a double.
    pub fn append_f64(&mut self, value: f64) -> Result<(), TupleError> {
        self.check_fits(float::measure_f64(value))?;
        self.inner.append_f64(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends a single.
    pub fn append_f32(&mut self, value: f32) -> Result<(), TupleError> {
        self.check_fits(float::measure_f32(value))?;
        self.inner.append_f32(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends an optional double.
    pub fn append_f64_nullable(&mut self, value: Option<f64>) -> Result<(), TupleError> {
        self.check_fits(float::measure_f64_nullable(value))?;
        self.inner.append_f64_nullable(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends an optional single.
    pub fn append_f32_nullable(&mut self, value: Option<f32>) -> Result<(), TupleError> {
        self.check_fits(float::measure_f32_nullable(value))?;
        self.inner.append_f32_nullable(value)?;
        self.update_available();
        Ok(())
    }

    /// Appends a decimal.
    pub fn append_decimal(&mut self, value: &Decimal) -> Result<(), TupleError> {
        self.check_fits(decimal::measure_needed_size(value))?;
        self.inner.append_decimal(value)?;
        self.update_available();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_rejected_at_construction() {
        let mut buf = [0u8; 8];
        assert_eq!(
            SafeTupleWriter::new(&mut buf, 1, MAX_SAFE_LENGTH).err(),
            Some(TupleError::TooBig)
        );
    }

    #[test]
    fn minimal_overhead_rejected_at_construction() {
        let mut buf = [0u8; 8];
        // 1 header + 4 offsets > 4.
        assert_eq!(
            SafeTupleWriter::new(&mut buf, 4, 4).err(),
            Some(TupleError::ValueTooBig)
        );
    }

    #[test]
    fn short_buffer_rejected_at_construction() {
        let mut buf = [0u8; 8];
        assert!(matches!(
            SafeTupleWriter::new(&mut buf, 1, 16),
            Err(TupleError::BadArgument(_))
        ));
    }

    #[test]
    fn oversized_value_leaves_state_untouched() {
        let mut buf = [0u8; 32];
        let mut writer = SafeTupleWriter::new(&mut buf, 2, 16).unwrap();
        writer.append_u64(3).unwrap();
        let available = writer.available();
        assert_eq!(
            writer.append_str(&"q".repeat(20)),
            Err(TupleError::ValueTooBig)
        );
        assert_eq!(writer.available(), available);
        assert_eq!(writer.written(), 1);
        // The slot is still usable.
        writer.append_str("ok").unwrap();
        assert!(writer.seal().is_ok());
    }

    #[test]
    fn widening_cost_counts_against_capacity() {
        let mut buf = [0u8; 128];
        let mut writer = SafeTupleWriter::new(&mut buf, 5, 74).unwrap();
        for _ in 0..4 {
            writer.append_str(&"v".repeat(14)).unwrap();
        }
        // Cumulative 56 at width 1; 8 more bytes fit the raw remainder
        // (total would be 62 + 8 = 70) but push the cumulative length to
        // 64, widening every offset element to two symbols: 1 + 10 + 64
        // = 75 > 74.
        assert!(writer.available() >= 8);
        assert_eq!(
            writer.append_str(&"w".repeat(8)),
            Err(TupleError::ValueTooBig)
        );
        // One byte less squeaks under the widened layout.
        writer.append_str(&"w".repeat(7)).unwrap();
        assert_eq!(writer.seal(), Ok(1 + 5 + 63));
    }

    #[test]
    fn capacity_tracks_appends() {
        let mut buf = [0u8; 64];
        let mut writer = SafeTupleWriter::new(&mut buf, 2, 32).unwrap();
        assert_eq!(writer.available(), 32 - 3);
        writer.append_u64(1).unwrap();
        assert_eq!(writer.available(), 32 - 3 - 1);
        writer.append_str("abcd").unwrap();
        assert_eq!(writer.available(), 32 - 3 - 1 - 4);
    }
}
