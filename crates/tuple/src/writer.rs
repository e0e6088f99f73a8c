//! Tuple writer: append-only cursor over caller-owned memory.

use ftjson_alphabets::{base64, zigzag};
use ftjson_codecs::{binary, boolean, decimal, float, Decimal};

use crate::TupleError;

/// An append-only tuple writer.
///
/// Constructed over a caller-owned byte slice with a declared value
/// count, appends exactly `count` values in order, then seals. The
/// offset array starts at the optimistic one-symbol width and widens in
/// place the first time the running value length outgrows it, so sealing
/// never needs a compaction pass.
///
/// This is the fast path: the writer trusts that the slice is large
/// enough for what gets appended (an undersized slice panics on index,
/// it is never silently overrun). The bounds-checked facade is
/// [`crate::SafeTupleWriter`].
///
/// Nested tuples compose through [`TupleWriter::tail_mut`] and
/// [`TupleWriter::have_written`]:
///
/// ```
/// use ftjson_tuple::{TupleReader, TupleWriter};
///
/// let mut buf = [0u8; 64];
/// let mut parent = TupleWriter::new(&mut buf, 2);
/// parent.append_u64(7).unwrap();
/// let child_len = {
///     let mut child = TupleWriter::new(parent.tail_mut(), 2);
///     child.append_u64(1).unwrap();
///     child.append_u64(2).unwrap();
///     child.seal().unwrap()
/// };
/// parent.have_written(child_len).unwrap();
/// let len = parent.seal().unwrap();
///
/// let parent = TupleReader::new(&buf[..len], 2);
/// let child = parent.get_tuple(1, 2).unwrap();
/// assert_eq!(child.get_u64(0).unwrap(), 1);
/// ```
pub struct TupleWriter<'a> {
    buf: &'a mut [u8],
    count: usize,
    width: usize,
    written: usize,
    value_offset: u64,
}

impl<'a> TupleWriter<'a> {
    /// Creates a writer over `buf` for exactly `count` values, starting
    /// at the one-symbol offset width.
    pub fn new(buf: &'a mut [u8], count: usize) -> Self {
        base64::write_with_width(buf, 1, 1);
        Self {
            buf,
            count,
            width: 1,
            written: 0,
            value_offset: 0,
        }
    }

    /// Creates a writer starting at an explicit offset width, for
    /// callers that know the tuple will be large and want to skip the
    /// early grows.
    pub fn with_initial_width(
        buf: &'a mut [u8],
        count: usize,
        width: usize,
    ) -> Result<Self, TupleError> {
        if !base64::is_legal_width(width) {
            return Err(TupleError::BadArgument("initial width is not a legal class"));
        }
        base64::write_with_width(buf, width as u64, 1);
        Ok(Self {
            buf,
            count,
            width,
            written: 0,
            value_offset: 0,
        })
    }

    /// Declared value count.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Values appended so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Current offset-element width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cumulative value-byte length appended so far.
    pub fn value_offset(&self) -> u64 {
        self.value_offset
    }

    /// Total tuple length if sealed now.
    pub fn total_len(&self) -> usize {
        1 + self.count * self.width + self.value_offset as usize
    }

    fn value_pos(&self) -> usize {
        1 + self.count * self.width + self.value_offset as usize
    }

    /// The unwritten remainder of the value area. Nested tuple writers
    /// are constructed over this slice; plain values may also be encoded
    /// here directly before calling [`TupleWriter::have_written`].
    pub fn tail_mut(&mut self) -> &mut [u8] {
        let pos = self.value_pos();
        &mut self.buf[pos..]
    }

    fn ensure_slot(&self) -> Result<(), TupleError> {
        if self.written == self.count {
            return Err(TupleError::OutOfRange {
                index: self.count,
                count: self.count,
            });
        }
        Ok(())
    }

    /// Records that `len` value bytes were just written at the value
    /// cursor: bumps the running offset, widens the offset array when
    /// the new total outgrows the current width, then records the
    /// offset element for the value.
    pub fn have_written(&mut self, len: usize) -> Result<(), TupleError> {
        self.ensure_slot()?;
        self.value_offset += len as u64;
        let needed = base64::measure_needed_size(self.value_offset);
        if needed > self.width {
            self.grow(needed);
        }
        let slot = 1 + self.written * self.width;
        base64::write_with_width(&mut self.buf[slot..], self.value_offset, self.width);
        self.written += 1;
        Ok(())
    }

    /// Widens the offset array to `new_width` in place.
    ///
    /// The value bytes move right to make room, then every recorded
    /// offset element is re-encoded at the new width iterating
    /// back-to-front — new slot `i` overlaps old slots `> i`, so a
    /// forward pass would read clobbered elements.
    fn grow(&mut self, new_width: usize) {
        let old_width = self.width;
        let old_values_start = 1 + self.count * old_width;
        let new_values_start = 1 + self.count * new_width;
        let value_bytes = self.value_offset as usize;
        self.buf.copy_within(
            old_values_start..old_values_start + value_bytes,
            new_values_start,
        );
        for i in (0..self.written).rev() {
            let element = base64::read(old_width, &self.buf[1 + i * old_width..]);
            base64::write_with_width(&mut self.buf[1 + i * new_width..], element, new_width);
        }
        base64::write_with_width(self.buf, new_width as u64, 1);
        self.width = new_width;
    }

    /// Finalizes the tuple and returns its total byte length. O(1).
    pub fn seal(self) -> Result<usize, TupleError> {
        if self.written != self.count {
            return Err(TupleError::Incomplete {
                written: self.written,
                count: self.count,
            });
        }
        Ok(1 + self.count * self.width + self.value_offset as usize)
    }

    /// Appends an unsigned integer at its minimal width.
    pub fn append_u64(&mut self, value: u64) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = base64::write(self.tail_mut(), value);
        self.have_written(len)
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
        self.ensure_slot()?;
        let len = base64::write_nullable(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends an optional signed integer; `None` occupies zero bytes.
    pub fn append_i64_nullable(&mut self, value: Option<i64>) -> Result<(), TupleError> {
        self.append_u64_nullable(value.map(zigzag))
    }

    /// Appends a string as its raw UTF-8 bytes.
    pub fn append_str(&mut self, value: &str) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let bytes = value.as_bytes();
        let tail = self.tail_mut();
        tail[..bytes.len()].copy_from_slice(bytes);
        self.have_written(bytes.len())
    }

    /// Appends a byte array in the packed 6-bit form; `None` is the
    /// one-symbol null sentinel.
    pub fn append_bytes(&mut self, value: Option<&[u8]>) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = binary::write(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends a boolean quartet.
    pub fn append_bool(&mut self, value: bool) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = boolean::write_boolean(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends an optional boolean quartet.
    pub fn append_bool_nullable(&mut self, value: Option<bool>) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = boolean::write_boolean_nullable(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends a double.
    pub fn append_f64(&mut self, value: f64) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = float::write_f64(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends a single.
    pub fn append_f32(&mut self, value: f32) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = float::write_f32(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends an optional double with a leading flag quartet.
    pub fn append_f64_nullable(&mut self, value: Option<f64>) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = float::write_f64_nullable(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends an optional single with a leading flag quartet.
    pub fn append_f32_nullable(&mut self, value: Option<f32>) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = float::write_f32_nullable(self.tail_mut(), value);
        self.have_written(len)
    }

    /// Appends a decimal.
    pub fn append_decimal(&mut self, value: &Decimal) -> Result<(), TupleError> {
        self.ensure_slot()?;
        let len = decimal::write(self.tail_mut(), value);
        self.have_written(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TupleReader;

    #[test]
    fn header_carries_width() {
        let mut buf = [0u8; 16];
        let writer = TupleWriter::new(&mut buf, 2);
        assert_eq!(writer.width(), 1);
        drop(writer);
        assert_eq!(buf[0], b'1');
    }

    #[test]
    fn grow_preserves_offsets_and_values() {
        // Two small values, then one pushing the cumulative length past
        // 63 bytes: the offset array widens 1 -> 2 under written data.
        let mut buf = [0u8; 256];
        let mut writer = TupleWriter::new(&mut buf, 3);
        writer.append_str("alpha").unwrap();
        writer.append_str("beta").unwrap();
        assert_eq!(writer.width(), 1);
        writer.append_str(&"x".repeat(80)).unwrap();
        assert_eq!(writer.width(), 2);
        let len = writer.seal().unwrap();
        assert_eq!(len, 1 + 3 * 2 + 5 + 4 + 80);

        let reader = TupleReader::new(&buf[..len], 3);
        assert_eq!(reader.get_str(0).unwrap(), "alpha");
        assert_eq!(reader.get_str(1).unwrap(), "beta");
        assert_eq!(reader.get_str(2).unwrap(), "x".repeat(80));
    }

    #[test]
    fn grow_can_fire_during_the_first_append() {
        let mut buf = [0u8; 256];
        let mut writer = TupleWriter::new(&mut buf, 1);
        writer.append_str(&"y".repeat(100)).unwrap();
        assert_eq!(writer.width(), 2);
        let len = writer.seal().unwrap();
        let reader = TupleReader::new(&buf[..len], 1);
        assert_eq!(reader.get_str(0).unwrap(), "y".repeat(100));
    }

    #[test]
    fn explicit_initial_width_skips_growth() {
        let mut buf = [0u8; 256];
        let mut writer = TupleWriter::with_initial_width(&mut buf, 1, 2).unwrap();
        writer.append_str(&"z".repeat(100)).unwrap();
        assert_eq!(writer.width(), 2);
        assert!(matches!(
            TupleWriter::with_initial_width(&mut buf, 1, 7),
            Err(TupleError::BadArgument(_))
        ));
    }

    #[test]
    fn seal_rejects_incomplete_tuple() {
        let mut buf = [0u8; 16];
        let mut writer = TupleWriter::new(&mut buf, 2);
        writer.append_u64(1).unwrap();
        assert_eq!(
            writer.seal(),
            Err(TupleError::Incomplete {
                written: 1,
                count: 2
            })
        );
    }

    #[test]
    fn append_beyond_count_rejected() {
        let mut buf = [0u8; 16];
        let mut writer = TupleWriter::new(&mut buf, 1);
        writer.append_u64(1).unwrap();
        assert_eq!(
            writer.append_u64(2),
            Err(TupleError::OutOfRange { index: 1, count: 1 })
        );
        assert_eq!(
            writer.have_written(1),
            Err(TupleError::OutOfRange { index: 1, count: 1 })
        );
        assert_eq!(writer.seal(), Ok(1 + 1 + 1));
    }

    #[test]
    fn empty_tuple_seals_to_header_only() {
        let mut buf = [0u8; 4];
        let writer = TupleWriter::new(&mut buf, 0);
        assert_eq!(writer.seal(), Ok(1));
    }

    #[test]
    fn total_length_formula() {
        let mut buf = [0u8; 64];
        let mut writer = TupleWriter::new(&mut buf, 2);
        writer.append_str("ab").unwrap();
        writer.append_str("cde").unwrap();
        // header + count * width + cumulative value bytes
        assert_eq!(writer.total_len(), 1 + 2 + 5);
        assert_eq!(writer.seal(), Ok(8));
    }
}
