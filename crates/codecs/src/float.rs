//! Float codecs: bit-rotation transform over the integer codec.
//!
//! The IEEE bit pattern is rotated left so the sign and exponent land in
//! the low bits — common magnitudes then encode in few symbols, and the
//! transform is exactly invertible, so round-trips are bit-exact for
//! every pattern including NaN payloads, signed zero and subnormals.
//! Doubles rotate by 12 (sign + 11 exponent bits), singles by 9
//! (sign + 8 exponent bits).
//!
//! Nullable floats carry one leading quartet flag: 0 means a payload
//! follows, 1 means null and nothing follows.

use ftjson_alphabets::{base16, base64};

use crate::CodecError;

const F64_ROT: u32 = 12;
const F32_ROT: u32 = 9;

/// Quartet flag preceding a present nullable-float payload.
pub const FLAG_VALUE: u8 = 0;
/// Quartet flag standing alone for a null nullable float.
pub const FLAG_NULL: u8 = 1;

/// Returns the encoded width of a double.
#[inline]
pub fn measure_f64(value: f64) -> usize {
    base64::measure_needed_size(value.to_bits().rotate_left(F64_ROT))
}

/// Writes a double. Returns the width used.
#[inline]
pub fn write_f64(buf: &mut [u8], value: f64) -> usize {
    base64::write(buf, value.to_bits().rotate_left(F64_ROT))
}

/// Reads a double of the given width. Fast path; trusts its input.
#[inline]
pub fn read_f64(width: usize, buf: &[u8]) -> f64 {
    f64::from_bits(base64::read(width, buf).rotate_right(F64_ROT))
}

/// Checked variant of [`read_f64`].
pub fn read_f64_safe(width: usize, buf: &[u8]) -> Result<f64, CodecError> {
    let raw = base64::read_safe(width, buf)?;
    Ok(f64::from_bits(raw.rotate_right(F64_ROT)))
}

/// Returns the encoded width of a single.
#[inline]
pub fn measure_f32(value: f32) -> usize {
    base64::measure_needed_size(value.to_bits().rotate_left(F32_ROT) as u64)
}

/// Writes a single. Returns the width used.
#[inline]
pub fn write_f32(buf: &mut [u8], value: f32) -> usize {
    base64::write(buf, value.to_bits().rotate_left(F32_ROT) as u64)
}

/// Reads a single of the given width. Fast path; trusts its input.
#[inline]
pub fn read_f32(width: usize, buf: &[u8]) -> f32 {
    f32::from_bits((base64::read(width, buf) as u32).rotate_right(F32_ROT))
}

/// Checked variant of [`read_f32`]; rejects payloads above 32 bits.
pub fn read_f32_safe(width: usize, buf: &[u8]) -> Result<f32, CodecError> {
    let raw = base64::read_safe(width, buf)?;
    if raw > u32::MAX as u64 {
        return Err(CodecError::InvalidSingle);
    }
    Ok(f32::from_bits((raw as u32).rotate_right(F32_ROT)))
}

/// Returns the encoded width of an optional double.
#[inline]
pub fn measure_f64_nullable(value: Option<f64>) -> usize {
    match value {
        None => 1,
        Some(v) => 1 + measure_f64(v),
    }
}

/// Writes an optional double: flag quartet, then the payload if present.
pub fn write_f64_nullable(buf: &mut [u8], value: Option<f64>) -> usize {
    match value {
        None => {
            base16::write_quartet(buf, FLAG_NULL);
            1
        }
        Some(v) => {
            base16::write_quartet(buf, FLAG_VALUE);
            1 + write_f64(&mut buf[1..], v)
        }
    }
}

/// Reads an optional double spanning `encoded_len` bytes.
pub fn read_f64_nullable(encoded_len: usize, buf: &[u8]) -> Result<Option<f64>, CodecError> {
    if encoded_len == 0 {
        return Err(CodecError::InvalidLength(0));
    }
    match base16::read_quartet_safe(buf)? {
        FLAG_NULL => Ok(None),
        FLAG_VALUE => read_f64_safe(encoded_len - 1, &buf[1..]).map(Some),
        code => Err(CodecError::InvalidBoolean(code)),
    }
}

/// Returns the encoded width of an optional single.
#[inline]
pub fn measure_f32_nullable(value: Option<f32>) -> usize {
    match value {
        None => 1,
        Some(v) => 1 + measure_f32(v),
    }
}

/// Writes an optional single: flag quartet, then the payload if present.
pub fn write_f32_nullable(buf: &mut [u8], value: Option<f32>) -> usize {
    match value {
        None => {
            base16::write_quartet(buf, FLAG_NULL);
            1
        }
        Some(v) => {
            base16::write_quartet(buf, FLAG_VALUE);
            1 + write_f32(&mut buf[1..], v)
        }
    }
}

/// Reads an optional single spanning `encoded_len` bytes.
pub fn read_f32_nullable(encoded_len: usize, buf: &[u8]) -> Result<Option<f32>, CodecError> {
    if encoded_len == 0 {
        return Err(CodecError::InvalidLength(0));
    }
    match base16::read_quartet_safe(buf)? {
        FLAG_NULL => Ok(None),
        FLAG_VALUE => read_f32_safe(encoded_len - 1, &buf[1..]).map(Some),
        code => Err(CodecError::InvalidBoolean(code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F64_PATTERNS: [u64; 10] = [
        0,                     // +0.0
        1 << 63,               // -0.0
        0x3FF0_0000_0000_0000, // 1.0
        0x0010_0000_0000_0000, // smallest normal
        0x7FEF_FFFF_FFFF_FFFF, // largest normal
        0x0000_0000_0000_0001, // smallest subnormal
        0x7FF0_0000_0000_0000, // +inf
        0xFFF0_0000_0000_0000, // -inf
        0x7FF8_0000_0000_0000, // quiet NaN
        0x7FF0_0000_0000_0001, // signaling NaN payload
    ];

    #[test]
    fn f64_roundtrip_is_bit_exact() {
        let mut buf = [0u8; 11];
        for bits in F64_PATTERNS {
            let value = f64::from_bits(bits);
            let width = write_f64(&mut buf, value);
            assert_eq!(width, measure_f64(value));
            assert_eq!(read_f64(width, &buf).to_bits(), bits, "bits {bits:#x}");
            assert_eq!(
                read_f64_safe(width, &buf).unwrap().to_bits(),
                bits,
                "bits {bits:#x}"
            );
        }
    }

    #[test]
    fn f32_roundtrip_is_bit_exact() {
        let mut buf = [0u8; 11];
        for bits in [
            0u32,
            1 << 31,
            0x3F80_0000, // 1.0
            0x0080_0000, // smallest normal
            0x7F7F_FFFF, // largest normal
            0x0000_0001, // smallest subnormal
            0x7FC0_0000, // NaN
        ] {
            let value = f32::from_bits(bits);
            let width = write_f32(&mut buf, value);
            assert_eq!(read_f32(width, &buf).to_bits(), bits, "bits {bits:#x}");
        }
    }

    #[test]
    fn common_doubles_are_short() {
        // 1.0 rotated: exponent bits move low, mantissa zeros move high.
        assert!(measure_f64(1.0) <= 3);
        assert_eq!(measure_f64(0.0), 1);
    }

    #[test]
    fn nullable_roundtrip() {
        let mut buf = [0u8; 12];
        for value in [None, Some(0.0), Some(-1.5), Some(f64::NAN)] {
            let len = write_f64_nullable(&mut buf, value);
            assert_eq!(len, measure_f64_nullable(value));
            let back = read_f64_nullable(len, &buf).unwrap();
            match (value, back) {
                (Some(a), Some(b)) => assert_eq!(a.to_bits(), b.to_bits()),
                (a, b) => assert_eq!(a.is_none(), b.is_none()),
            }
        }
        for value in [None, Some(2.5f32)] {
            let len = write_f32_nullable(&mut buf, value);
            assert_eq!(len, measure_f32_nullable(value));
            assert_eq!(read_f32_nullable(len, &buf).unwrap(), value);
        }
    }

    #[test]
    fn nullable_flag_values() {
        let mut buf = [0u8; 12];
        write_f64_nullable(&mut buf, None);
        assert_eq!(buf[0], b'@' + 1);
        write_f64_nullable(&mut buf, Some(1.0));
        assert_eq!(buf[0], b'@');
    }
}
