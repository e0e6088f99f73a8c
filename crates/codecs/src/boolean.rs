//! Boolean codec over the 4-bit alphabet.
//!
//! A boolean is one quartet: code 0 is false, code 1 is true. The
//! nullable form reserves code 2 for null; any other code is an error on
//! decode — it is never coerced to a boolean.

use ftjson_alphabets::base16;

use crate::CodecError;

/// Null code of the nullable boolean.
pub const NULL_CODE: u8 = 2;

/// Writes a boolean as one quartet. Returns the width (always 1).
#[inline]
pub fn write_boolean(buf: &mut [u8], value: bool) -> usize {
    base16::write_quartet(buf, value as u8);
    1
}

/// Reads a boolean quartet. Fast path; trusts the code is 0 or 1.
#[inline]
pub fn read_boolean(buf: &[u8]) -> bool {
    base16::read_quartet(buf) != 0
}

/// Reads a boolean quartet, rejecting anything but codes 0 and 1.
pub fn read_boolean_safe(buf: &[u8]) -> Result<bool, CodecError> {
    match base16::read_quartet_safe(buf)? {
        0 => Ok(false),
        1 => Ok(true),
        code => Err(CodecError::InvalidBoolean(code)),
    }
}

/// Writes an optional boolean as one quartet. Returns the width.
#[inline]
pub fn write_boolean_nullable(buf: &mut [u8], value: Option<bool>) -> usize {
    let code = match value {
        Some(b) => b as u8,
        None => NULL_CODE,
    };
    base16::write_quartet(buf, code);
    1
}

/// Reads an optional boolean quartet, rejecting codes above 2.
pub fn read_boolean_nullable(buf: &[u8]) -> Result<Option<bool>, CodecError> {
    match base16::read_quartet_safe(buf)? {
        0 => Ok(Some(false)),
        1 => Ok(Some(true)),
        NULL_CODE => Ok(None),
        code => Err(CodecError::InvalidBoolean(code)),
    }
}
