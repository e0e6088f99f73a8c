//! Runtime alphabet selection.
//!
//! The alphabet is a per-call-site capability rather than a build-wide
//! switch: callers that deal in one alphabet use its module directly,
//! callers that are generic over the family dispatch through [`Alphabet`].

use crate::{base16, base256, base32, base64, AlphabetError};

/// One of the four symbol alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// 4-bit quartets; single-symbol codes only.
    Base16,
    /// 5-bit symbols, widths 1..=13.
    Base32,
    /// 6-bit symbols, widths 1,2,3,4,5,6,8,11. The canonical alphabet.
    Base64,
    /// Raw little-endian bytes, widths 1,2,4,8.
    Base256,
}

impl Alphabet {
    /// Returns true when `width` is a legal width class of this alphabet.
    pub fn is_legal_width(self, width: usize) -> bool {
        match self {
            Alphabet::Base16 => width == 1,
            Alphabet::Base32 => base32::is_legal_width(width),
            Alphabet::Base64 => base64::is_legal_width(width),
            Alphabet::Base256 => base256::is_legal_width(width),
        }
    }

    /// Returns the smallest width class representing `value`.
    ///
    /// Base16 carries no width table; values above 15 are not
    /// representable there.
    pub fn measure_needed_size(self, value: u64) -> Result<usize, AlphabetError> {
        match self {
            Alphabet::Base16 => {
                if value <= 15 {
                    Ok(1)
                } else {
                    Err(AlphabetError::ValueTooLarge(value))
                }
            }
            Alphabet::Base32 => Ok(base32::measure_needed_size(value)),
            Alphabet::Base64 => Ok(base64::measure_needed_size(value)),
            Alphabet::Base256 => Ok(base256::measure_needed_size(value)),
        }
    }

    /// Encodes `value` at its minimal width class. Returns the width used.
    pub fn write(self, buf: &mut [u8], value: u64) -> Result<usize, AlphabetError> {
        match self {
            Alphabet::Base16 => {
                if value > 15 {
                    return Err(AlphabetError::ValueTooLarge(value));
                }
                if buf.is_empty() {
                    return Err(AlphabetError::EndOfBuffer);
                }
                base16::write_quartet(buf, value as u8);
                Ok(1)
            }
            Alphabet::Base32 => Ok(base32::write(buf, value)),
            Alphabet::Base64 => Ok(base64::write(buf, value)),
            Alphabet::Base256 => Ok(base256::write(buf, value)),
        }
    }

    /// Decodes exactly `width` symbols. Fast path; trusts its input.
    pub fn read(self, width: usize, buf: &[u8]) -> u64 {
        match self {
            Alphabet::Base16 => base16::read_quartet(buf) as u64,
            Alphabet::Base32 => base32::read(width, buf),
            Alphabet::Base64 => base64::read(width, buf),
            Alphabet::Base256 => base256::read(width, buf),
        }
    }

    /// Decodes exactly `width` symbols after validation.
    pub fn read_safe(self, width: usize, buf: &[u8]) -> Result<u64, AlphabetError> {
        match self {
            Alphabet::Base16 => {
                if width != 1 {
                    return Err(AlphabetError::InvalidWidth(width));
                }
                base16::read_quartet_safe(buf).map(u64::from)
            }
            Alphabet::Base32 => base32::read_safe(width, buf),
            Alphabet::Base64 => base64::read_safe(width, buf),
            Alphabet::Base256 => base256::read_safe(width, buf),
        }
    }

    /// Encodes an optional value; `None` writes nothing and reports
    /// width 0. The quartet alphabet has no external-width nullable
    /// form (its null lives in the code space, see the boolean codec).
    pub fn write_nullable(self, buf: &mut [u8], value: Option<u64>) -> Result<usize, AlphabetError> {
        match self {
            Alphabet::Base16 => Err(AlphabetError::NotSupported),
            Alphabet::Base32 => Ok(base32::write_nullable(buf, value)),
            Alphabet::Base64 => Ok(base64::write_nullable(buf, value)),
            Alphabet::Base256 => Ok(base256::write_nullable(buf, value)),
        }
    }

    /// Decodes an optional value; width 0 is null.
    pub fn read_nullable(self, width: usize, buf: &[u8]) -> Result<Option<u64>, AlphabetError> {
        match self {
            Alphabet::Base16 => Err(AlphabetError::NotSupported),
            _ if width == 0 => Ok(None),
            _ => self.read_safe(width, buf).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_roundtrips_each_alphabet() {
        let mut buf = [0u8; 13];
        for alphabet in [Alphabet::Base32, Alphabet::Base64, Alphabet::Base256] {
            for value in [0u64, 13, 64, 100_000, u64::MAX] {
                let width = alphabet.write(&mut buf, value).unwrap();
                assert_eq!(width, alphabet.measure_needed_size(value).unwrap());
                assert_eq!(alphabet.read(width, &buf), value);
                assert_eq!(alphabet.read_safe(width, &buf), Ok(value));
            }
        }
    }

    #[test]
    fn nullable_dispatch() {
        let mut buf = [0u8; 13];
        for alphabet in [Alphabet::Base32, Alphabet::Base64, Alphabet::Base256] {
            assert_eq!(alphabet.write_nullable(&mut buf, None), Ok(0));
            assert_eq!(alphabet.read_nullable(0, &buf), Ok(None));
            let width = alphabet.write_nullable(&mut buf, Some(19)).unwrap();
            assert_eq!(alphabet.read_nullable(width, &buf), Ok(Some(19)));
        }
        assert_eq!(
            Alphabet::Base16.write_nullable(&mut buf, None),
            Err(AlphabetError::NotSupported)
        );
        assert_eq!(
            Alphabet::Base16.read_nullable(0, &buf),
            Err(AlphabetError::NotSupported)
        );
    }

    #[test]
    fn base16_is_single_symbol_only() {
        let mut buf = [0u8; 2];
        assert_eq!(Alphabet::Base16.write(&mut buf, 9), Ok(1));
        assert_eq!(Alphabet::Base16.read_safe(1, &buf), Ok(9));
        assert_eq!(
            Alphabet::Base16.measure_needed_size(16),
            Err(AlphabetError::ValueTooLarge(16))
        );
        assert_eq!(
            Alphabet::Base16.read_safe(2, &buf),
            Err(AlphabetError::InvalidWidth(2))
        );
    }
}
