//! Printable symbol alphabets and variable-width integer codecs.
//!
//! An alphabet maps a fixed-size bit group (4, 5 or 6 bits, or raw bytes)
//! to a byte value. The printable alphabets are biased so that every
//! encoded byte lands in a printable ASCII range, which makes encoded
//! values safe to embed in URLs and log lines. Each alphabet defines a
//! table of legal *width classes* — the number of symbols an encoded
//! integer may occupy — and the codec always picks the smallest class
//! that fits a magnitude.
//!
//! # Example
//!
//! ```
//! use ftjson_alphabets::base64;
//!
//! let mut buf = [0u8; 11];
//! let width = base64::write(&mut buf, 4711);
//! assert_eq!(width, base64::measure_needed_size(4711));
//! assert_eq!(base64::read(width, &buf), 4711);
//! ```

pub mod alphabet;
pub mod base16;
pub mod base256;
pub mod base32;
pub mod base64;
mod zigzag;

pub use alphabet::Alphabet;
pub use zigzag::{unzigzag, zigzag};

use thiserror::Error;

/// Error type for alphabet operations.
///
/// Only the checked (`*_safe`) entry points produce errors; the fast
/// entry points trust their callers and document that trust boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    /// The width is not one of the alphabet's legal width classes.
    #[error("invalid width class: {0}")]
    InvalidWidth(usize),
    /// The buffer is too short for the requested width.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// An encoded byte is outside the alphabet's symbol range.
    #[error("byte 0x{0:02x} is not a symbol of this alphabet")]
    InvalidSymbol(u8),
    /// The value cannot be represented by this alphabet.
    #[error("value {0} does not fit any width class of this alphabet")]
    ValueTooLarge(u64),
    /// The operation is not provided by this alphabet.
    #[error("operation not supported by this alphabet")]
    NotSupported,
}
