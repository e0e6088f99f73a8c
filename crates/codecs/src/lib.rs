//! Scalar codecs layered on the symbol alphabets.
//!
//! Booleans ride a single quartet, byte arrays pack three raw bytes into
//! four 6-bit symbols, floats are bit-rotated so the sign and exponent
//! land in the low bits before integer encoding, and decimals pack their
//! scale and sign into the leading symbol. Every codec leaves the width
//! of its output to be carried externally (by a tuple's offset deltas).

pub mod binary;
pub mod boolean;
pub mod decimal;
pub mod float;

pub use decimal::Decimal;

use ftjson_alphabets::AlphabetError;
use thiserror::Error;

/// Error type for scalar decode operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
    /// A nullable boolean decoded to a code other than 0, 1 or 2.
    #[error("invalid boolean code: {0}")]
    InvalidBoolean(u8),
    /// An encoded byte-array length no packing could have produced.
    #[error("invalid encoded length: {0}")]
    InvalidLength(usize),
    /// A single-precision payload exceeding 32 bits.
    #[error("single-precision payload out of range")]
    InvalidSingle,
    /// A decimal scale above 28.
    #[error("decimal scale out of range: {0}")]
    InvalidScale(u8),
}
