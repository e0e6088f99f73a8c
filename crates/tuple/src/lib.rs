//! Offset-table tuple container.
//!
//! A tuple is an ordered, fixed-count sequence of byte-string values laid
//! out as `[header][offset array][value bytes]`. The header is one
//! symbol carrying the offset-element width; each offset element is the
//! fixed-width-encoded cumulative length of the values up to and
//! including its index. Reaching value *k* therefore costs two offset
//! decodes at any tuple size — no preceding value is ever scanned.
//!
//! Writers append values in declared order into caller-owned memory,
//! widening the offset array in place when the running length outgrows
//! the current width, and seal in O(1). Readers decode sequentially or
//! by index; the `Safe` variants validate structure instead of trusting
//! it.
//!
//! # Example
//!
//! ```
//! use ftjson_tuple::{TupleReader, TupleWriter};
//!
//! let mut buf = [0u8; 64];
//! let mut writer = TupleWriter::new(&mut buf, 3);
//! writer.append_u64(42).unwrap();
//! writer.append_str("hello").unwrap();
//! writer.append_bool(true).unwrap();
//! let len = writer.seal().unwrap();
//!
//! let reader = TupleReader::new(&buf[..len], 3);
//! assert_eq!(reader.get_u64(0).unwrap(), 42);
//! assert_eq!(reader.get_str(1).unwrap(), "hello");
//! assert!(reader.get_bool(2).unwrap());
//! ```

mod reader;
mod safe_reader;
mod safe_writer;
mod writer;

pub use reader::TupleReader;
pub use safe_reader::SafeTupleReader;
pub use safe_writer::SafeTupleWriter;
pub use writer::TupleWriter;

use ftjson_alphabets::AlphabetError;
use ftjson_codecs::CodecError;
use thiserror::Error;

/// Total tuple length ceiling of the bounds-checked writer.
pub const MAX_SAFE_LENGTH: usize = 64 * 64 * 64 * 64 * 64;

/// Error type for tuple operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TupleError {
    /// Index at or beyond the declared value count.
    #[error("tuple index {index} out of range for {count} values")]
    OutOfRange { index: usize, count: usize },
    /// Seal attempted before all declared values were appended.
    #[error("tuple incomplete: {written} of {count} values appended")]
    Incomplete { written: usize, count: usize },
    /// A value (or the offset-array widening it forces) does not fit the
    /// remaining capacity of a bounds-checked writer.
    #[error("value does not fit in remaining tuple capacity")]
    ValueTooBig,
    /// A capacity at or above the representable ceiling.
    #[error("tuple capacity exceeds the maximum representable size")]
    TooBig,
    /// A structurally invalid argument on a checked entry point.
    #[error("bad argument: {0}")]
    BadArgument(&'static str),
    /// A string value holding invalid UTF-8.
    #[error("invalid utf-8 in string value")]
    InvalidUtf8,
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Alphabet(#[from] AlphabetError),
}
