//! Tagged, self-delimiting binary encoding for typed values.
//!
//! A record is `[tag][payload][Terminator]`. Payloads are printable text
//! (UTF-8, base-36 digits, float and time renderings) so no payload byte
//! can collide with the tag range, and a forward scan for the terminator
//! always finds the end of the record.

mod type_tag;
pub use type_tag::{RESERVED_TAG_FLOOR, TypeTag};

mod value;
pub use value::Value;

mod scalar;
pub use scalar::{Scalar, ScalarKind};

mod time_text;
pub use time_text::{format_time, parse_time};

pub mod radix;

mod encoder;
pub use encoder::{encode, encode_into};

mod decoder;
pub use decoder::{Decode, Record, decode};

/// Length of the record starting at `offset`, terminator included.
///
/// Returns `None` if no terminator follows `offset` in `buffer`.
#[inline]
pub fn record_len(buffer: &[u8], offset: usize) -> Option<usize> {
    buffer
        .get(offset..)?
        .iter()
        .position(|&b| b == TypeTag::Terminator.as_byte())
        .map(|pos| pos + 1)
}
