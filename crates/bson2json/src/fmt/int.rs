//! Decimal text for 32- and 64-bit signed integers.

use crate::error::TranscodeError;
use crate::sink::Sink;

/// Longest decimal text of an i64: sign plus 19 digits.
const MAX_INT_TEXT: usize = 20;

/// Writes the decimal representation of `v`.
pub(crate) fn write_int(sink: &mut Sink, v: i64) -> Result<(), TranscodeError> {
    let mut buf = itoa::Buffer::new();
    let text = buf.format(v);
    sink.ensure_space(MAX_INT_TEXT)?;
    sink.put_slice(text.as_bytes());
    Ok(())
}

/// Base-10 digit count of `v`; `digit_count(0) == 1`.
///
/// An array index key is spelled as its decimal digits plus a null
/// terminator, so the walker skips `digit_count(idx) + 1` bytes.
pub(crate) fn digit_count(v: u32) -> usize {
    let mut n = 1;
    let mut v = v / 10;
    while v != 0 {
        n += 1;
        v /= 10;
    }
    n
}
