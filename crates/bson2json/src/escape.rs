//! JSON string escaping engine.
//!
//! Clean runs are block-copied; the dispatched kernel (see [`crate::isa`])
//! finds the first byte that needs escaping. Bytes >= 0x80 pass through
//! verbatim: the input's UTF-8 encoding is preserved unchanged, including
//! any `EF BF BD` replacement sequences an encoder produced upstream.

use bson2json_buffers::Reader;

use crate::error::TranscodeError;
use crate::fmt::hex::HEX_DIGITS;
use crate::isa;
use crate::sink::Sink;

/// Escapes exactly `bytes` into the sink, per ECMA-404: `\b \t \n \f \r`,
/// `\"`, `\\`, and `\u00xx` with lowercase hex for the other controls.
pub(crate) fn escape_bytes(sink: &mut Sink, bytes: &[u8]) -> Result<(), TranscodeError> {
    let scan = isa::scan();
    let mut rest = bytes;
    loop {
        match scan(rest) {
            None => return sink.write_all(rest),
            Some(i) => {
                sink.write_all(&rest[..i])?;
                write_escape(sink, rest[i])?;
                rest = &rest[i + 1..];
            }
        }
    }
}

/// Escapes bytes from the reader's cursor up to (not including) the next
/// zero byte, leaving the cursor at that zero byte.
pub(crate) fn escape_cstr(reader: &mut Reader<'_>, sink: &mut Sink) -> Result<(), TranscodeError> {
    let len = reader.find_zero()?;
    let bytes = reader.try_buf(len)?;
    escape_bytes(sink, bytes)
}

fn write_escape(sink: &mut Sink, b: u8) -> Result<(), TranscodeError> {
    sink.ensure_space(6)?;
    match b {
        0x08 => sink.put_slice(b"\\b"),
        0x09 => sink.put_slice(b"\\t"),
        0x0a => sink.put_slice(b"\\n"),
        0x0c => sink.put_slice(b"\\f"),
        0x0d => sink.put_slice(b"\\r"),
        b'"' => sink.put_slice(b"\\\""),
        b'\\' => sink.put_slice(b"\\\\"),
        _ => {
            sink.put_slice(b"\\u00");
            sink.put(HEX_DIGITS[(b >> 4) as usize]);
            sink.put(HEX_DIGITS[(b & 0x0f) as usize]);
        }
    }
    Ok(())
}
