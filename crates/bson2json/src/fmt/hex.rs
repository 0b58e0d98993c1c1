//! Lowercase hex rendering of a 12-byte ObjectId.

use crate::error::TranscodeError;
use crate::sink::Sink;

pub(crate) const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes a 12-byte ObjectId as a quoted 24-character lowercase hex
/// string, high nibble first.
pub(crate) fn write_object_id(sink: &mut Sink, bytes: &[u8]) -> Result<(), TranscodeError> {
    debug_assert_eq!(bytes.len(), 12);
    sink.ensure_space(26)?;
    sink.put(b'"');
    for &b in bytes {
        sink.put(HEX_DIGITS[(b >> 4) as usize]);
        sink.put(HEX_DIGITS[(b & 0x0f) as usize]);
    }
    sink.put(b'"');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(bytes: &[u8]) -> String {
        let mut sink = Sink::realloc(0, 32, None).unwrap();
        write_object_id(&mut sink, bytes).unwrap();
        String::from_utf8(sink.into_output()).unwrap()
    }

    #[test]
    fn test_object_id_hex() {
        let id = [
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x10, 0x20, 0x30, 0x40,
        ];
        assert_eq!(format(&id), "\"0123456789abcdef10203040\"");
    }

    #[test]
    fn test_object_id_all_zero_and_all_ff() {
        assert_eq!(format(&[0u8; 12]), "\"000000000000000000000000\"");
        assert_eq!(format(&[0xffu8; 12]), "\"ffffffffffffffffffffffff\"");
    }
}
