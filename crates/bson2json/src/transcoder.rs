//! The recursive document/array walker.
//!
//! A single pass over the input: framing punctuation, key escaping, and
//! per-type value dispatch, all emitted left-to-right into the sink.

use bson2json_buffers::Reader;

use crate::constants::*;
use crate::error::TranscodeError;
use crate::escape;
use crate::fmt;
use crate::sink::Sink;

pub(crate) struct Transcoder<'a> {
    reader: Reader<'a>,
    sink: Sink,
}

impl<'a> Transcoder<'a> {
    pub fn new(input: &'a [u8], sink: Sink) -> Self {
        Self {
            reader: Reader::new(input),
            sink,
        }
    }

    pub fn into_sink(self) -> Sink {
        self.sink
    }

    /// Entry point: validates the top-level frame, then walks it.
    pub fn transcode_document(&mut self, is_array: bool) -> Result<(), TranscodeError> {
        let data = self.reader.data;
        if data.len() < 4 {
            return Err(TranscodeError::SizeExceedsInput);
        }
        let size = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        if size < 5 {
            return Err(TranscodeError::SizeTooSmall);
        }
        let size = size as usize;
        if size > data.len() {
            return Err(TranscodeError::SizeExceedsInput);
        }
        if data[size - 1] != 0 {
            return Err(TranscodeError::InvalidTerminator);
        }
        self.transcode_object(is_array)
    }

    fn transcode_object(&mut self, is_array: bool) -> Result<(), TranscodeError> {
        let offset = self.reader.x;
        let size = self.reader.try_i32()?;
        if size < 5 {
            return Err(TranscodeError::SizeTooSmall);
        }
        let size = size as usize;
        if size > self.reader.len() - offset {
            return Err(TranscodeError::SizeExceedsInput);
        }
        self.sink.ensure_space(1)?;
        self.sink.put(if is_array { b'[' } else { b'{' });
        let mut arr_idx: u32 = 0;
        let mut wrote_any = false;
        loop {
            let tag = self.reader.try_u8()?;
            if tag == 0 {
                break;
            }
            if tag == TYPE_UNDEFINED {
                // No JSON encoding: the element and its key vanish, and
                // the comma decision stays with whoever writes next.
                self.skip_key(is_array, arr_idx)?;
                arr_idx += 1;
                continue;
            }
            if wrote_any {
                self.sink.ensure_space(1)?;
                self.sink.put(b',');
            }
            if is_array {
                self.skip_key(true, arr_idx)?;
            } else {
                self.sink.ensure_space(1)?;
                self.sink.put(b'"');
                escape::escape_cstr(&mut self.reader, &mut self.sink)?;
                self.reader.try_skip(1)?;
                self.sink.ensure_space(2)?;
                self.sink.put(b'"');
                self.sink.put(b':');
            }
            self.transcode_element(tag)?;
            wrote_any = true;
            arr_idx += 1;
        }
        self.sink.ensure_space(1)?;
        self.sink.put(if is_array { b']' } else { b'}' });
        Ok(())
    }

    /// Consumes an element key. Array index keys are the decimal digits of
    /// `arr_idx` plus a null terminator, written in order by every BSON
    /// encoder, so they skip by width instead of being parsed.
    fn skip_key(&mut self, is_array: bool, arr_idx: u32) -> Result<(), TranscodeError> {
        if is_array {
            let width = fmt::int::digit_count(arr_idx) + 1;
            debug_assert!(
                self.reader.x + width <= self.reader.len()
                    && self.reader.data[self.reader.x + width - 1] == 0,
                "array index key out of order"
            );
            self.reader.try_skip(width)?;
        } else {
            let len = self.reader.find_zero()?;
            self.reader.try_skip(len + 1)?;
        }
        Ok(())
    }

    fn transcode_element(&mut self, tag: u8) -> Result<(), TranscodeError> {
        match tag {
            TYPE_NUMBER => {
                let d = self.reader.try_f64()?;
                if d.is_finite() {
                    fmt::float::write_double(&mut self.sink, d)
                } else {
                    self.sink.write_all(b"null")
                }
            }
            TYPE_STRING => self.transcode_string(),
            TYPE_OBJECT => self.transcode_object(false),
            TYPE_ARRAY => {
                self.transcode_object(true)?;
                if self.reader.data[self.reader.x - 1] != 0 {
                    return Err(TranscodeError::InvalidTerminator);
                }
                Ok(())
            }
            TYPE_OID => {
                let bytes = self.reader.try_buf(12)?;
                fmt::hex::write_object_id(&mut self.sink, bytes)
            }
            TYPE_BOOLEAN => match self.reader.try_u8()? {
                0 => self.sink.write_all(b"false"),
                1 => self.sink.write_all(b"true"),
                _ => Err(TranscodeError::IllegalBoolean),
            },
            TYPE_DATE => {
                let ms = self.reader.try_i64()?;
                fmt::date::write_date(&mut self.sink, ms)
            }
            TYPE_NULL => self.sink.write_all(b"null"),
            TYPE_INT => {
                let v = self.reader.try_i32()?;
                fmt::int::write_int(&mut self.sink, i64::from(v))
            }
            TYPE_LONG => {
                let v = self.reader.try_i64()?;
                fmt::int::write_int(&mut self.sink, v)
            }
            TYPE_BINARY | TYPE_REGEXP | TYPE_DBPOINTER | TYPE_CODE | TYPE_SYMBOL
            | TYPE_CODE_W_SCOPE | TYPE_TIMESTAMP | TYPE_DECIMAL128 | TYPE_MIN_KEY
            | TYPE_MAX_KEY => Err(TranscodeError::IncompatibleType),
            _ => Err(TranscodeError::UnknownType),
        }
    }

    fn transcode_string(&mut self) -> Result<(), TranscodeError> {
        let size = self.reader.try_i32()?;
        if size < 1 {
            return Err(TranscodeError::BadStringLength);
        }
        let size = size as usize;
        if size > self.reader.remaining() {
            return Err(TranscodeError::BadStringLength);
        }
        if self.reader.data[self.reader.x + size - 1] != 0 {
            return Err(TranscodeError::BadStringLength);
        }
        self.sink.ensure_space(1)?;
        self.sink.put(b'"');
        let bytes = self.reader.try_buf(size - 1)?;
        escape::escape_bytes(&mut self.sink, bytes)?;
        self.reader.try_skip(1)?;
        self.sink.ensure_space(1)?;
        self.sink.put(b'"');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcode(input: &[u8], is_array: bool) -> Result<Vec<u8>, TranscodeError> {
        let sink = Sink::realloc(input.len(), 0, None)?;
        let mut t = Transcoder::new(input, sink);
        t.transcode_document(is_array)?;
        Ok(t.into_sink().into_output())
    }

    #[test]
    fn test_empty_object() {
        let input = [0x05, 0, 0, 0, 0];
        assert_eq!(transcode(&input, false).unwrap(), b"{}");
        assert_eq!(transcode(&input, true).unwrap(), b"[]");
    }

    #[test]
    fn test_single_int() {
        let input = [0x0c, 0, 0, 0, 0x10, b'a', 0, 42, 0, 0, 0, 0];
        assert_eq!(transcode(&input, false).unwrap(), b"{\"a\":42}");
    }

    #[test]
    fn test_size_too_small() {
        let input = [0x04, 0, 0, 0, 0];
        assert_eq!(
            transcode(&input, false),
            Err(TranscodeError::SizeTooSmall)
        );
    }

    #[test]
    fn test_size_exceeds_input() {
        let input = [0x10, 0, 0, 0, 0];
        assert_eq!(
            transcode(&input, false),
            Err(TranscodeError::SizeExceedsInput)
        );
    }

    #[test]
    fn test_missing_terminator() {
        let input = [0x05, 0, 0, 0, 1];
        assert_eq!(
            transcode(&input, false),
            Err(TranscodeError::InvalidTerminator)
        );
    }
}
