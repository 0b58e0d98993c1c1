//! Output buffer with the two emission policies.
//!
//! REALLOC grows the buffer on demand and returns it whole; PAUSE hands
//! fixed-size chunks to a consumer through the shared cell in
//! [`crate::stream`]. Either policy can run over a caller-owned buffer,
//! in which case no resizing ever happens.

use std::mem;
use std::sync::Arc;

use crate::error::TranscodeError;
use crate::stream::Shared;

/// Minimum chunk capacity in PAUSE mode. The longest single token is a
/// quoted date (26 bytes); a chunk buffer below this floor could wedge
/// with a token that fits no chunk.
pub(crate) const MIN_CHUNK_CAPACITY: usize = 64;

/// Default output capacity derived from the input length. Mixed data
/// expands roughly 2.3x, null-heavy data up to 5x.
fn default_capacity(in_len: usize) -> usize {
    (in_len * 10) / 4
}

/// Allocates a zero-filled buffer, reporting failure instead of aborting.
fn alloc_buffer(len: usize) -> Result<Vec<u8>, TranscodeError> {
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| TranscodeError::Allocation)?;
    buf.resize(len, 0);
    Ok(buf)
}

pub(crate) struct Sink {
    /// Output buffer; its length is the current capacity.
    out: Vec<u8>,
    /// Write cursor. Only ever advances between flushes.
    out_idx: usize,
    /// A caller-owned buffer never grows.
    fixed: bool,
    /// Chunk handoff cell; `Some` selects the PAUSE policy.
    shared: Option<Arc<Shared>>,
}

impl Sink {
    /// Creates a REALLOC-mode sink. `capacity == 0` derives the initial
    /// capacity from the input length.
    pub fn realloc(
        in_len: usize,
        capacity: usize,
        fixed_buffer: Option<Vec<u8>>,
    ) -> Result<Self, TranscodeError> {
        let (out, fixed) = match fixed_buffer {
            Some(buf) => (buf, true),
            None => {
                let cap = if capacity == 0 {
                    default_capacity(in_len)
                } else {
                    capacity
                };
                (alloc_buffer(cap)?, false)
            }
        };
        Ok(Self {
            out,
            out_idx: 0,
            fixed,
            shared: None,
        })
    }

    /// Creates a PAUSE-mode sink flushing through `shared`. `chunk_size == 0`
    /// derives the chunk capacity from the input length; capacities below
    /// [`MIN_CHUNK_CAPACITY`] are raised to it, except for a caller-owned
    /// buffer, which must already meet the floor.
    pub fn pause(
        in_len: usize,
        chunk_size: usize,
        fixed_buffer: Option<Vec<u8>>,
        shared: Arc<Shared>,
    ) -> Result<Self, TranscodeError> {
        let (out, fixed) = match fixed_buffer {
            Some(buf) => {
                if buf.len() < MIN_CHUNK_CAPACITY {
                    return Err(TranscodeError::Allocation);
                }
                (buf, true)
            }
            None => {
                let cap = if chunk_size == 0 {
                    default_capacity(in_len)
                } else {
                    chunk_size
                };
                (alloc_buffer(cap.max(MIN_CHUNK_CAPACITY))?, false)
            }
        };
        Ok(Self {
            out,
            out_idx: 0,
            fixed,
            shared: Some(shared),
        })
    }

    /// Guarantees `n` writable bytes past the cursor.
    ///
    /// REALLOC grows to `max(capacity * 3 / 2, out_idx + n)`; PAUSE hands
    /// the current chunk to the consumer and blocks until it is drained.
    pub fn ensure_space(&mut self, n: usize) -> Result<(), TranscodeError> {
        if self.out_idx + n <= self.out.len() {
            return Ok(());
        }
        if self.shared.is_some() {
            self.flush_chunk()?;
            if self.out_idx + n > self.out.len() {
                return Err(TranscodeError::Allocation);
            }
            return Ok(());
        }
        if self.fixed {
            return Err(TranscodeError::Allocation);
        }
        self.grow(self.out_idx + n)
    }

    fn grow(&mut self, need: usize) -> Result<(), TranscodeError> {
        let new_len = need.max(self.out.len() + self.out.len() / 2);
        let mut buf = alloc_buffer(new_len)?;
        buf[..self.out_idx].copy_from_slice(&self.out[..self.out_idx]);
        self.out = buf;
        Ok(())
    }

    /// Writes a single byte. Space must have been ensured.
    #[inline]
    pub fn put(&mut self, b: u8) {
        self.out[self.out_idx] = b;
        self.out_idx += 1;
    }

    /// Writes a byte slice. Space must have been ensured.
    #[inline]
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.out[self.out_idx..self.out_idx + bytes.len()].copy_from_slice(bytes);
        self.out_idx += bytes.len();
    }

    /// Writes a byte slice of any length, ensuring space as needed.
    /// In PAUSE mode the slice splits across chunk boundaries in order.
    pub fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), TranscodeError> {
        if self.shared.is_none() {
            self.ensure_space(bytes.len())?;
            self.put_slice(bytes);
            return Ok(());
        }
        while !bytes.is_empty() {
            if self.out_idx == self.out.len() {
                self.flush_chunk()?;
            }
            let n = bytes.len().min(self.out.len() - self.out_idx);
            self.put_slice(&bytes[..n]);
            bytes = &bytes[n..];
        }
        Ok(())
    }

    /// Hands the current chunk to the consumer and blocks until drained.
    fn flush_chunk(&mut self) -> Result<(), TranscodeError> {
        if self.out_idx == 0 {
            return Ok(());
        }
        let shared = match &self.shared {
            Some(s) => Arc::clone(s),
            None => return Ok(()),
        };
        let mut cell = shared.lock();
        if cell.abandoned {
            return Err(TranscodeError::Abandoned);
        }
        cell.buf = mem::take(&mut self.out);
        cell.len = self.out_idx;
        cell.full = true;
        shared.produced.notify_one();
        while cell.full && !cell.abandoned {
            cell = shared.wait_drained(cell);
        }
        if cell.abandoned {
            return Err(TranscodeError::Abandoned);
        }
        // Take the buffer back; the consumer leaves it in place.
        self.out = mem::take(&mut cell.buf);
        self.out_idx = 0;
        Ok(())
    }

    /// Consumes the sink, returning the written prefix (REALLOC result).
    pub fn into_output(self) -> Vec<u8> {
        let mut out = self.out;
        out.truncate(self.out_idx);
        out
    }

    /// Consumes the sink, returning the buffer and cursor (PAUSE epilogue).
    pub fn into_parts(self) -> (Vec<u8>, usize) {
        (self.out, self.out_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realloc_grows_on_demand() {
        let mut sink = Sink::realloc(0, 4, None).unwrap();
        sink.write_all(b"0123456789").unwrap();
        sink.ensure_space(1).unwrap();
        sink.put(b'!');
        assert_eq!(sink.into_output(), b"0123456789!");
    }

    #[test]
    fn test_realloc_default_capacity_from_input_len() {
        // 100 input bytes -> 250 initial capacity; writing less returns
        // just the written prefix.
        let mut sink = Sink::realloc(100, 0, None).unwrap();
        sink.write_all(b"abc").unwrap();
        assert_eq!(sink.into_output(), b"abc");
    }

    #[test]
    fn test_fixed_buffer_exact_fit() {
        let mut sink = Sink::realloc(0, 0, Some(vec![0u8; 3])).unwrap();
        sink.write_all(b"abc").unwrap();
        assert_eq!(sink.into_output(), b"abc");
    }

    #[test]
    fn test_fixed_buffer_overflow_is_allocation_failure() {
        let mut sink = Sink::realloc(0, 0, Some(vec![0u8; 3])).unwrap();
        assert_eq!(
            sink.write_all(b"abcd"),
            Err(TranscodeError::Allocation)
        );
    }

    #[test]
    fn test_growth_keeps_written_prefix() {
        let mut sink = Sink::realloc(0, 2, None).unwrap();
        for _ in 0..100 {
            sink.ensure_space(1).unwrap();
            sink.put(b'x');
        }
        assert_eq!(sink.into_output(), vec![b'x'; 100]);
    }
}
