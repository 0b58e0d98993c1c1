//! Byte-level input layer for the bson2json transcoder.
//!
//! BSON is a little-endian binary format; [`Reader`] provides typed
//! little-endian reads with cursor tracking and bounds-checked `try_*`
//! variants that never advance the cursor on failure.

mod reader;

pub use reader::Reader;

use thiserror::Error;

/// Error type for buffer read operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
}
