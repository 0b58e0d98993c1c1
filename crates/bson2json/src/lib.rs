//! Streaming BSON → JSON transcoder.
//!
//! Converts a BSON wire document to JSON text in a single linear pass,
//! with no intermediate value tree: string bytes are block-copied (with
//! JSON escaping applied in place), numbers, dates, and ObjectIds go
//! through specialized formatters, and framing punctuation is emitted as
//! the walk proceeds.
//!
//! Two modes:
//!
//! - [`transcode`] converts synchronously into one growable buffer.
//! - [`stream`] runs the transcoder on a producer thread and yields
//!   fixed-capacity chunks through the [`Chunks`] iterator; the chunks
//!   concatenate to exactly the [`transcode`] output.
//!
//! BSON types with no JSON encoding (binary, regex, decimal128, and
//! friends) are a fatal error; `undefined` elements are omitted entirely.
//!
//! # Example
//!
//! ```
//! use bson2json::{transcode, TranscodeOptions};
//!
//! // {"a": 42} in BSON wire bytes
//! let doc = [0x0c, 0, 0, 0, 0x10, b'a', 0, 42, 0, 0, 0, 0];
//! let json = transcode(&doc, TranscodeOptions::default()).unwrap();
//! assert_eq!(json, b"{\"a\":42}");
//! ```

pub mod constants;

mod error;
mod escape;
mod fmt;
mod isa;
mod sink;
mod stream;
mod transcoder;

pub use error::TranscodeError;
pub use stream::Chunks;

use sink::Sink;
use transcoder::Transcoder;

/// Configuration for a single transcode.
#[derive(Debug, Default)]
pub struct TranscodeOptions {
    /// Render the top-level document as a JSON array instead of an object.
    pub is_array: bool,
    /// Initial output capacity ([`transcode`]) or chunk capacity
    /// ([`stream`]); 0 derives a default from the input length.
    pub chunk_size: usize,
    /// Caller-owned output buffer. Its length is the capacity and no
    /// resizing occurs; running out of space is a hard error. On success
    /// [`transcode`] returns ownership through the result.
    pub fixed_buffer: Option<Vec<u8>>,
}

/// Converts one BSON document to JSON synchronously.
///
/// On success the returned bytes are a single JSON value mirroring the
/// input's structure and key order. On failure no output is returned.
pub fn transcode(input: &[u8], opts: TranscodeOptions) -> Result<Vec<u8>, TranscodeError> {
    let sink = Sink::realloc(input.len(), opts.chunk_size, opts.fixed_buffer)?;
    let mut transcoder = Transcoder::new(input, sink);
    transcoder.transcode_document(opts.is_array)?;
    Ok(transcoder.into_sink().into_output())
}

/// Converts one BSON document to JSON on a producer thread, yielding
/// chunks of at most the configured capacity as the consumer pulls them.
///
/// A mid-stream failure terminates the iterator with one `Err`; the
/// producer blocks between chunks until the consumer pulls again.
pub fn stream(input: Vec<u8>, opts: TranscodeOptions) -> Chunks {
    stream::spawn(input, opts)
}
