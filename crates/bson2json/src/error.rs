//! Transcoder error type.

use bson2json_buffers::BufferError;
use thiserror::Error;

/// Error type for BSON to JSON transcoding.
///
/// The first failure aborts the walk; no partial output is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("BSON size must be >=5")]
    SizeTooSmall,
    #[error("BSON size exceeds input length.")]
    SizeExceedsInput,
    #[error("Bad string length")]
    BadStringLength,
    #[error("illegal boolean type value")]
    IllegalBoolean,
    #[error("Invalid array terminator byte")]
    InvalidTerminator,
    #[error("Allocation failure")]
    Allocation,
    #[error("Unknown BSON type")]
    UnknownType,
    #[error("BSON type incompatible with JSON")]
    IncompatibleType,
    /// The chunk consumer went away before end-of-stream. Only used to
    /// unwind the producer thread; never surfaced through the public API.
    #[error("output consumer went away")]
    Abandoned,
}

impl From<BufferError> for TranscodeError {
    fn from(_: BufferError) -> Self {
        // An element read past the end of the input means the declared
        // content overruns the buffer.
        TranscodeError::SizeExceedsInput
    }
}
