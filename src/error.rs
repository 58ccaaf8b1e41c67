//! Error types for wire encode/decode operations.

use thiserror::Error;

/// Result type for wire operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for wire operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input ended mid-varint, mid-fixed-width value, or before the end of
    /// a length-delimited payload.
    #[error("truncated message: needed {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    /// Stream source ended before a complete message was read.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A varint exceeds 64 bits, or a decoded value does not fit the
    /// target field's width.
    #[error("integer overflow: {0}")]
    Overflow(&'static str),

    /// A varint decoded for a bool field was neither 0 nor 1.
    #[error("invalid bool value: {0}")]
    InvalidBool(u64),

    /// A tag carried a wire type outside 0, 1, 2 and 5.
    #[error("invalid wire type: {0}")]
    MalformedTag(u8),

    /// A framed message exceeds the configured maximum size.
    #[error("message size {size} exceeds maximum {max}")]
    MessageTooLarge { size: usize, max: usize },

    /// A required field was not set at encode time.
    #[error("required field {field} not set")]
    RequiredFieldMissing { field: u32 },

    /// A string field's payload is not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// IO error from the stream transport.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a truncated-input error.
    pub(crate) fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }
}
