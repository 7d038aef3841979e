//! Decode and encode error types.

use thiserror::Error;

/// Why a buffer was rejected by the validator or the decoder.
///
/// Offsets are absolute byte positions in the input buffer (the header
/// occupies offsets `0..4`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("size too small to be valid: {len} bytes")]
    BufferTooSmall { len: usize },
    #[error("declared size {declared} is below the 5-byte minimum")]
    DeclaredSizeTooSmall { declared: u32 },
    #[error("declared size {declared} exceeds the {len} bytes supplied")]
    DeclaredSizeExceedsBuffer { declared: u32, len: usize },
    #[error("invalid data type 0x{tag:02x} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("payload truncated at offset {offset}")]
    Truncated { offset: usize },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("nesting deeper than {max_depth} at offset {offset}")]
    TooDeep { max_depth: usize, offset: usize },
    #[error("{unused} unused bytes after the root value (declared size {declared})")]
    TrailingBytes { unused: usize, declared: u32 },
}

impl DecodeError {
    /// Stable, machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            DecodeError::BufferTooSmall { .. }
            | DecodeError::DeclaredSizeTooSmall { .. }
            | DecodeError::DeclaredSizeExceedsBuffer { .. } => "MALFORMED_HEADER",
            DecodeError::UnknownTag { .. } => "UNKNOWN_TAG",
            DecodeError::Truncated { .. } => "TRUNCATED",
            DecodeError::InvalidUtf8 { .. } => "INVALID_UTF8",
            DecodeError::TooDeep { .. } => "TOO_DEEP",
            DecodeError::TrailingBytes { .. } => "TRAILING_BYTES",
        }
    }

    /// Byte offset the error points at, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::UnknownTag { offset, .. }
            | DecodeError::Truncated { offset }
            | DecodeError::InvalidUtf8 { offset }
            | DecodeError::TooDeep { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Error returned by the encoder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("encoded size {size} does not fit the 32-bit size header")]
    TooLarge { size: usize },
}

impl EncodeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EncodeError::TooLarge { .. } => "TOO_LARGE",
        }
    }
}
