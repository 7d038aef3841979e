//! bos-buffers - little-endian byte cursors for the BOS codec.
//!
//! [`Reader`] walks a borrowed slice with bounds-checked reads, [`Writer`]
//! appends into a growable buffer.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error returned by the bounds-checked [`Reader`] methods.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8")]
    InvalidUtf8,
}
