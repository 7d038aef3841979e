//! Self-describing variable-width unsigned integers.
//!
//! Layout of the first byte:
//! - `0x00..=0xfc`: the value itself
//! - `0xfd`: followed by a little-endian `u16`
//! - `0xfe`: followed by a little-endian `u32`
//! - `0xff`: followed by a little-endian `u64`
//!
//! Writers always pick the narrowest form.

use bos_buffers::{BufferError, Reader, Writer};

use crate::constants::{VARINT_MAX_DIRECT, VARINT_U16, VARINT_U32, VARINT_U64};

/// Reads one varint. Each escaped width is bounds checked before it is read.
pub fn read_varint(reader: &mut Reader<'_>) -> Result<u64, BufferError> {
    match reader.try_u8()? {
        VARINT_U64 => reader.try_u64(),
        VARINT_U32 => reader.try_u32().map(u64::from),
        VARINT_U16 => reader.try_u16().map(u64::from),
        direct => Ok(u64::from(direct)),
    }
}

/// Writes `value` using the minimal-width encoding.
pub fn write_varint(writer: &mut Writer, value: u64) {
    if value <= VARINT_MAX_DIRECT {
        writer.u8(value as u8);
    } else if value <= u64::from(u16::MAX) {
        writer.u8(VARINT_U16);
        writer.u16(value as u16);
    } else if value <= u64::from(u32::MAX) {
        writer.u8(VARINT_U32);
        writer.u32(value as u32);
    } else {
        writer.u8(VARINT_U64);
        writer.u64(value);
    }
}

/// Number of bytes [`write_varint`] emits for `value`.
pub fn varint_size(value: u64) -> usize {
    if value <= VARINT_MAX_DIRECT {
        1
    } else if value <= u64::from(u16::MAX) {
        3
    } else if value <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}
