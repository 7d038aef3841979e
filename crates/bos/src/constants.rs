//! Wire-level constants and the type tag table.

/// Size of the little-endian `u32` total-size header.
pub const HEADER_SIZE: usize = 4;

/// Smallest buffer that can hold a value: header plus one tag byte.
pub const MIN_BUFFER_SIZE: usize = HEADER_SIZE + 1;

/// Largest varint value stored directly in the marker byte.
pub const VARINT_MAX_DIRECT: u64 = 0xfc;
/// Marker byte followed by a `u16`.
pub const VARINT_U16: u8 = 0xfd;
/// Marker byte followed by a `u32`.
pub const VARINT_U32: u8 = 0xfe;
/// Marker byte followed by a `u64`.
pub const VARINT_U64: u8 = 0xff;

/// Default ceiling for array/object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// One-byte discriminator in front of every encoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Null = 0x00,
    Bool = 0x01,
    Int8 = 0x02,
    Int16 = 0x03,
    Int32 = 0x04,
    Int64 = 0x05,
    UInt8 = 0x06,
    UInt16 = 0x07,
    UInt32 = 0x08,
    UInt64 = 0x09,
    Float = 0x0a,
    Double = 0x0b,
    String = 0x0c,
    Bytes = 0x0d,
    Array = 0x0e,
    Object = 0x0f,
}

impl Tag {
    /// Maps a tag byte to its kind; `None` for bytes above `0x0f`.
    pub fn from_u8(byte: u8) -> Option<Tag> {
        let tag = match byte {
            0x00 => Tag::Null,
            0x01 => Tag::Bool,
            0x02 => Tag::Int8,
            0x03 => Tag::Int16,
            0x04 => Tag::Int32,
            0x05 => Tag::Int64,
            0x06 => Tag::UInt8,
            0x07 => Tag::UInt16,
            0x08 => Tag::UInt32,
            0x09 => Tag::UInt64,
            0x0a => Tag::Float,
            0x0b => Tag::Double,
            0x0c => Tag::String,
            0x0d => Tag::Bytes,
            0x0e => Tag::Array,
            0x0f => Tag::Object,
            _ => return None,
        };
        Some(tag)
    }

    /// Payload width of fixed-size kinds. `None` for length-prefixed and
    /// container kinds.
    pub fn width(self) -> Option<usize> {
        match self {
            Tag::Null => Some(0),
            Tag::Bool | Tag::Int8 | Tag::UInt8 => Some(1),
            Tag::Int16 | Tag::UInt16 => Some(2),
            Tag::Int32 | Tag::UInt32 | Tag::Float => Some(4),
            Tag::Int64 | Tag::UInt64 | Tag::Double => Some(8),
            Tag::String | Tag::Bytes | Tag::Array | Tag::Object => None,
        }
    }

    /// Arrays and objects; the only kinds that count toward nesting depth.
    pub fn is_container(self) -> bool {
        matches!(self, Tag::Array | Tag::Object)
    }

    /// Lowercase kind name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Bool => "bool",
            Tag::Int8 => "int8",
            Tag::Int16 => "int16",
            Tag::Int32 => "int32",
            Tag::Int64 => "int64",
            Tag::UInt8 => "uint8",
            Tag::UInt16 => "uint16",
            Tag::UInt32 => "uint32",
            Tag::UInt64 => "uint64",
            Tag::Float => "float",
            Tag::Double => "double",
            Tag::String => "string",
            Tag::Bytes => "bytes",
            Tag::Array => "array",
            Tag::Object => "object",
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag as u8
    }
}
