//! BOS encoder.

use bos_buffers::Writer;

use crate::constants::Tag;
use crate::error::EncodeError;
use crate::size::encoded_size;
use crate::value::{parse_data_uri, BosValue};
use crate::varint::write_varint;

/// Narrowest integer kind holding `value`. Non-negative values use the
/// unsigned kinds.
pub fn integer_tag(value: i64) -> Tag {
    if value >= 0 {
        return u_integer_tag(value as u64);
    }
    if value >= i64::from(i8::MIN) {
        Tag::Int8
    } else if value >= i64::from(i16::MIN) {
        Tag::Int16
    } else if value >= i64::from(i32::MIN) {
        Tag::Int32
    } else {
        Tag::Int64
    }
}

pub fn u_integer_tag(value: u64) -> Tag {
    if value <= u64::from(u8::MAX) {
        Tag::UInt8
    } else if value <= u64::from(u16::MAX) {
        Tag::UInt16
    } else if value <= u64::from(u32::MAX) {
        Tag::UInt32
    } else {
        Tag::UInt64
    }
}

/// `Float` when `value` survives a round trip through `f32`, else `Double`.
pub fn float_tag(value: f64) -> Tag {
    if f64::from(value as f32) == value {
        Tag::Float
    } else {
        Tag::Double
    }
}

/// Encodes value trees into BOS buffers.
///
/// # Example
///
/// ```
/// use bos::{BosEncoder, BosValue};
///
/// let mut encoder = BosEncoder::new();
/// let data = encoder.encode(&BosValue::Null).unwrap();
/// assert_eq!(data, [5, 0, 0, 0, 0]);
/// ```
pub struct BosEncoder {
    pub writer: Writer,
}

impl Default for BosEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BosEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writer: Writer::with_alloc_size(capacity),
        }
    }

    pub fn encode(&mut self, value: &BosValue) -> Result<Vec<u8>, EncodeError> {
        self.begin();
        self.write_any(value);
        self.finish()
    }

    /// Encodes a JSON document. `data:application/octet-stream;base64,`
    /// strings are stored as bytes.
    pub fn encode_json(&mut self, value: &serde_json::Value) -> Result<Vec<u8>, EncodeError> {
        self.begin();
        self.write_json(value);
        self.finish()
    }

    fn begin(&mut self) {
        self.writer.reset();
        self.writer.u32(0);
    }

    fn finish(&mut self) -> Result<Vec<u8>, EncodeError> {
        let size = self.writer.len();
        match u32::try_from(size) {
            Ok(declared) => {
                self.writer.patch_u32(0, declared);
                tracing::trace!(size, "bos buffer encoded");
                Ok(self.writer.flush())
            }
            Err(_) => {
                self.writer.reset();
                tracing::debug!(size, "bos encoding too large for the size header");
                Err(EncodeError::TooLarge { size })
            }
        }
    }

    pub fn write_any(&mut self, value: &BosValue) {
        match value {
            BosValue::Null => self.write_null(),
            BosValue::Bool(b) => self.write_boolean(*b),
            BosValue::Integer(i) => self.write_integer(*i),
            BosValue::UInteger(u) => self.write_u_integer(*u),
            BosValue::Float(f) => self.write_float(*f),
            BosValue::Str(s) => self.write_str(s),
            BosValue::Bytes(b) => self.write_bin(b),
            BosValue::Array(items) => {
                self.write_arr_hdr(items.len());
                for item in items {
                    self.write_any(item);
                }
            }
            BosValue::Object(map) => {
                self.write_obj_hdr(map.len());
                for (key, value) in map {
                    self.write_key(key);
                    self.write_any(value);
                }
            }
        }
    }

    pub fn write_json(&mut self, value: &serde_json::Value) {
        match value {
            serde_json::Value::Null => self.write_null(),
            serde_json::Value::Bool(b) => self.write_boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    self.write_integer(i);
                } else if let Some(u) = n.as_u64() {
                    self.write_u_integer(u);
                } else {
                    self.write_float(n.as_f64().unwrap_or(0.0));
                }
            }
            serde_json::Value::String(s) => match parse_data_uri(s) {
                Some(bytes) => self.write_bin(&bytes),
                None => self.write_str(s),
            },
            serde_json::Value::Array(items) => {
                self.write_arr_hdr(items.len());
                for item in items {
                    self.write_json(item);
                }
            }
            serde_json::Value::Object(map) => {
                self.write_obj_hdr(map.len());
                for (key, value) in map {
                    self.write_key(key);
                    self.write_json(value);
                }
            }
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(Tag::Null.into());
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(Tag::Bool.into());
        self.writer.u8(u8::from(b));
    }

    pub fn write_integer(&mut self, i: i64) {
        let tag = integer_tag(i);
        self.writer.u8(tag.into());
        match tag {
            Tag::Int8 => self.writer.i8(i as i8),
            Tag::Int16 => self.writer.i16(i as i16),
            Tag::Int32 => self.writer.i32(i as i32),
            Tag::Int64 => self.writer.i64(i),
            _ => self.write_u_payload(tag, i as u64),
        }
    }

    pub fn write_u_integer(&mut self, u: u64) {
        let tag = u_integer_tag(u);
        self.writer.u8(tag.into());
        self.write_u_payload(tag, u);
    }

    fn write_u_payload(&mut self, tag: Tag, u: u64) {
        match tag {
            Tag::UInt8 => self.writer.u8(u as u8),
            Tag::UInt16 => self.writer.u16(u as u16),
            Tag::UInt32 => self.writer.u32(u as u32),
            _ => self.writer.u64(u),
        }
    }

    pub fn write_float(&mut self, f: f64) {
        let tag = float_tag(f);
        self.writer.u8(tag.into());
        if tag == Tag::Float {
            self.writer.f32(f as f32);
        } else {
            self.writer.f64(f);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.writer.u8(Tag::String.into());
        self.write_key(s);
    }

    /// Object keys are strings without the tag byte.
    pub fn write_key(&mut self, s: &str) {
        write_varint(&mut self.writer, s.len() as u64);
        self.writer.utf8(s);
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.writer.u8(Tag::Bytes.into());
        write_varint(&mut self.writer, buf.len() as u64);
        self.writer.buf(buf);
    }

    pub fn write_arr_hdr(&mut self, count: usize) {
        self.writer.u8(Tag::Array.into());
        write_varint(&mut self.writer, count as u64);
    }

    pub fn write_obj_hdr(&mut self, count: usize) {
        self.writer.u8(Tag::Object.into());
        write_varint(&mut self.writer, count as u64);
    }
}

/// Encodes `value` into a freshly sized buffer.
pub fn serialize(value: &BosValue) -> Result<Vec<u8>, EncodeError> {
    BosEncoder::with_capacity(encoded_size(value)).encode(value)
}
