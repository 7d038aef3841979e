//! Size introspection.

use crate::constants::{Tag, HEADER_SIZE};
use crate::encoder::{float_tag, integer_tag, u_integer_tag};
use crate::value::BosValue;
use crate::varint::varint_size;

/// Reads the declared total size from the header without validating
/// anything else. Returns 0 when `data` is shorter than the header.
///
/// A non-zero result says nothing about whether the buffer is well formed.
pub fn declared_size(data: &[u8]) -> u32 {
    match data.get(..HEADER_SIZE) {
        Some(&[a, b, c, d]) => u32::from_le_bytes([a, b, c, d]),
        _ => 0,
    }
}

/// Exact number of bytes [`serialize`](crate::serialize) produces for
/// `value`, header included.
pub fn encoded_size(value: &BosValue) -> usize {
    HEADER_SIZE + value_size(value)
}

fn value_size(value: &BosValue) -> usize {
    1 + match value {
        BosValue::Null => 0,
        BosValue::Bool(_) => 1,
        BosValue::Integer(i) => width(integer_tag(*i)),
        BosValue::UInteger(u) => width(u_integer_tag(*u)),
        BosValue::Float(f) => width(float_tag(*f)),
        BosValue::Str(s) => blob_size(s.len()),
        BosValue::Bytes(b) => blob_size(b.len()),
        BosValue::Array(items) => {
            varint_size(items.len() as u64) + items.iter().map(value_size).sum::<usize>()
        }
        BosValue::Object(map) => {
            varint_size(map.len() as u64)
                + map
                    .iter()
                    .map(|(key, value)| blob_size(key.len()) + value_size(value))
                    .sum::<usize>()
        }
    }
}

fn width(tag: Tag) -> usize {
    tag.width().unwrap_or(0)
}

fn blob_size(len: usize) -> usize {
    varint_size(len as u64) + len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_size_reads_header_only() {
        assert_eq!(declared_size(&[12, 0, 0, 0]), 12);
        assert_eq!(declared_size(&[0x78, 0x56, 0x34, 0x12, 0xff]), 0x1234_5678);
        assert_eq!(declared_size(&[1, 2, 3]), 0);
        assert_eq!(declared_size(&[]), 0);
    }

    #[test]
    fn encoded_size_reference_values() {
        assert_eq!(encoded_size(&BosValue::Null), 5);
        assert_eq!(encoded_size(&BosValue::Bool(true)), 6);
        assert_eq!(encoded_size(&BosValue::Integer(-300)), 7);
        assert_eq!(encoded_size(&BosValue::Float(5.5)), 9);
        assert_eq!(encoded_size(&BosValue::from("string")), 12);
        assert_eq!(encoded_size(&BosValue::Bytes(vec![0; 300])), 308);
        assert_eq!(encoded_size(&BosValue::Array(vec![BosValue::Integer(1)])), 8);
        let obj: BosValue = [("key0".to_string(), BosValue::Integer(1))].into_iter().collect();
        assert_eq!(encoded_size(&obj), 13);
    }
}
