//! Value-tree construction interface used by the decoder.
//!
//! The walker in [`crate::parser`] knows the wire grammar but not what it is
//! building. It reports every decoded item to a [`ValueBuilder`], which owns
//! the representation. String and byte payloads are lent as slices of the
//! input buffer; builders copy whatever they keep.

use indexmap::IndexMap;

use crate::value::{to_data_uri, BosValue};

/// Receives decoded items and assembles them into nodes.
///
/// Constructors never fail. The decoder builds children before handing them
/// to their parent, so a failed decode drops every partially built node.
pub trait ValueBuilder {
    type Node;

    fn null(&mut self) -> Self::Node;

    fn bool(&mut self, value: bool) -> Self::Node;

    fn integer(&mut self, value: i64) -> Self::Node;

    /// Called for `UINT64` payloads. The default reinterprets the bits as
    /// `i64`, so values above `i64::MAX` come out negative.
    fn uinteger(&mut self, value: u64) -> Self::Node {
        self.integer(value as i64)
    }

    fn real(&mut self, value: f64) -> Self::Node;

    fn string(&mut self, value: &str) -> Self::Node;

    fn bytes(&mut self, value: &[u8]) -> Self::Node;

    /// Creates an empty array. `capacity` is a hint already capped by the
    /// bytes left in the buffer.
    fn array(&mut self, capacity: usize) -> Self::Node;

    fn array_append(&mut self, array: &mut Self::Node, element: Self::Node);

    /// Creates an empty object. `capacity` is capped like [`Self::array`].
    fn object(&mut self, capacity: usize) -> Self::Node;

    /// Stores `value` under `key`. A repeated key replaces the earlier value.
    fn object_set(&mut self, object: &mut Self::Node, key: &str, value: Self::Node);
}

/// Builds [`BosValue`] trees.
#[derive(Debug, Default, Clone, Copy)]
pub struct BosValueBuilder;

impl ValueBuilder for BosValueBuilder {
    type Node = BosValue;

    fn null(&mut self) -> BosValue {
        BosValue::Null
    }

    fn bool(&mut self, value: bool) -> BosValue {
        BosValue::Bool(value)
    }

    fn integer(&mut self, value: i64) -> BosValue {
        BosValue::Integer(value)
    }

    fn uinteger(&mut self, value: u64) -> BosValue {
        BosValue::from(value)
    }

    fn real(&mut self, value: f64) -> BosValue {
        BosValue::Float(value)
    }

    fn string(&mut self, value: &str) -> BosValue {
        BosValue::Str(value.to_owned())
    }

    fn bytes(&mut self, value: &[u8]) -> BosValue {
        BosValue::Bytes(value.to_vec())
    }

    fn array(&mut self, capacity: usize) -> BosValue {
        BosValue::Array(Vec::with_capacity(capacity))
    }

    fn array_append(&mut self, array: &mut BosValue, element: BosValue) {
        if let BosValue::Array(items) = array {
            items.push(element);
        }
    }

    fn object(&mut self, capacity: usize) -> BosValue {
        BosValue::Object(IndexMap::with_capacity(capacity))
    }

    fn object_set(&mut self, object: &mut BosValue, key: &str, value: BosValue) {
        if let BosValue::Object(map) = object {
            map.insert(key.to_owned(), value);
        }
    }
}

/// Builds `serde_json::Value` trees.
///
/// Bytes become `data:application/octet-stream;base64,` strings and
/// non-finite reals become `null`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonBuilder;

impl ValueBuilder for JsonBuilder {
    type Node = serde_json::Value;

    fn null(&mut self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn bool(&mut self, value: bool) -> serde_json::Value {
        serde_json::Value::Bool(value)
    }

    fn integer(&mut self, value: i64) -> serde_json::Value {
        serde_json::Value::from(value)
    }

    fn uinteger(&mut self, value: u64) -> serde_json::Value {
        serde_json::Value::from(value)
    }

    fn real(&mut self, value: f64) -> serde_json::Value {
        serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }

    fn string(&mut self, value: &str) -> serde_json::Value {
        serde_json::Value::String(value.to_owned())
    }

    fn bytes(&mut self, value: &[u8]) -> serde_json::Value {
        serde_json::Value::String(to_data_uri(value))
    }

    fn array(&mut self, capacity: usize) -> serde_json::Value {
        serde_json::Value::Array(Vec::with_capacity(capacity))
    }

    fn array_append(&mut self, array: &mut serde_json::Value, element: serde_json::Value) {
        if let serde_json::Value::Array(items) = array {
            items.push(element);
        }
    }

    fn object(&mut self, capacity: usize) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::with_capacity(capacity))
    }

    fn object_set(&mut self, object: &mut serde_json::Value, key: &str, value: serde_json::Value) {
        if let serde_json::Value::Object(map) = object {
            map.insert(key.to_owned(), value);
        }
    }
}

/// Builds nothing. Drives the walker in validation mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipBuilder;

impl ValueBuilder for SkipBuilder {
    type Node = ();

    fn null(&mut self) {}

    fn bool(&mut self, _value: bool) {}

    fn integer(&mut self, _value: i64) {}

    fn uinteger(&mut self, _value: u64) {}

    fn real(&mut self, _value: f64) {}

    fn string(&mut self, _value: &str) {}

    fn bytes(&mut self, _value: &[u8]) {}

    fn array(&mut self, _capacity: usize) {}

    fn array_append(&mut self, _array: &mut (), _element: ()) {}

    fn object(&mut self, _capacity: usize) {}

    fn object_set(&mut self, _object: &mut (), _key: &str, _value: ()) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Only implements the signed constructor, like older value libraries.
    struct SignedOnly;

    impl ValueBuilder for SignedOnly {
        type Node = i64;
        fn null(&mut self) -> i64 {
            0
        }
        fn bool(&mut self, value: bool) -> i64 {
            value as i64
        }
        fn integer(&mut self, value: i64) -> i64 {
            value
        }
        fn real(&mut self, value: f64) -> i64 {
            value as i64
        }
        fn string(&mut self, value: &str) -> i64 {
            value.len() as i64
        }
        fn bytes(&mut self, value: &[u8]) -> i64 {
            value.len() as i64
        }
        fn array(&mut self, _capacity: usize) -> i64 {
            0
        }
        fn array_append(&mut self, array: &mut i64, _element: i64) {
            *array += 1;
        }
        fn object(&mut self, _capacity: usize) -> i64 {
            0
        }
        fn object_set(&mut self, object: &mut i64, _key: &str, _value: i64) {
            *object += 1;
        }
    }

    #[test]
    fn default_uinteger_reinterprets_bits() {
        assert_eq!(SignedOnly.uinteger(u64::MAX), -1);
        assert_eq!(SignedOnly.uinteger(7), 7);
    }

    #[test]
    fn bos_builder_keeps_large_unsigned() {
        let mut b = BosValueBuilder;
        assert_eq!(b.uinteger(5), BosValue::Integer(5));
        assert_eq!(b.uinteger(u64::MAX), BosValue::UInteger(u64::MAX));
    }

    #[test]
    fn object_set_is_last_wins() {
        let mut b = BosValueBuilder;
        let mut obj = b.object(2);
        let one = b.integer(1);
        let two = b.integer(2);
        b.object_set(&mut obj, "k", one);
        b.object_set(&mut obj, "k", two);
        assert_eq!(obj.as_object().map(|m| m.len()), Some(1));
        assert_eq!(obj.get("k"), Some(&BosValue::Integer(2)));
    }

    #[test]
    fn json_builder_assembles_nested_nodes() {
        let mut b = JsonBuilder;
        let mut arr = b.array(3);
        let t = b.bool(true);
        let n = b.null();
        let blob = b.bytes(&[1, 1]);
        b.array_append(&mut arr, t);
        b.array_append(&mut arr, n);
        b.array_append(&mut arr, blob);
        let mut obj = b.object(1);
        b.object_set(&mut obj, "b", arr);
        assert_eq!(
            obj,
            json!({"b": [true, null, "data:application/octet-stream;base64,AQE="]})
        );
    }

    #[test]
    fn json_builder_maps_non_finite_to_null() {
        assert_eq!(JsonBuilder.real(f64::INFINITY), serde_json::Value::Null);
        assert_eq!(JsonBuilder.real(1.5), json!(1.5));
    }
}
