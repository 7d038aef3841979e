//! Native value tree produced by the decoder.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use indexmap::IndexMap;

/// Prefix used when byte blobs travel through JSON.
pub const BIN_DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// A decoded BOS value.
///
/// Integers are widened to 64 bits regardless of the wire width they were
/// stored with. The decoder only produces `UInteger` for values above
/// `i64::MAX`, and `Integer(n) == UInteger(n)` for any `n` both can hold.
/// Objects keep insertion order and setting an existing key replaces its
/// value in place.
#[derive(Debug, Clone, Default)]
pub enum BosValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    UInteger(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<BosValue>),
    Object(IndexMap<String, BosValue>),
}

impl BosValue {
    pub fn is_null(&self) -> bool {
        matches!(self, BosValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BosValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            BosValue::Integer(i) => Some(*i),
            BosValue::UInteger(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            BosValue::Integer(i) => u64::try_from(*i).ok(),
            BosValue::UInteger(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BosValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            BosValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BosValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[BosValue]> {
        match self {
            BosValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, BosValue>> {
        match self {
            BosValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when `self` is an object.
    pub fn get(&self, key: &str) -> Option<&BosValue> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl PartialEq for BosValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BosValue::Null, BosValue::Null) => true,
            (BosValue::Bool(a), BosValue::Bool(b)) => a == b,
            (BosValue::Integer(a), BosValue::Integer(b)) => a == b,
            (BosValue::UInteger(a), BosValue::UInteger(b)) => a == b,
            (BosValue::Integer(i), BosValue::UInteger(u))
            | (BosValue::UInteger(u), BosValue::Integer(i)) => u64::try_from(*i).ok() == Some(*u),
            (BosValue::Float(a), BosValue::Float(b)) => a == b,
            (BosValue::Str(a), BosValue::Str(b)) => a == b,
            (BosValue::Bytes(a), BosValue::Bytes(b)) => a == b,
            (BosValue::Array(a), BosValue::Array(b)) => a == b,
            (BosValue::Object(a), BosValue::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for BosValue {
    fn from(b: bool) -> Self {
        BosValue::Bool(b)
    }
}

impl From<i64> for BosValue {
    fn from(i: i64) -> Self {
        BosValue::Integer(i)
    }
}

impl From<u64> for BosValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => BosValue::Integer(i),
            Err(_) => BosValue::UInteger(u),
        }
    }
}

impl From<f64> for BosValue {
    fn from(f: f64) -> Self {
        BosValue::Float(f)
    }
}

impl From<&str> for BosValue {
    fn from(s: &str) -> Self {
        BosValue::Str(s.to_owned())
    }
}

impl From<String> for BosValue {
    fn from(s: String) -> Self {
        BosValue::Str(s)
    }
}

impl From<Vec<u8>> for BosValue {
    fn from(b: Vec<u8>) -> Self {
        BosValue::Bytes(b)
    }
}

impl From<Vec<BosValue>> for BosValue {
    fn from(items: Vec<BosValue>) -> Self {
        BosValue::Array(items)
    }
}

impl FromIterator<(String, BosValue)> for BosValue {
    fn from_iter<I: IntoIterator<Item = (String, BosValue)>>(iter: I) -> Self {
        BosValue::Object(iter.into_iter().collect())
    }
}

/// Decodes a `data:application/octet-stream;base64,` string back into bytes.
pub fn parse_data_uri(s: &str) -> Option<Vec<u8>> {
    let payload = s.strip_prefix(BIN_DATA_URI_PREFIX)?;
    STANDARD.decode(payload).ok()
}

/// Renders bytes as a `data:application/octet-stream;base64,` string.
pub fn to_data_uri(bytes: &[u8]) -> String {
    format!("{BIN_DATA_URI_PREFIX}{}", STANDARD.encode(bytes))
}

impl From<serde_json::Value> for BosValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => BosValue::Null,
            serde_json::Value::Bool(b) => BosValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    BosValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    BosValue::UInteger(u)
                } else {
                    BosValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => match parse_data_uri(&s) {
                Some(bytes) => BosValue::Bytes(bytes),
                None => BosValue::Str(s),
            },
            serde_json::Value::Array(arr) => {
                BosValue::Array(arr.into_iter().map(BosValue::from).collect())
            }
            serde_json::Value::Object(obj) => BosValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, BosValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<BosValue> for serde_json::Value {
    fn from(v: BosValue) -> Self {
        match v {
            BosValue::Null => serde_json::Value::Null,
            BosValue::Bool(b) => serde_json::Value::Bool(b),
            BosValue::Integer(i) => serde_json::Value::from(i),
            BosValue::UInteger(u) => serde_json::Value::from(u),
            // Non-finite reals have no JSON spelling.
            BosValue::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            BosValue::Str(s) => serde_json::Value::String(s),
            BosValue::Bytes(b) => serde_json::Value::String(to_data_uri(&b)),
            BosValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            BosValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
