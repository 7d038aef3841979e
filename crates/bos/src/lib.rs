//! BOS (binary object serialization) codec.
//!
//! A BOS buffer is a 4-byte little-endian total size followed by exactly one
//! tagged value. Lengths and counts use a self-describing varint.
//!
//! - [`BosValidator`] / [`validate`] check a buffer without building anything.
//! - [`BosDecoder`] / [`deserialize`] build a [`BosValue`], a
//!   `serde_json::Value`, or any tree a [`ValueBuilder`] assembles.
//! - [`BosEncoder`] / [`serialize`] produce buffers with minimal widths.
//! - [`declared_size`] reads the header only.

pub mod builder;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod parser;
pub mod size;
pub mod validator;
pub mod value;
pub mod varint;

pub use builder::{BosValueBuilder, JsonBuilder, SkipBuilder, ValueBuilder};
pub use constants::Tag;
pub use decoder::{deserialize, deserialize_json, BosDecoder};
pub use encoder::{serialize, BosEncoder};
pub use error::{DecodeError, EncodeError};
pub use options::{DecodeOptions, UnknownTagPolicy};
pub use size::{declared_size, encoded_size};
pub use validator::{check, validate, BosValidator};
pub use value::BosValue;
