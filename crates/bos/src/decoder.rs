//! BOS decoder.

use crate::builder::{BosValueBuilder, JsonBuilder, ValueBuilder};
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::parser::{Header, Parser};
use crate::value::BosValue;

/// Decodes BOS buffers into value trees.
///
/// Every read is bounds checked, so a malformed buffer produces a
/// [`DecodeError`] and never a partial tree. Running
/// [`BosValidator`](crate::BosValidator) first is not required.
///
/// # Example
///
/// ```
/// use bos::{BosDecoder, BosValue};
///
/// let data = [6, 0, 0, 0, 0x06, 42];
/// let value = BosDecoder::new().decode(&data).unwrap();
/// assert_eq!(value, BosValue::Integer(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BosDecoder {
    options: DecodeOptions,
}

impl BosDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode(&self, data: &[u8]) -> Result<BosValue, DecodeError> {
        self.decode_with(data, &mut BosValueBuilder)
    }

    pub fn decode_json(&self, data: &[u8]) -> Result<serde_json::Value, DecodeError> {
        self.decode_with(data, &mut JsonBuilder)
    }

    /// Decodes `data` into whatever tree `builder` assembles.
    pub fn decode_with<B: ValueBuilder>(
        &self,
        data: &[u8],
        builder: &mut B,
    ) -> Result<B::Node, DecodeError> {
        let header = Header::parse(data).map_err(|err| {
            tracing::debug!(code = err.error_code(), len = data.len(), "bos header rejected: {err}");
            err
        })?;
        match Parser::new(data, header, builder, self.options).parse_root() {
            Ok(node) => {
                tracing::trace!(declared = header.declared, "bos buffer decoded");
                Ok(node)
            }
            Err(err) => {
                tracing::debug!(
                    code = err.error_code(),
                    offset = ?err.offset(),
                    "bos decode failed: {err}"
                );
                Err(err)
            }
        }
    }
}

/// Decodes `data` into a [`BosValue`] with default options.
pub fn deserialize(data: &[u8]) -> Result<BosValue, DecodeError> {
    BosDecoder::new().decode(data)
}

/// Decodes `data` into a `serde_json::Value` with default options.
pub fn deserialize_json(data: &[u8]) -> Result<serde_json::Value, DecodeError> {
    BosDecoder::new().decode_json(data)
}
