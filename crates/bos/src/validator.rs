//! Structural validation without building anything.

use crate::builder::SkipBuilder;
use crate::error::DecodeError;
use crate::options::{DecodeOptions, UnknownTagPolicy};
use crate::parser::{Header, Parser};

/// Checks that a buffer is a well-formed BOS encoding.
///
/// A buffer accepted here always decodes with [`BosDecoder`](crate::BosDecoder)
/// under the same options. Unknown tags are rejected regardless of
/// [`DecodeOptions::unknown_tags`].
#[derive(Debug, Clone, Default)]
pub struct BosValidator {
    options: DecodeOptions,
}

impl BosValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self {
            options: options.with_unknown_tags(UnknownTagPolicy::Reject),
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn validate(&self, data: &[u8]) -> bool {
        self.check(data).is_ok()
    }

    /// Like [`validate`](Self::validate) but reports why the buffer was
    /// rejected.
    pub fn check(&self, data: &[u8]) -> Result<(), DecodeError> {
        let result = Header::parse(data)
            .and_then(|header| Parser::new(data, header, &mut SkipBuilder, self.options).parse_root());
        match &result {
            Ok(()) => tracing::trace!(len = data.len(), "bos buffer valid"),
            Err(err) => tracing::debug!(
                code = err.error_code(),
                offset = ?err.offset(),
                "bos validation failed: {err}"
            ),
        }
        result
    }
}

/// Validates `data` with default options.
pub fn validate(data: &[u8]) -> bool {
    BosValidator::new().validate(data)
}

/// Validates `data` with default options, returning the rejection reason.
pub fn check(data: &[u8]) -> Result<(), DecodeError> {
    BosValidator::new().check(data)
}
