//! Decoder and validator configuration.

use crate::constants::DEFAULT_MAX_DEPTH;

/// What the decoder does with a tag byte above `0x0f`.
///
/// Validation always rejects such bytes; this policy only affects
/// [`BosDecoder`](crate::BosDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTagPolicy {
    /// Fail with [`DecodeError::UnknownTag`](crate::DecodeError::UnknownTag).
    #[default]
    Reject,
    /// Consume the tag byte and produce a null node with no payload.
    ///
    /// Reproduces older decoders that read unknown kinds as null. Buffers
    /// decoded this way would not pass validation.
    Null,
}

/// Options shared by [`BosValidator`](crate::BosValidator) and
/// [`BosDecoder`](crate::BosDecoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum array/object nesting. The root container is depth 1.
    pub max_depth: usize,
    /// Decoder handling of unknown tag bytes.
    pub unknown_tags: UnknownTagPolicy,
    /// Reject buffers whose root value ends before the declared size.
    pub exact_size: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_tags: UnknownTagPolicy::Reject,
            exact_size: false,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    pub fn with_exact_size(mut self, exact_size: bool) -> Self {
        self.exact_size = exact_size;
        self
    }
}
