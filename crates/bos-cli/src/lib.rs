//! Command-line tools for BOS buffers.
//!
//! Core logic behind the binary entry points:
//! - `bos-pack`: JSON (stdin) to BOS (stdout)
//! - `bos-unpack`: BOS (stdin) to pretty JSON (stdout)
//! - `bos-validate`: BOS (stdin or file) to an exit status

use bos::{
    declared_size, BosDecoder, BosEncoder, BosValidator, DecodeError, DecodeOptions, EncodeError,
    UnknownTagPolicy,
};
use clap::Args;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid BOS buffer: {0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Encode(#[from] EncodeError),
}

impl CliError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Json(_) => "INVALID_JSON",
            CliError::Io(_) => "IO",
            CliError::Decode(e) => e.error_code(),
            CliError::Encode(e) => e.error_code(),
        }
    }
}

/// Decoder knobs shared by `bos-unpack` and `bos-validate`.
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Maximum array/object nesting.
    #[arg(long, value_name = "DEPTH", default_value_t = bos::constants::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
    /// Reject bytes left between the root value and the declared size.
    #[arg(long)]
    pub exact_size: bool,
}

impl DecodeArgs {
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions::default()
            .with_max_depth(self.max_depth)
            .with_exact_size(self.exact_size)
    }
}

/// Installs a stderr fmt subscriber. `-v` repetitions pick the level;
/// without them `RUST_LOG` applies, falling back to `warn`.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// bos-pack

/// Encodes a JSON document as a BOS buffer.
pub fn pack(json: &str) -> Result<Vec<u8>, CliError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let bytes = BosEncoder::new().encode_json(&value)?;
    tracing::info!(size = bytes.len(), "packed");
    Ok(bytes)
}

// bos-unpack

/// Decodes a BOS buffer into pretty-printed JSON.
///
/// The buffer is validated first. With [`UnknownTagPolicy::Null`] validation
/// is skipped, since it would reject the very tags the policy tolerates.
pub fn unpack(bytes: &[u8], options: DecodeOptions) -> Result<String, CliError> {
    if options.unknown_tags == UnknownTagPolicy::Reject {
        BosValidator::with_options(options).check(bytes)?;
    }
    let value = BosDecoder::with_options(options).decode_json(bytes)?;
    tracing::info!(declared = declared_size(bytes), "unpacked");
    Ok(serde_json::to_string_pretty(&value)?)
}

// bos-validate

/// Outcome of checking one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    /// Header value; 0 when the input is shorter than the header.
    pub declared_size: u32,
    /// Bytes supplied.
    pub len: usize,
    pub result: Result<(), DecodeError>,
}

impl Inspection {
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }

    /// One-line report for `--explain`.
    pub fn explain(&self) -> String {
        match &self.result {
            Ok(()) => format!("valid: declared size {} ({} bytes supplied)", self.declared_size, self.len),
            Err(e) => format!("invalid [{}]: {e}", e.error_code()),
        }
    }
}

pub fn inspect(bytes: &[u8], options: DecodeOptions) -> Inspection {
    Inspection {
        declared_size: declared_size(bytes),
        len: bytes.len(),
        result: BosValidator::with_options(options).check(bytes),
    }
}
