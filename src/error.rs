//! Error types for huffzip compression and decompression.
//!
//! Every failure of a single compress/decompress call maps to one variant here. Nothing is retried:
//! the transforms are deterministic, so running them again on the same input gives the same result.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = core::result::Result<T, HuffError>;

#[derive(Debug, Error)]
pub enum HuffError {
    /// The byte source could not supply the input.
    #[error("cannot read input {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A symbol occurs more often than the header frequency field can record.
    #[error("symbol 0x{symbol:02x} occurs {count} times, the frequency field holds at most {max}")]
    FrequencyOverflow { symbol: u8, count: u64, max: u64 },

    /// The container is shorter than its header claims, or the header is inconsistent.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Bits were left over at the end of the body that never completed a code.
    #[error("{bits} trailing bit(s) do not complete any code")]
    UnknownCodeAtEndOfStream { bits: u8 },

    /// A run of bits grew longer than the longest code without matching one.
    #[error("no code matches the bits ending at bit offset {bit_offset}")]
    UnmatchedCode { bit_offset: usize },

    /// Refusing to replace an existing file.
    #[error("output file {} already exists (use -f to overwrite)", path.display())]
    OutputExists { path: PathBuf },

    /// I/O error on the output side.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffError {
    /// Create a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        HuffError::MalformedContainer(message.into())
    }

    /// Short, stable name for the error kind. Used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            HuffError::InputUnavailable { .. } => "input_unavailable",
            HuffError::FrequencyOverflow { .. } => "frequency_overflow",
            HuffError::MalformedContainer(_) => "malformed_container",
            HuffError::UnknownCodeAtEndOfStream { .. } => "unknown_code_at_end_of_stream",
            HuffError::UnmatchedCode { .. } => "unmatched_code",
            HuffError::OutputExists { .. } => "output_exists",
            HuffError::Io(_) => "io_error",
        }
    }
}
