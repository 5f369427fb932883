//! Error types for clone-index

use thiserror::Error;

/// Result type alias for clone index operations
pub type Result<T> = std::result::Result<T, CloneError>;

/// Error types for clone index operations
#[derive(Error, Debug)]
pub enum CloneError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source-coordinate resolver failed for a token span
    #[error("Cannot resolve tokens {start}..{end} of sequence {sequence}: {reason}")]
    Resolve {
        sequence: u64,
        start: usize,
        end: usize,
        reason: String,
    },

    /// The tokenizer failed for a source unit
    #[error("Tokenizer error: {0}")]
    Tokenize(String),

    /// A pipeline stage referenced a sequence no longer present in the index
    #[error("Sequence {0} is not indexed")]
    UnknownSequence(u64),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}
