//! Collaborator interfaces consumed by the index and the pipeline

use crate::core::{CloneRange, SequenceId};
use crate::error::Result;

/// Splits a source unit into the token alphabet the index consumes.
///
/// Must be stable and deterministic: tokenizing unchanged source twice
/// yields equal tokens.
pub trait Tokenizer {
    type Unit;
    type Token;

    fn tokenize(&self, unit: &Self::Unit) -> Result<Vec<Self::Token>>;
}

/// Maps a half-open token span of an indexed sequence back to source
/// coordinates: owning unit, file and inclusive line range.
///
/// Faults abort the running pipeline; the core never retries.
pub trait SourceResolver {
    fn resolve(&self, sequence: SequenceId, start: usize, end: usize) -> Result<CloneRange>;
}
