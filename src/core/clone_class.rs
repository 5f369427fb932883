//! Raw clone classes as extracted from the suffix tree

use crate::suffix_tree::NodeId;
use serde::{Deserialize, Serialize};

/// External identity of an indexed token sequence (e.g. one method)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SequenceId(pub u64);

/// A tokenized source unit handed to the index by the caller.
///
/// The revision marker lets callers detect stale indexing; the index itself
/// never updates in place. Re-indexing a changed unit is remove-then-add.
#[derive(Debug, Clone)]
pub struct IndexedSequence<T> {
    pub id: SequenceId,
    pub revision: u64,
    pub tokens: Vec<T>,
}

impl<T> IndexedSequence<T> {
    pub fn new(id: SequenceId, revision: u64, tokens: Vec<T>) -> Self {
        Self {
            id,
            revision,
            tokens,
        }
    }
}

/// One occurrence of a repeated token subsequence, as half-open token offsets
/// into the owning sequence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SequenceSpan {
    pub sequence: SequenceId,
    pub start: usize,
    pub end: usize,
}

impl SequenceSpan {
    /// Number of tokens covered by this span
    pub fn token_count(&self) -> usize {
        self.end - self.start
    }
}

/// A maximal repeated token subsequence with at least two occurrences,
/// backed by one branching node of the suffix tree.
///
/// Derived fresh from the current tree state on every query; never cached
/// across index mutations.
#[derive(Debug, Clone)]
pub struct CloneClass {
    /// Token length of the repeated subsequence
    pub length: usize,
    /// All occurrences of the subsequence across indexed sequences
    pub occurrences: Vec<SequenceSpan>,
    /// Backing tree node, used by the subclass filter
    pub(crate) node: NodeId,
    /// Suffix-link target of the backing node, when it is a branching node
    pub(crate) suffix_link: Option<NodeId>,
}

impl CloneClass {
    /// Number of occurrences of this clone class
    pub fn size(&self) -> usize {
        self.occurrences.len()
    }
}
