//! Incremental token-level duplicate code detection.
//!
//! A generalized suffix tree indexes tokenized source units (methods,
//! functions) as the caller adds and removes them. Branching tree nodes
//! are repeated token subsequences ("clone classes"); a deterministic
//! filter pipeline reduces the raw classes to a small ranked set of
//! meaningful duplicate-code groups.
//!
//! Tokenization and source-coordinate resolution stay with the caller:
//! implement [`Tokenizer`] and [`SourceResolver`], then feed
//! [`IndexedSequence`]s into a [`CloneIndex`].
//!
//! # Example
//!
//! ```
//! use clone_index::{CloneConfig, CloneIndex, IndexedSequence, SequenceId};
//!
//! let config = CloneConfig {
//!     min_clone_length: 2,
//!     ..CloneConfig::default()
//! };
//! let index = CloneIndex::new(config)?;
//! index.add(IndexedSequence::new(SequenceId(1), 0, "abcdabcd".chars().collect()));
//! index.add(IndexedSequence::new(SequenceId(2), 0, "abcd".chars().collect()));
//!
//! let classes = index.all_clone_classes();
//! assert_eq!(classes[0].length, 4);
//! assert_eq!(classes[0].occurrences.len(), 3);
//! # Ok::<(), clone_index::CloneError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod index;
pub mod pipeline;
pub mod resolve;
pub mod suffix_tree;

pub use crate::config::CloneConfig;
pub use crate::core::{
    covered_line_count, unite_ranges, CloneClass, CloneOccurrence, CloneRange, CloneRangeClass,
    CloneScore, ClonedGroup, FileId, IndexedSequence, LineInterval, RangeKey, SequenceId,
    SequenceSpan, UnitId,
};
pub use crate::error::{CloneError, Result};
pub use crate::index::CloneIndex;
pub use crate::resolve::{SourceResolver, Tokenizer};
pub use crate::suffix_tree::SuffixTree;
