//! Core data types of the clone detection pipeline

pub mod clone_class;
pub mod intervals;
pub mod range;
pub mod score;

pub use clone_class::{CloneClass, IndexedSequence, SequenceId, SequenceSpan};
pub use intervals::{covered_line_count, unite_ranges, LineInterval};
pub use range::{
    CloneOccurrence, CloneRange, CloneRangeClass, ClonedGroup, FileId, RangeKey, UnitId,
};
pub use score::CloneScore;
