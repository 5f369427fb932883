//! Clone occurrences resolved to source coordinates

use crate::core::clone_class::SequenceSpan;
use crate::core::score::CloneScore;
use serde::{Deserialize, Serialize};

/// Opaque identity of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u64);

/// Opaque identity of the owning source unit (e.g. the enclosing method)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// One clone occurrence resolved to source coordinates.
///
/// Lines are 0-indexed and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneRange {
    pub file: FileId,
    pub owner: UnitId,
    pub start_line: u32,
    pub end_line: u32,
}

impl CloneRange {
    /// Number of source lines covered by this range
    pub fn line_count(&self) -> u32 {
        self.end_line - self.start_line + 1
    }

    /// Identity key used by the merge filter: two ranges are the same
    /// physical code region exactly when file, start and end line match.
    pub fn key(&self) -> RangeKey {
        RangeKey {
            file: self.file,
            start_line: self.start_line,
            end_line: self.end_line,
        }
    }
}

/// Deduplication key of a clone range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeKey {
    pub file: FileId,
    pub start_line: u32,
    pub end_line: u32,
}

/// A clone occurrence carrying both its token span and its resolved range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneOccurrence {
    pub span: SequenceSpan,
    pub range: CloneRange,
}

/// A group of clone ranges believed to represent the same duplicate-code
/// group, between the split/merge stages and scoring
#[derive(Debug, Clone)]
pub struct CloneRangeClass {
    pub occurrences: Vec<CloneOccurrence>,
}

impl CloneRangeClass {
    pub fn new(occurrences: Vec<CloneOccurrence>) -> Self {
        Self { occurrences }
    }

    /// The representative occurrence used for scoring
    pub fn representative(&self) -> Option<&CloneOccurrence> {
        self.occurrences.first()
    }
}

/// Final pipeline output: a scored, ranked duplicate-code group
#[derive(Debug, Clone, Serialize)]
pub struct ClonedGroup {
    pub occurrences: Vec<CloneOccurrence>,
    pub score: CloneScore,
}

impl ClonedGroup {
    /// Composite score; higher means a more interesting duplicate
    pub fn score_value(&self) -> f64 {
        self.score.value()
    }
}
