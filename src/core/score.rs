//! Clone group scoring

use serde::Serialize;

/// Score components of a clone group, recomputed on demand.
///
/// `self_coverage` and `same_owner_ratio` are integer percentages in
/// `0..=100`; `length` is the line count of the representative occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CloneScore {
    /// How much of the representative occurrence is itself covered by
    /// smaller internal repeats
    pub self_coverage: u32,
    /// Largest fraction of occurrences sharing one owning unit
    pub same_owner_ratio: u32,
    /// Line length of the representative occurrence
    pub length: u32,
}

impl CloneScore {
    /// Composite score: `(1 − selfCoverage × sameOwnerRatio) × length`.
    ///
    /// A long clone shared across many owners with little internal
    /// repetition scores highest.
    pub fn value(&self) -> f64 {
        let coverage = f64::from(self.self_coverage) / 100.0;
        let same_owner = f64::from(self.same_owner_ratio) / 100.0;
        (1.0 - coverage * same_owner) * f64::from(self.length)
    }
}
