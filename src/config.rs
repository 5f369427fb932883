//! Configuration types for clone-index

use crate::error::{CloneError, Result};

/// Configuration options for the clone index and filter pipeline
#[derive(Debug, Clone)]
pub struct CloneConfig {
    /// Minimum clone length in tokens (default: 100)
    /// Sequences shorter than this are never indexed, and clone classes
    /// whose token length does not exceed it are never reported.
    pub min_clone_length: usize,

    /// Self-coverage percentage at which a clone group is dropped (default: 70)
    /// A group whose representative occurrence is mostly made of smaller
    /// internal repeats is boilerplate rather than an interesting duplicate.
    pub self_coverage_limit: u8,

    /// Number of threads for parallel scoring (default: num_cpus)
    pub num_threads: usize,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            min_clone_length: 100,
            self_coverage_limit: 70,
            num_threads: num_cpus::get(),
        }
    }
}

impl CloneConfig {
    /// Validate the configuration eagerly, before any indexing happens.
    ///
    /// A zero minimum length would make every single token a clone class,
    /// so it is rejected here rather than deep inside traversal.
    pub fn validate(&self) -> Result<()> {
        if self.min_clone_length == 0 {
            return Err(CloneError::InvalidConfig(
                "min_clone_length must be positive".to_string(),
            ));
        }
        if self.self_coverage_limit > 100 {
            return Err(CloneError::InvalidConfig(format!(
                "self_coverage_limit must be a percentage (0-100), got {}",
                self.self_coverage_limit
            )));
        }
        if self.num_threads == 0 {
            return Err(CloneError::InvalidConfig(
                "num_threads must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
