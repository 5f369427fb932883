//! Generalized suffix tree with incremental sequence removal
//!
//! A reusable data structure: it knows nothing about clones, scoring or
//! source coordinates, only about repeated symbol subsequences across many
//! stored sequences.

pub mod node;
pub mod traversal;
pub mod tree;

pub use node::{NodeId, SequenceHandle};
pub use traversal::{CloneClassIter, TreeCloneClass};
pub use tree::SuffixTree;
