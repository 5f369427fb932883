//! The shared clone index
//!
//! One suffix tree plus the mapping between caller-assigned sequence ids
//! and internal tree handles, guarded by a single read/write lock.
//! Mutation is serialized; queries run concurrently with each other.
//! The index is an explicit service object: construct it once, pass it by
//! reference.

use crate::config::CloneConfig;
use crate::core::{CloneClass, ClonedGroup, IndexedSequence, SequenceId, SequenceSpan};
use crate::error::Result;
use crate::pipeline;
use crate::resolve::SourceResolver;
use crate::suffix_tree::{SequenceHandle, SuffixTree, TreeCloneClass};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct SequenceRecord {
    handle: SequenceHandle,
    revision: u64,
}

struct IndexState<T> {
    tree: SuffixTree<T>,
    records: HashMap<SequenceId, SequenceRecord>,
    external: HashMap<SequenceHandle, SequenceId>,
}

impl<T: Eq + Hash + Clone> IndexState<T> {
    fn new() -> Self {
        Self {
            tree: SuffixTree::new(),
            records: HashMap::new(),
            external: HashMap::new(),
        }
    }
}

/// Incremental index of tokenized source units
pub struct CloneIndex<T> {
    state: RwLock<IndexState<T>>,
    config: CloneConfig,
}

impl<T: Eq + Hash + Clone> CloneIndex<T> {
    /// Create an index with a validated configuration
    pub fn new(config: CloneConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: RwLock::new(IndexState::new()),
            config,
        })
    }

    /// Create an index with the default configuration
    pub fn with_defaults() -> Self {
        Self {
            state: RwLock::new(IndexState::new()),
            config: CloneConfig::default(),
        }
    }

    pub fn config(&self) -> &CloneConfig {
        &self.config
    }

    /// Index a tokenized unit.
    ///
    /// Silent no-op when the id is already indexed (re-indexing a changed
    /// unit is remove-then-add) or when the sequence is shorter than the
    /// minimum clone length.
    pub fn add(&self, sequence: IndexedSequence<T>) {
        let mut state = self.state.write();
        if state.records.contains_key(&sequence.id) {
            debug!(id = sequence.id.0, "sequence already indexed, ignoring");
            return;
        }
        if sequence.tokens.len() < self.config.min_clone_length {
            debug!(
                id = sequence.id.0,
                tokens = sequence.tokens.len(),
                "sequence below minimum clone length, ignoring"
            );
            return;
        }
        let handle = state.tree.add_sequence(sequence.tokens);
        state.records.insert(
            sequence.id,
            SequenceRecord {
                handle,
                revision: sequence.revision,
            },
        );
        state.external.insert(handle, sequence.id);
        debug!(id = sequence.id.0, handle, "sequence indexed");
    }

    /// Remove an indexed unit; unknown ids are ignored
    pub fn remove(&self, id: SequenceId) {
        let mut state = self.state.write();
        let Some(record) = state.records.remove(&id) else {
            return;
        };
        state.external.remove(&record.handle);
        state.tree.remove_sequence(record.handle);
        debug!(id = id.0, "sequence removed");
    }

    /// Drop all state; equivalent to a fresh index
    pub fn clear(&self) {
        let mut state = self.state.write();
        *state = IndexState::new();
        debug!("index cleared");
    }

    pub fn contains(&self, id: SequenceId) -> bool {
        self.state.read().records.contains_key(&id)
    }

    /// Revision marker the unit was indexed with
    pub fn revision(&self, id: SequenceId) -> Option<u64> {
        self.state.read().records.get(&id).map(|record| record.revision)
    }

    pub fn sequence_count(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// All raw clone classes of the current tree state, longest-first
    /// within a deterministic order
    pub fn all_clone_classes(&self) -> Vec<CloneClass> {
        let state = self.state.read();
        let mut classes: Vec<CloneClass> = state
            .tree
            .clone_classes(self.config.min_clone_length)
            .map(|class| Self::to_external(&state, class))
            .collect();
        Self::sort_classes(&mut classes);
        classes
    }

    /// Raw clone classes that include occurrences of one sequence
    pub fn sequence_clone_classes(&self, id: SequenceId) -> Vec<CloneClass> {
        let state = self.state.read();
        let Some(record) = state.records.get(&id) else {
            return Vec::new();
        };
        let mut classes: Vec<CloneClass> = state
            .tree
            .sequence_clone_classes(record.handle, self.config.min_clone_length)
            .into_iter()
            .map(|class| Self::to_external(&state, class))
            .collect();
        Self::sort_classes(&mut classes);
        classes
    }

    /// Token slice snapshot of one indexed span, used by the scoring stage
    pub fn tokens_for(&self, id: SequenceId, start: usize, end: usize) -> Option<Vec<T>> {
        let state = self.state.read();
        let record = state.records.get(&id)?;
        let tokens = state.tree.tokens(record.handle)?;
        tokens.get(start..end).map(<[T]>::to_vec)
    }

    /// Ranked clone groups over the whole index: extraction plus the full
    /// filter pipeline
    pub fn all_clones<R>(&self, resolver: &R, progress: impl Fn(&str)) -> Result<Vec<ClonedGroup>>
    where
        R: SourceResolver + Sync,
        T: Send + Sync,
    {
        let classes = self.all_clone_classes();
        pipeline::run(self, resolver, classes, &progress)
    }

    /// Ranked clone groups touching one sequence
    pub fn sequence_clones<R>(
        &self,
        id: SequenceId,
        resolver: &R,
        progress: impl Fn(&str),
    ) -> Result<Vec<ClonedGroup>>
    where
        R: SourceResolver + Sync,
        T: Send + Sync,
    {
        let classes = self.sequence_clone_classes(id);
        pipeline::run(self, resolver, classes, &progress)
    }

    fn to_external(state: &IndexState<T>, class: TreeCloneClass) -> CloneClass {
        let occurrences = class
            .occurrences
            .into_iter()
            .map(|(handle, start, end)| SequenceSpan {
                sequence: *state
                    .external
                    .get(&handle)
                    .expect("tree sequence without external id: index invariant violated"),
                start,
                end,
            })
            .collect();
        CloneClass {
            length: class.length,
            occurrences,
            node: class.node,
            suffix_link: class.suffix_link,
        }
    }

    fn sort_classes(classes: &mut [CloneClass]) {
        classes.sort_by(|a, b| {
            b.length
                .cmp(&a.length)
                .then_with(|| a.occurrences.cmp(&b.occurrences))
        });
    }
}
