//! Traversals deriving clone classes from the tree
//!
//! A clone class is one branching node: its token depth is the length of
//! the repeated subsequence, and the leaves below it are its occurrences.

use super::node::{NodeId, SequenceHandle, ROOT, SINK};
use super::tree::SuffixTree;
use bitvec::prelude::*;
use std::hash::Hash;

/// A clone class as seen by the tree: one branching node, its token depth
/// and every occurrence as `(sequence handle, start, end)` token offsets
#[derive(Debug, Clone)]
pub struct TreeCloneClass {
    pub node: NodeId,
    pub length: usize,
    pub suffix_link: Option<NodeId>,
    pub occurrences: Vec<(SequenceHandle, usize, usize)>,
}

impl<T: Eq + Hash + Clone> SuffixTree<T> {
    /// Depth-first iteration over every branching node whose token depth
    /// strictly exceeds `min_length`. Finite and single-pass; one pass
    /// drains it.
    pub fn clone_classes(&self, min_length: usize) -> CloneClassIter<'_, T> {
        CloneClassIter {
            stack: self.internal_children(ROOT, 0),
            tree: self,
            min_length,
        }
    }

    /// Clone classes touching one sequence: rise from each of the
    /// sequence's leaves toward the root, visiting every node at most once
    /// across all walks. A walk stops at the first node some earlier walk
    /// already produced. Result order is not meaningful.
    pub fn sequence_clone_classes(
        &self,
        handle: SequenceHandle,
        min_length: usize,
    ) -> Vec<TreeCloneClass> {
        let Some(entry) = self.sequences.get(&handle) else {
            return Vec::new();
        };
        let mut visited = bitvec![0; self.arena.slot_count()];
        let mut classes = Vec::new();
        for &leaf in &entry.leaves {
            let mut current = self
                .arena
                .get(leaf)
                .parent
                .expect("leaf without parent: tree invariant violated");
            while current != ROOT && !visited[current.index()] {
                visited.set(current.index(), true);
                let depth = self.depth(current);
                if depth as usize > min_length {
                    classes.push(self.clone_class_at(current, depth));
                }
                current = self
                    .arena
                    .get(current)
                    .parent
                    .expect("node above root without parent");
            }
        }
        classes
    }

    pub(crate) fn clone_class_at(&self, node: NodeId, depth: u32) -> TreeCloneClass {
        TreeCloneClass {
            node,
            length: depth as usize,
            suffix_link: self.branching_suffix_link(node),
            occurrences: self.occurrences(node, depth),
        }
    }

    /// Suffix link of a branching node, hidden when it points at the root
    /// or the bottom node: there is no shorter class there.
    fn branching_suffix_link(&self, node: NodeId) -> Option<NodeId> {
        match self.arena.get(node).suffix_link {
            Some(link) if link != ROOT && link != SINK => Some(link),
            _ => None,
        }
    }

    /// Every ending position of `node`'s represented substring: one per
    /// leaf below it, sorted for deterministic output.
    fn occurrences(&self, node: NodeId, depth: u32) -> Vec<(SequenceHandle, usize, usize)> {
        let mut result = Vec::new();
        let mut stack = vec![(node, depth)];
        while let Some((current, current_depth)) = stack.pop() {
            let data = self.arena.get(current);
            if data.is_leaf() {
                let start = data.label.end - current_depth;
                result.push((data.label.seq, start as usize, (start + depth) as usize));
            } else {
                for &child in data.edges.values() {
                    let child_len = self.arena.get(child).label.len();
                    stack.push((child, current_depth + child_len));
                }
            }
        }
        result.sort_unstable();
        result
    }

    /// Branching children of `node`, paired with their token depths
    fn internal_children(&self, node: NodeId, depth: u32) -> Vec<(NodeId, u32)> {
        self.arena
            .get(node)
            .edges
            .values()
            .filter(|&&child| !self.arena.get(child).is_leaf())
            .map(|&child| (child, depth + self.arena.get(child).label.len()))
            .collect()
    }
}

/// Finite single-pass iterator over the tree's clone classes
pub struct CloneClassIter<'a, T> {
    tree: &'a SuffixTree<T>,
    stack: Vec<(NodeId, u32)>,
    min_length: usize,
}

impl<T: Eq + Hash + Clone> Iterator for CloneClassIter<'_, T> {
    type Item = TreeCloneClass;

    fn next(&mut self) -> Option<TreeCloneClass> {
        while let Some((node, depth)) = self.stack.pop() {
            self.stack.extend(self.tree.internal_children(node, depth));
            if depth as usize > self.min_length {
                return Some(self.tree.clone_class_at(node, depth));
            }
        }
        None
    }
}
