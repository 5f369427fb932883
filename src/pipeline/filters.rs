//! Set-theoretic filters over clone classes
//!
//! Each filter is a pure function over its complete input; the driver in
//! the parent module chains them in a fixed order.

use crate::core::{CloneClass, CloneOccurrence, CloneRangeClass, RangeKey};
use crate::suffix_tree::NodeId;
use std::collections::HashMap;

/// Drop every class whose token length does not exceed the minimum
pub fn filter_by_length(classes: Vec<CloneClass>, min_length: usize) -> Vec<CloneClass> {
    classes
        .into_iter()
        .filter(|class| class.length > min_length)
        .collect()
}

/// Drop classes implied by a longer, equally frequent class.
///
/// A class whose node is the suffix-link target of another retained class
/// represents a one-token-shorter repeat; when both have the same
/// occurrence count, the shorter one always co-occurs with the longer and
/// carries no additional information.
pub fn filter_subclasses(classes: Vec<CloneClass>) -> Vec<CloneClass> {
    let mut sizes_linking_to: HashMap<NodeId, Vec<usize>> = HashMap::new();
    for class in &classes {
        if let Some(target) = class.suffix_link {
            sizes_linking_to.entry(target).or_default().push(class.size());
        }
    }
    classes
        .into_iter()
        .filter(|class| match sizes_linking_to.get(&class.node) {
            Some(sizes) => !sizes.contains(&class.size()),
            None => true,
        })
        .collect()
}

/// Split classes whose occurrences resolve to diverging concrete
/// boundaries.
///
/// Occurrences of one tree node all have the same token length, but the
/// resolver can report different line extents for them (an instantiation
/// boundary cut differently per site). Conflating those in one reported
/// group would be misleading, so the class is partitioned by extent.
/// Partitions reduced to a single occurrence are no longer duplicates and
/// are dropped.
pub fn split_sibling_classes(classes: Vec<CloneRangeClass>) -> Vec<CloneRangeClass> {
    let mut result = Vec::new();
    for class in classes {
        let mut partitions: Vec<(u32, Vec<CloneOccurrence>)> = Vec::new();
        for occurrence in class.occurrences {
            let extent = occurrence.range.end_line - occurrence.range.start_line;
            match partitions.iter_mut().find(|(e, _)| *e == extent) {
                Some((_, partition)) => partition.push(occurrence),
                None => partitions.push((extent, vec![occurrence])),
            }
        }
        for (_, partition) in partitions {
            if partition.len() >= 2 {
                result.push(CloneRangeClass::new(partition));
            }
        }
    }
    result
}

/// Merge classes that share a literal identical concrete range.
///
/// Two classes reaching the same `(file, start, end)` region through
/// different tree paths describe the same physical code. Union by first
/// seen: a class joins the group of the first of its ranges already seen,
/// otherwise opens a new group, and all its range keys are reassigned to
/// that group. The final groups are the key partition by group id. Which
/// occurrence survives as a group's representative depends on input
/// order and is deliberately unspecified.
pub fn merge_range_classes(classes: Vec<CloneRangeClass>) -> Vec<CloneRangeClass> {
    let mut group_of: HashMap<RangeKey, usize> = HashMap::new();
    let mut first_seen: Vec<(RangeKey, CloneOccurrence)> = Vec::new();
    let mut next_group = 0usize;

    for class in &classes {
        let existing = class
            .occurrences
            .iter()
            .find_map(|occurrence| group_of.get(&occurrence.range.key()).copied());
        let group = match existing {
            Some(group) => group,
            None => {
                next_group += 1;
                next_group - 1
            }
        };
        for occurrence in &class.occurrences {
            let key = occurrence.range.key();
            if !group_of.contains_key(&key) {
                first_seen.push((key, *occurrence));
            }
            group_of.insert(key, group);
        }
    }

    let mut grouped: Vec<Vec<CloneOccurrence>> = vec![Vec::new(); next_group];
    for (key, occurrence) in first_seen {
        grouped[group_of[&key]].push(occurrence);
    }
    grouped
        .into_iter()
        .filter(|occurrences| !occurrences.is_empty())
        .map(CloneRangeClass::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CloneRange, FileId, SequenceId, SequenceSpan, UnitId};

    fn span(seq: u64, start: usize, end: usize) -> SequenceSpan {
        SequenceSpan {
            sequence: SequenceId(seq),
            start,
            end,
        }
    }

    fn class(
        node: u32,
        suffix_link: Option<u32>,
        length: usize,
        occurrence_count: usize,
    ) -> CloneClass {
        CloneClass {
            length,
            occurrences: (0..occurrence_count)
                .map(|i| span(i as u64, 0, length))
                .collect(),
            node: NodeId(node),
            suffix_link: suffix_link.map(NodeId),
        }
    }

    fn occurrence(file: u64, owner: u64, start_line: u32, end_line: u32) -> CloneOccurrence {
        CloneOccurrence {
            span: span(file, 0, 4),
            range: CloneRange {
                file: FileId(file),
                owner: UnitId(owner),
                start_line,
                end_line,
            },
        }
    }

    #[test]
    fn test_length_filter_is_strict() {
        let classes = vec![class(1, None, 3, 2), class(2, None, 4, 2)];
        let kept = filter_by_length(classes, 3);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].length, 4);
    }

    #[test]
    fn test_subclass_filter_drops_equally_frequent_target() {
        // 10 --suffix-link--> 11, both with 3 occurrences: 11 is implied.
        let classes = vec![class(10, Some(11), 4, 3), class(11, None, 3, 3)];
        let kept = filter_subclasses(classes);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].node, NodeId(10));
    }

    #[test]
    fn test_subclass_filter_keeps_more_frequent_target() {
        // The shorter class occurs more often: it carries information.
        let classes = vec![class(10, Some(11), 4, 2), class(11, None, 3, 5)];
        let kept = filter_subclasses(classes);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_subclass_filter_chain_keeps_longest() {
        // 10 -> 11 -> 12, all with the same size: only 10 survives.
        let classes = vec![
            class(12, None, 2, 3),
            class(11, Some(12), 3, 3),
            class(10, Some(11), 4, 3),
        ];
        let kept = filter_subclasses(classes);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].node, NodeId(10));
    }

    #[test]
    fn test_subclass_filter_ignores_links_outside_input() {
        let classes = vec![class(10, Some(99), 4, 3)];
        assert_eq!(filter_subclasses(classes).len(), 1);
    }

    #[test]
    fn test_sibling_split_partitions_by_extent() {
        let class = CloneRangeClass::new(vec![
            occurrence(1, 1, 0, 4),
            occurrence(2, 2, 10, 14),
            occurrence(3, 3, 20, 26),
            occurrence(4, 4, 30, 36),
        ]);
        let split = split_sibling_classes(vec![class]);
        assert_eq!(split.len(), 2);
        assert!(split
            .iter()
            .any(|c| c.occurrences.iter().all(|o| o.range.line_count() == 5)));
        assert!(split
            .iter()
            .any(|c| c.occurrences.iter().all(|o| o.range.line_count() == 7)));
    }

    #[test]
    fn test_sibling_split_drops_singleton_partitions() {
        let class = CloneRangeClass::new(vec![
            occurrence(1, 1, 0, 4),
            occurrence(2, 2, 10, 14),
            occurrence(3, 3, 20, 29),
        ]);
        let split = split_sibling_classes(vec![class]);
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].occurrences.len(), 2);
    }

    #[test]
    fn test_sibling_split_keeps_uniform_class_whole() {
        let class = CloneRangeClass::new(vec![
            occurrence(1, 1, 0, 4),
            occurrence(2, 2, 10, 14),
        ]);
        let split = split_sibling_classes(vec![class]);
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].occurrences.len(), 2);
    }

    #[test]
    fn test_merge_unions_classes_sharing_a_range() {
        let a = occurrence(1, 1, 0, 4);
        let b = occurrence(2, 2, 10, 14);
        let c = occurrence(3, 3, 20, 24);
        let merged = merge_range_classes(vec![
            CloneRangeClass::new(vec![a, b]),
            CloneRangeClass::new(vec![b, c]),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].occurrences.len(), 3);
    }

    #[test]
    fn test_merge_is_order_independent_for_partitioning() {
        let a = occurrence(1, 1, 0, 4);
        let b = occurrence(2, 2, 10, 14);
        let c = occurrence(3, 3, 20, 24);
        let forward = merge_range_classes(vec![
            CloneRangeClass::new(vec![a, b]),
            CloneRangeClass::new(vec![b, c]),
        ]);
        let backward = merge_range_classes(vec![
            CloneRangeClass::new(vec![b, c]),
            CloneRangeClass::new(vec![a, b]),
        ]);
        assert_eq!(forward.len(), backward.len());
        let mut forward_keys: Vec<RangeKey> =
            forward[0].occurrences.iter().map(|o| o.range.key()).collect();
        let mut backward_keys: Vec<RangeKey> =
            backward[0].occurrences.iter().map(|o| o.range.key()).collect();
        forward_keys.sort_by_key(|k| (k.file, k.start_line));
        backward_keys.sort_by_key(|k| (k.file, k.start_line));
        assert_eq!(forward_keys, backward_keys);
    }

    #[test]
    fn test_merge_keeps_unrelated_classes_apart() {
        let merged = merge_range_classes(vec![
            CloneRangeClass::new(vec![occurrence(1, 1, 0, 4), occurrence(2, 2, 10, 14)]),
            CloneRangeClass::new(vec![occurrence(3, 3, 20, 24), occurrence(4, 4, 30, 34)]),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_deduplicates_identical_ranges() {
        let a = occurrence(1, 1, 0, 4);
        let merged = merge_range_classes(vec![CloneRangeClass::new(vec![a, a])]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].occurrences.len(), 1);
    }
}
