//! Clone group scoring and ranking
//!
//! Scores are derived fresh from the current index state on every run;
//! nothing here is cached across index mutations.

use crate::config::CloneConfig;
use crate::core::{
    covered_line_count, CloneOccurrence, CloneRangeClass, CloneScore, ClonedGroup, LineInterval,
    UnitId,
};
use crate::error::{CloneError, Result};
use crate::index::CloneIndex;
use crate::resolve::SourceResolver;
use crate::suffix_tree::SuffixTree;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

/// Score every group in parallel, drop the mostly-self-covered ones and
/// rank the rest by descending composite score
pub fn score_groups<T, R>(
    index: &CloneIndex<T>,
    resolver: &R,
    classes: Vec<CloneRangeClass>,
    config: &CloneConfig,
) -> Result<Vec<ClonedGroup>>
where
    T: Eq + Hash + Clone + Send + Sync,
    R: SourceResolver + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build()
        .map_err(|e| CloneError::Other(format!("Failed to create thread pool: {}", e)))?;

    let scored: Result<Vec<ClonedGroup>> = pool.install(|| {
        classes
            .into_par_iter()
            .map(|class| {
                let score = compute_score(index, resolver, &class)?;
                Ok(ClonedGroup {
                    occurrences: class.occurrences,
                    score,
                })
            })
            .collect()
    });

    let mut groups = scored?;
    groups.retain(|group| group.score.self_coverage < u32::from(config.self_coverage_limit));
    groups.sort_by(|a, b| b.score_value().total_cmp(&a.score_value()));
    Ok(groups)
}

/// Score one clone range class from its representative occurrence
pub fn compute_score<T, R>(
    index: &CloneIndex<T>,
    resolver: &R,
    class: &CloneRangeClass,
) -> Result<CloneScore>
where
    T: Eq + Hash + Clone,
    R: SourceResolver,
{
    let Some(representative) = class.representative() else {
        return Ok(CloneScore {
            self_coverage: 0,
            same_owner_ratio: 100,
            length: 0,
        });
    };
    Ok(CloneScore {
        self_coverage: self_coverage(index, resolver, representative)?,
        same_owner_ratio: same_owner_ratio(&class.occurrences),
        length: representative.range.line_count(),
    })
}

/// How much of one occurrence's own span is covered by smaller repeats.
///
/// The occurrence's token slice is indexed alone into a fresh tree; its
/// internal clone classes (held to the same minimum length) are resolved
/// back to line intervals and united. A high percentage means the clone is
/// itself mostly boilerplate repetition.
fn self_coverage<T, R>(index: &CloneIndex<T>, resolver: &R, occurrence: &CloneOccurrence) -> Result<u32>
where
    T: Eq + Hash + Clone,
    R: SourceResolver,
{
    let span = occurrence.span;
    let Some(tokens) = index.tokens_for(span.sequence, span.start, span.end) else {
        return Err(CloneError::UnknownSequence(span.sequence.0));
    };

    let mut tree = SuffixTree::new();
    tree.add_sequence(tokens);

    let mut intervals = Vec::new();
    for class in tree.clone_classes(index.config().min_clone_length) {
        for (_, start, end) in class.occurrences {
            let range = resolver.resolve(span.sequence, span.start + start, span.start + end)?;
            intervals.push(LineInterval::new(range.start_line, range.end_line + 1));
        }
    }

    let covered = covered_line_count(intervals);
    let total = occurrence.range.line_count();
    Ok((covered * 100 / total).min(100))
}

/// Largest fraction of occurrences sharing one owning unit, as a percent.
///
/// Groups with fewer than two occurrences score 100 by definition.
fn same_owner_ratio(occurrences: &[CloneOccurrence]) -> u32 {
    if occurrences.len() < 2 {
        return 100;
    }
    let mut counts: HashMap<UnitId, u32> = HashMap::new();
    for occurrence in occurrences {
        *counts.entry(occurrence.range.owner).or_default() += 1;
    }
    let largest = counts.values().copied().max().unwrap_or(1);
    (largest - 1) * 100 / (occurrences.len() as u32 - 1)
}
