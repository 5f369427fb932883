//! The clone filter pipeline
//!
//! Turns raw clone classes into ranked clone groups through a fixed stage
//! order: length, subclass, range resolution, sibling split, merge,
//! scoring. A batch pipeline: every stage consumes the complete output of
//! the previous one, the first failing stage aborts the whole run and no
//! partial result is surfaced. The progress callback is best-effort
//! reporting only and never affects the outcome.

pub mod filters;
pub mod scoring;

use crate::core::{CloneClass, CloneOccurrence, CloneRangeClass, ClonedGroup};
use crate::error::Result;
use crate::index::CloneIndex;
use crate::resolve::SourceResolver;
use std::hash::Hash;
use tracing::debug;

/// Run the full filter pipeline over raw clone classes
pub fn run<T, R>(
    index: &CloneIndex<T>,
    resolver: &R,
    classes: Vec<CloneClass>,
    progress: &impl Fn(&str),
) -> Result<Vec<ClonedGroup>>
where
    T: Eq + Hash + Clone + Send + Sync,
    R: SourceResolver + Sync,
{
    debug!(classes = classes.len(), "filter pipeline started");

    progress("Filtering short classes...");
    let classes = filters::filter_by_length(classes, index.config().min_clone_length);

    progress("Dropping subsumed classes...");
    let classes = filters::filter_subclasses(classes);

    progress("Resolving source ranges...");
    let classes = resolve_classes(classes, resolver)?;

    progress("Splitting diverging boundaries...");
    let classes = filters::split_sibling_classes(classes);

    progress("Merging identical ranges...");
    let classes = filters::merge_range_classes(classes);

    progress("Scoring clone groups...");
    let groups = scoring::score_groups(index, resolver, classes, index.config())?;

    debug!(groups = groups.len(), "filter pipeline finished");
    Ok(groups)
}

/// Resolve every occurrence of every class to source coordinates.
///
/// Runs between the tree-level filters and the range-level ones; a
/// resolver fault aborts the pipeline.
fn resolve_classes<R: SourceResolver>(
    classes: Vec<CloneClass>,
    resolver: &R,
) -> Result<Vec<CloneRangeClass>> {
    classes
        .into_iter()
        .map(|class| {
            let occurrences = class
                .occurrences
                .iter()
                .map(|&span| {
                    let range = resolver.resolve(span.sequence, span.start, span.end)?;
                    Ok(CloneOccurrence { span, range })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CloneRangeClass::new(occurrences))
        })
        .collect()
}
