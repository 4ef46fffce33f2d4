//! Fuzzy filtering for the interactive picker.
//!
//! Uses SkimMatcherV2 for high-performance fuzzy matching with scoring.

use std::sync::OnceLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Global matcher instance for performance.
/// Using OnceLock to initialize once and reuse across calls.
static GLOBAL_MATCHER: OnceLock<SkimMatcherV2> = OnceLock::new();

fn global_matcher() -> &'static SkimMatcherV2 {
    GLOBAL_MATCHER.get_or_init(SkimMatcherV2::default)
}

/// Filter candidate strings against a query.
///
/// Returns `(index, score)` pairs sorted by score descending, ties broken by
/// original index so equal-scoring candidates keep their relative order. An
/// empty query matches everything with score 0.
pub fn filter_candidates(query: &str, candidates: &[String]) -> Vec<(usize, i64)> {
    if query.is_empty() {
        return candidates.iter().enumerate().map(|(i, _)| (i, 0)).collect();
    }

    let matcher = global_matcher();
    let mut matches: Vec<(usize, i64)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| {
            matcher
                .fuzzy_match(candidate, query)
                .map(|score| (i, score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    matches
}
