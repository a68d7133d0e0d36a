//! Candidate matching: exact symbol lookup first, fuzzy search fallback.

use std::collections::BTreeMap;

use crate::index::CatalogIndex;
use crate::models::{Candidate, CandidateKind, MarketScope, MatchKind, ScoredMatch};

/// Whole-query-text hits are lower precision than token-level hits.
const WHOLE_TEXT_DISCOUNT: f64 = 0.9;

/// Cap on fuzzy hits taken per candidate.
const MAX_FUZZY_HITS: usize = 8;

/// Jaro-Winkler similarity of unrelated short strings. Raw similarity is
/// rescaled so this level maps to confidence 0.0 and identical strings map
/// to 1.0; noise then never clears a positive confidence threshold.
const NOISE_SIMILARITY: f64 = 0.5;

fn similarity_to_confidence(score: f64) -> f64 {
    ((score - NOISE_SIMILARITY) / (1.0 - NOISE_SIMILARITY)).max(0.0)
}

fn confidence_to_similarity(confidence: f64) -> f64 {
    NOISE_SIMILARITY + confidence.clamp(0.0, 1.0) * (1.0 - NOISE_SIMILARITY)
}

/// Match every candidate against the scope partition.
///
/// Ticker-shaped candidates are tried against the exact table first; a hit
/// yields an exact match and that candidate skips fuzzy search entirely.
/// Remaining candidates are fuzzy-searched, and the entire original query
/// text is fuzzy-searched once more (discounted) to catch multi-word
/// company names that were not cleanly split into a single candidate.
///
/// Fuzzy similarity is converted to confidence before the caller's
/// threshold applies, so a hit whose confidence exactly equals
/// `confidence_threshold` survives.
///
/// The result carries at most one match per symbol, keeping the strongest
/// (exact beats fuzzy, then higher confidence), ordered by symbol for
/// deterministic downstream grouping.
pub fn match_candidates(
    index: &CatalogIndex,
    candidates: &[Candidate],
    original_text: &str,
    scope: MarketScope,
    confidence_threshold: f64,
) -> Vec<ScoredMatch> {
    let mut best: BTreeMap<String, ScoredMatch> = BTreeMap::new();
    let min_score = confidence_to_similarity(confidence_threshold);

    for candidate in candidates {
        if candidate.kind == CandidateKind::Ticker {
            if let Some(record) = index.exact_lookup(scope, &candidate.text) {
                merge(&mut best, ScoredMatch::exact(record.clone()));
                continue;
            }
        }

        for (record, score) in index.fuzzy_search(scope, &candidate.text, min_score, MAX_FUZZY_HITS)
        {
            merge(
                &mut best,
                ScoredMatch::fuzzy(record.clone(), similarity_to_confidence(score)),
            );
        }
    }

    let text = original_text.trim();
    let already_searched = candidates
        .iter()
        .any(|c| c.text.eq_ignore_ascii_case(text));
    if !text.is_empty() && !already_searched {
        for (record, score) in index.fuzzy_search(scope, text, min_score, MAX_FUZZY_HITS) {
            merge(
                &mut best,
                ScoredMatch::fuzzy(
                    record.clone(),
                    similarity_to_confidence(score) * WHOLE_TEXT_DISCOUNT,
                ),
            );
        }
    }

    log::debug!(
        "Matched {} symbols from {} candidates (scope {scope})",
        best.len(),
        candidates.len()
    );
    best.into_values().collect()
}

fn merge(best: &mut BTreeMap<String, ScoredMatch>, candidate: ScoredMatch) {
    let key = candidate.stock.symbol.to_uppercase();
    match best.get(&key) {
        Some(existing) if !beats(&candidate, existing) => {}
        _ => {
            best.insert(key, candidate);
        }
    }
}

fn beats(a: &ScoredMatch, b: &ScoredMatch) -> bool {
    match (a.kind, b.kind) {
        (MatchKind::Exact, MatchKind::Fuzzy) => true,
        (MatchKind::Fuzzy, MatchKind::Exact) => false,
        _ => a.confidence > b.confidence,
    }
}
