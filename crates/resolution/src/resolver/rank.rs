//! Final ranking and deduplication.
//!
//! Merges the disambiguated matches into the caller-visible result list:
//! threshold filter, scope filter (with the explicit-mention override),
//! exchange-priority + confidence sort, one survivor per company, and
//! truncation to the requested result count.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{detect_market_hint, MarketScope, ScoredMatch, StockRecord};

use super::candidates::{is_mentioned, query_tokens};
use super::disambiguate::normalize_company_name;

/// Rank, deduplicate, and truncate the surviving matches.
///
/// A confidence exactly equal to `confidence_threshold` is kept; strictly
/// below is dropped. The output never contains two records with the same
/// symbol or the same company identity.
pub fn rank(
    matches: Vec<ScoredMatch>,
    original_text: &str,
    scope: MarketScope,
    confidence_threshold: f64,
    max_results: usize,
) -> Vec<StockRecord> {
    let tokens = query_tokens(original_text);
    let hint = detect_market_hint(original_text);

    // (a) threshold, (b) scope filter with explicit-mention override.
    let mut kept: Vec<ScoredMatch> = matches
        .into_iter()
        .filter(|m| m.confidence >= confidence_threshold)
        .filter(|m| scope.accepts(&m.stock.exchange) || is_mentioned(&tokens, &m.stock.symbol))
        .collect();

    // (c) scope exchange priority, then descending confidence.
    kept.sort_by(|a, b| compare(a, b, scope));

    // (d) one survivor per company, preferring explicit mention, then a
    // scope-accepted listing, then a hint-accepted listing, then the best
    // remaining confidence.
    let mut groups: BTreeMap<String, Vec<ScoredMatch>> = BTreeMap::new();
    for m in kept {
        groups
            .entry(normalize_company_name(&m.stock.name))
            .or_default()
            .push(m);
    }

    let mut winners: Vec<ScoredMatch> = groups
        .into_values()
        .filter_map(|group| pick_winner(group, &tokens, hint, scope))
        .collect();
    winners.sort_by(|a, b| compare(a, b, scope));

    // (e) truncate, (f) unwrap the records.
    winners.truncate(max_results);
    winners.into_iter().map(|m| m.stock).collect()
}

fn compare(a: &ScoredMatch, b: &ScoredMatch, scope: MarketScope) -> Ordering {
    scope
        .sort_priority(&a.stock.exchange)
        .cmp(&scope.sort_priority(&b.stock.exchange))
        .then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.stock.symbol.cmp(&b.stock.symbol))
}

/// `group` arrives sorted by [`compare`], so the first member matching a
/// preference tier is that tier's best.
fn pick_winner(
    group: Vec<ScoredMatch>,
    tokens: &[String],
    hint: Option<MarketScope>,
    scope: MarketScope,
) -> Option<ScoredMatch> {
    if let Some(m) = group.iter().find(|m| is_mentioned(tokens, &m.stock.symbol)) {
        return Some(m.clone());
    }
    if scope != MarketScope::Global {
        if let Some(m) = group.iter().find(|m| scope.accepts(&m.stock.exchange)) {
            return Some(m.clone());
        }
    }
    if let Some(hinted) = hint {
        if let Some(m) = group.iter().find(|m| hinted.accepts(&m.stock.exchange)) {
            return Some(m.clone());
        }
    }
    // Best remaining confidence: the group is already in sorted order.
    group.into_iter().next()
}
