//! Cross-listing disambiguation.
//!
//! Companies trading on several exchanges produce one match per listing.
//! Matches are grouped by normalized company name, and groups with two or
//! more listings go through the exchange-selection policy: explicit mention
//! in the query text, then market-hint keywords, then the requested scope,
//! then the GLOBAL liquidity fallback. Rules run in strict priority order
//! and the first rule producing a non-empty result wins.
//!
//! The output is the per-company in-scope candidate set, not yet reduced to
//! one symbol; the ranker owns final deduplication.

use std::collections::BTreeMap;

use crate::models::{
    detect_market_hint, MarketScope, ScoredMatch, GLOBAL_ANCHOR_EXCHANGES,
    GLOBAL_PRIMARY_EXCHANGES,
};

use super::candidates::{is_mentioned, query_tokens};

/// Boost for listings selected by a market hint or the requested scope,
/// capped below 1.0 so exact matches still outrank them.
const SCOPE_BOOST: f64 = 1.15;

/// Mild boost for home-market listings in the GLOBAL fallback; a stable
/// tie-break rather than an arbitrary one.
const ANCHOR_BOOST: f64 = 1.05;

/// Corporate designators dropped from the end of names when grouping, so
/// "Alibaba Group Holding" and "Alibaba Group Holding Limited" coincide.
const NAME_DESIGNATORS: &[&str] = &[
    "limited",
    "ltd",
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "company",
    "co",
    "plc",
    "holdings",
    "holding",
    "group",
    "sa",
    "ag",
    "nv",
    "adr",
];

/// Company identity key: lowercase, punctuation-free, trailing corporate
/// designators removed. Falls back to the full normalized name when the
/// name consists only of designators.
pub(crate) fn normalize_company_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    let mut trimmed = tokens.clone();
    while trimmed.len() > 1 && NAME_DESIGNATORS.contains(trimmed.last().unwrap_or(&"")) {
        trimmed.pop();
    }

    if trimmed.is_empty() {
        tokens.join(" ")
    } else {
        trimmed.join(" ")
    }
}

/// Apply the cross-listing policy to a flat match list.
pub fn disambiguate(
    matches: Vec<ScoredMatch>,
    original_text: &str,
    scope: MarketScope,
) -> Vec<ScoredMatch> {
    let tokens = query_tokens(original_text);
    let hint = detect_market_hint(original_text);

    let mut groups: BTreeMap<String, Vec<ScoredMatch>> = BTreeMap::new();
    for m in matches {
        groups
            .entry(normalize_company_name(&m.stock.name))
            .or_default()
            .push(m);
    }

    let mut result = Vec::new();
    for (company, group) in groups {
        if group.len() < 2 {
            result.extend(group);
            continue;
        }
        log::debug!(
            "Disambiguating {} listings of '{company}' (scope {scope}, hint {hint:?})",
            group.len()
        );
        result.extend(select_listings(group, &tokens, hint, scope));
    }
    result
}

fn select_listings(
    group: Vec<ScoredMatch>,
    tokens: &[String],
    hint: Option<MarketScope>,
    scope: MarketScope,
) -> Vec<ScoredMatch> {
    // Rule 1: a symbol literally present in the query overrides everything,
    // including the requested scope.
    let mentioned: Vec<ScoredMatch> = group
        .iter()
        .filter(|m| is_mentioned(tokens, &m.stock.symbol))
        .cloned()
        .collect();
    if !mentioned.is_empty() {
        return mentioned;
    }

    // Rule 2: market-hint keywords in the original text.
    if let Some(hinted) = hint {
        let kept: Vec<ScoredMatch> = group
            .iter()
            .filter(|m| hinted.accepts(&m.stock.exchange))
            .cloned()
            .map(|m| m.boosted(SCOPE_BOOST))
            .collect();
        if !kept.is_empty() {
            return kept;
        }
    }

    // Rule 3: the caller's requested scope.
    if scope != MarketScope::Global {
        let kept: Vec<ScoredMatch> = group
            .iter()
            .filter(|m| scope.accepts(&m.stock.exchange))
            .cloned()
            .map(|m| m.boosted(SCOPE_BOOST))
            .collect();
        if !kept.is_empty() {
            return kept;
        }
        // Nothing in scope and nothing mentioned: pass through unchanged
        // and let the ranker's scope filter decide.
        return group;
    }

    // Rule 4: GLOBAL liquidity fallback. Prefer primary/liquid listings;
    // otherwise keep everything with a mild home-market boost.
    let primary: Vec<ScoredMatch> = group
        .iter()
        .filter(|m| GLOBAL_PRIMARY_EXCHANGES.contains(&m.stock.exchange.as_str()))
        .cloned()
        .collect();
    if !primary.is_empty() {
        return primary;
    }

    group
        .into_iter()
        .map(|m| {
            if GLOBAL_ANCHOR_EXCHANGES.contains(&m.stock.exchange.as_str()) {
                m.boosted(ANCHOR_BOOST)
            } else {
                m
            }
        })
        .collect()
}
