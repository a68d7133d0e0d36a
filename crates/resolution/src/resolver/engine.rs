//! The resolution engine: one pure entry point over a catalog index.

use std::sync::Arc;

use crate::index::CatalogIndex;
use crate::models::{MarketScope, StockRecord};

use super::candidates::derive_candidates;
use super::disambiguate::disambiguate;
use super::matcher::match_candidates;
use super::rank::rank;

/// Tunables for a resolution call.
#[derive(Clone, Copy, Debug)]
pub struct ResolveOptions {
    /// Matches with a confidence strictly below this are dropped.
    pub confidence_threshold: f64,
    /// Maximum number of records returned.
    pub max_results: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.3,
            max_results: 5,
        }
    }
}

/// Resolves entity strings to catalog records against one published index.
///
/// Resolution is a pure, synchronous computation: for a fixed index and
/// fixed inputs the output order is always identical. The engine holds a
/// shared reference to the read-only index, so any number of engines (and
/// calls) may run in parallel.
pub struct ResolutionEngine {
    index: Arc<CatalogIndex>,
}

impl ResolutionEngine {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    /// The index this engine resolves against.
    pub fn index(&self) -> &Arc<CatalogIndex> {
        &self.index
    }

    /// Resolve extracted entity strings to a ranked, deduplicated list of
    /// catalog records.
    ///
    /// `original_text` is the untranslated query text, used for explicit
    /// symbol mentions and market-hint detection. An empty entity list
    /// yields an empty result for any text and scope. "No matches" is a
    /// valid empty result, never an error.
    pub fn resolve(
        &self,
        entities: &[String],
        original_text: &str,
        scope: MarketScope,
        options: &ResolveOptions,
    ) -> Vec<StockRecord> {
        if entities.is_empty() {
            return Vec::new();
        }

        let candidates = derive_candidates(entities);
        let matches = match_candidates(
            &self.index,
            &candidates,
            original_text,
            scope,
            options.confidence_threshold,
        );
        let matches = disambiguate(matches, original_text, scope);
        let results = rank(
            matches,
            original_text,
            scope,
            options.confidence_threshold,
            options.max_results,
        );

        log::debug!(
            "Resolved {} entities to {} records (scope {scope})",
            entities.len(),
            results.len()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ResolutionEngine {
        let index = CatalogIndex::build(vec![
            StockRecord::new("BABA", "Alibaba Group Holding", "NYSE"),
            StockRecord::new("9988.HK", "Alibaba Group Holding", "HKSE"),
            StockRecord::new("MSFT", "Microsoft Corporation", "NASDAQ"),
            StockRecord::new("NVDA", "NVIDIA Corporation", "NASDAQ"),
            StockRecord::new("0700.HK", "Tencent Holdings", "HKSE"),
        ])
        .unwrap();
        ResolutionEngine::new(Arc::new(index))
    }

    fn entities(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_entities_yield_empty_result() {
        let engine = engine();
        let out = engine.resolve(
            &[],
            "Alibaba Hong Kong stocks",
            MarketScope::Global,
            &ResolveOptions::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let engine = engine();
        let run = || {
            engine.resolve(
                &entities(&["Alibaba", "NVDA"]),
                "compare Alibaba and NVDA",
                MarketScope::Global,
                &ResolveOptions::default(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_mixed_query_resolves_both_entities() {
        let engine = engine();
        let out = engine.resolve(
            &entities(&["Alibaba", "NVDA"]),
            "compare Alibaba Hong Kong stocks and NVDA",
            MarketScope::Global,
            &ResolveOptions::default(),
        );
        let symbols: Vec<_> = out.iter().map(|r| r.symbol.as_str()).collect();
        assert!(symbols.contains(&"9988.HK"));
        assert!(symbols.contains(&"NVDA"));
        assert!(!symbols.contains(&"BABA"));
    }

    #[test]
    fn test_nonsense_entities_yield_empty_not_error() {
        let engine = engine();
        let out = engine.resolve(
            &entities(&["zzqqy"]),
            "zzqqy",
            MarketScope::Global,
            &ResolveOptions::default(),
        );
        assert!(out.is_empty());
    }
}
