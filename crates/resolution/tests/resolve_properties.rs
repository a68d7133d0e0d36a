//! End-to-end properties of the resolution pipeline.

use std::sync::Arc;

use tickerlens_resolution::{
    CatalogIndex, MarketScope, ResolutionEngine, ResolveOptions, StockRecord,
};

fn catalog() -> Vec<StockRecord> {
    vec![
        StockRecord::new("BABA", "Alibaba Group Holding", "NYSE"),
        StockRecord::new("9988.HK", "Alibaba Group Holding", "HKSE"),
        StockRecord::new("MSFT", "Microsoft Corporation", "NASDAQ"),
        StockRecord::new("AAPL", "Apple Inc", "NASDAQ"),
        StockRecord::new("NVDA", "NVIDIA Corporation", "NASDAQ"),
        StockRecord::new("0700.HK", "Tencent Holdings", "HKSE"),
        StockRecord::new("600519.SS", "Kweichow Moutai", "SHH"),
    ]
}

fn engine() -> ResolutionEngine {
    ResolutionEngine::new(Arc::new(CatalogIndex::build(catalog()).unwrap()))
}

fn resolve(entities: &[&str], text: &str, scope: MarketScope) -> Vec<String> {
    engine()
        .resolve(
            &entities.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            text,
            scope,
            &ResolveOptions::default(),
        )
        .into_iter()
        .map(|r| r.symbol)
        .collect()
}

#[test]
fn determinism_for_fixed_catalog() {
    let run = || {
        resolve(
            &["Alibaba", "NVDA", "Tencent"],
            "compare Alibaba, NVDA and Tencent",
            MarketScope::Global,
        )
    };
    let first = run();
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[test]
fn exact_match_supremacy() {
    let engine = engine();
    let out = engine.resolve(
        &["NVDA".to_string()],
        "NVDA earnings",
        MarketScope::Us,
        &ResolveOptions::default(),
    );
    assert_eq!(out[0].symbol, "NVDA");

    // Raising the threshold to the maximum cannot drop an exact match.
    let out = engine.resolve(
        &["NVDA".to_string()],
        "NVDA earnings",
        MarketScope::Us,
        &ResolveOptions {
            confidence_threshold: 1.0,
            max_results: 5,
        },
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].symbol, "NVDA");
}

#[test]
fn no_duplicate_symbols_or_companies() {
    let symbols = resolve(
        &["Alibaba", "BABA", "9988.HK"],
        "Alibaba BABA 9988.HK",
        MarketScope::Global,
    );
    let mut unique = symbols.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), symbols.len());
    // All three entities denote one company: exactly one survivor.
    assert_eq!(symbols.len(), 1);
}

#[test]
fn cross_listing_resolves_by_scope() {
    let us = resolve(&["Alibaba"], "Alibaba stock", MarketScope::Us);
    assert!(us.contains(&"BABA".to_string()));
    assert!(!us.contains(&"9988.HK".to_string()));

    let hk = resolve(&["Alibaba"], "Alibaba stock", MarketScope::Hk);
    assert!(hk.contains(&"9988.HK".to_string()));
    assert!(!hk.contains(&"BABA".to_string()));
}

#[test]
fn explicit_mention_overrides_scope() {
    let out = resolve(&["BABA"], "BABA", MarketScope::Hk);
    assert!(out.contains(&"BABA".to_string()));
}

#[test]
fn market_hint_overrides_global_default() {
    let out = resolve(&["Alibaba"], "Alibaba Hong Kong stocks", MarketScope::Global);
    assert!(out.contains(&"9988.HK".to_string()));
    assert!(!out.contains(&"BABA".to_string()));
}

#[test]
fn conversational_phrasing_is_not_a_market_hint() {
    // "which shares" must not read as an H-share hint; the GLOBAL
    // liquidity rule still picks the US listing.
    let out = resolve(
        &["Alibaba"],
        "which shares of Alibaba should I buy",
        MarketScope::Global,
    );
    assert_eq!(out, vec!["BABA".to_string()]);
}

#[test]
fn caller_threshold_governs_weak_fuzzy_matches() {
    let engine = ResolutionEngine::new(Arc::new(
        CatalogIndex::build(vec![
            StockRecord::new("BAC", "Bank of America", "NYSE"),
            StockRecord::new("MSFT", "Microsoft Corporation", "NASDAQ"),
        ])
        .unwrap(),
    ));
    let entities = vec!["boeing".to_string()];

    // A permissive threshold surfaces the weak "boeing" ~ "bank" match.
    let out = engine.resolve(
        &entities,
        "boeing",
        MarketScope::Us,
        &ResolveOptions {
            confidence_threshold: 0.1,
            max_results: 5,
        },
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].symbol, "BAC");

    // The default threshold drops the same match.
    let out = engine.resolve(
        &entities,
        "boeing",
        MarketScope::Us,
        &ResolveOptions::default(),
    );
    assert!(out.is_empty());
}

#[test]
fn global_scope_prefers_liquid_listing() {
    let out = resolve(&["Alibaba"], "Alibaba stock", MarketScope::Global);
    assert!(out.contains(&"BABA".to_string()));
    assert!(!out.contains(&"9988.HK".to_string()));
}

#[test]
fn empty_input_yields_empty_output() {
    for scope in [
        MarketScope::Global,
        MarketScope::Us,
        MarketScope::Cn,
        MarketScope::Hk,
    ] {
        assert!(resolve(&[], "Alibaba Hong Kong stocks", scope).is_empty());
    }
}

#[test]
fn typo_tolerance() {
    let engine = engine();
    let out = engine.resolve(
        &["Microsft".to_string()],
        "Microsft stock",
        MarketScope::Us,
        &ResolveOptions::default(),
    );
    assert_eq!(out[0].symbol, "MSFT");
}

#[test]
fn chinese_hint_selects_home_market() {
    let out = resolve(&["Alibaba"], "阿里巴巴港股", MarketScope::Global);
    assert_eq!(out, vec!["9988.HK".to_string()]);
}

#[test]
fn regional_symbol_resolves_exactly() {
    let out = resolve(&["9988.HK"], "9988.HK", MarketScope::Hk);
    assert_eq!(out, vec!["9988.HK".to_string()]);

    let out = resolve(&["600519.SS"], "600519.SS", MarketScope::Cn);
    assert_eq!(out, vec!["600519.SS".to_string()]);
}

#[test]
fn max_results_truncates() {
    let out = engine().resolve(
        &[
            "Apple".to_string(),
            "Microsoft".to_string(),
            "NVIDIA".to_string(),
        ],
        "Apple Microsoft NVIDIA",
        MarketScope::Us,
        &ResolveOptions {
            confidence_threshold: 0.3,
            max_results: 2,
        },
    );
    assert_eq!(out.len(), 2);
}
