//! Catalog index: exact symbol tables plus per-scope fuzzy partitions.
//!
//! Built once per catalog snapshot and read-only afterwards. Each
//! [`MarketScope`] gets its own partition (GLOBAL = the full catalog, other
//! scopes = the catalog filtered to their accepted exchange codes) holding
//! an uppercase `symbol -> record` table and a fuzzy-searchable entry list
//! over `(symbol, name)`.
//!
//! Construction fails loudly on an empty or malformed snapshot: callers
//! must never resolve against a partial index.

use std::collections::HashMap;

use crate::errors::ResolutionError;
use crate::models::{MarketScope, StockRecord, KNOWN_EXCHANGES};

/// Discount applied when the best field hit is a single name token rather
/// than the full name or symbol, so full-field matches outrank token ones.
const NAME_TOKEN_WEIGHT: f64 = 0.92;

/// One record's searchable view inside a partition.
struct FuzzyEntry {
    record: usize,
    symbol: String,
    name: String,
    name_tokens: Vec<String>,
}

/// Exact table plus fuzzy entries for one market scope.
struct Partition {
    exact: HashMap<String, usize>,
    entries: Vec<FuzzyEntry>,
}

impl Partition {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            exact: HashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, record_idx: usize, record: &StockRecord) {
        self.exact.insert(record.symbol.to_uppercase(), record_idx);

        let name = normalize(&record.name);
        self.entries.push(FuzzyEntry {
            record: record_idx,
            symbol: record.symbol.to_lowercase(),
            name_tokens: name.split_whitespace().map(str::to_string).collect(),
            name,
        });
    }
}

/// Fuzzy-searchable index over one catalog snapshot.
pub struct CatalogIndex {
    records: Vec<StockRecord>,
    partitions: HashMap<MarketScope, Partition>,
}

impl CatalogIndex {
    /// Build the index from a catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::CatalogUnavailable`] when the snapshot is
    /// empty, a record has a blank symbol or name, an exchange code is
    /// outside the known set, or a symbol appears twice.
    pub fn build(snapshot: Vec<StockRecord>) -> Result<Self, ResolutionError> {
        if snapshot.is_empty() {
            return Err(ResolutionError::catalog_unavailable("empty snapshot"));
        }

        let mut partitions: HashMap<MarketScope, Partition> = MarketScope::ALL
            .iter()
            .map(|scope| (*scope, Partition::with_capacity(snapshot.len())))
            .collect();

        let mut seen_symbols: HashMap<String, usize> = HashMap::with_capacity(snapshot.len());

        for (idx, record) in snapshot.iter().enumerate() {
            if record.symbol.trim().is_empty() {
                return Err(ResolutionError::catalog_unavailable(format!(
                    "record {idx} has an empty symbol"
                )));
            }
            if record.name.trim().is_empty() {
                return Err(ResolutionError::catalog_unavailable(format!(
                    "record '{}' has an empty name",
                    record.symbol
                )));
            }
            if !KNOWN_EXCHANGES.contains(&record.exchange.as_str()) {
                return Err(ResolutionError::catalog_unavailable(format!(
                    "record '{}' has unknown exchange code '{}'",
                    record.symbol, record.exchange
                )));
            }
            if let Some(first) = seen_symbols.insert(record.symbol.to_uppercase(), idx) {
                return Err(ResolutionError::catalog_unavailable(format!(
                    "duplicate symbol '{}' (records {first} and {idx})",
                    record.symbol
                )));
            }

            for scope in MarketScope::ALL {
                if scope.accepts(&record.exchange) {
                    if let Some(partition) = partitions.get_mut(scope) {
                        partition.insert(idx, record);
                    }
                }
            }
        }

        log::debug!(
            "Catalog index built: {} records, {} partitions",
            snapshot.len(),
            partitions.len()
        );

        Ok(Self {
            records: snapshot,
            partitions,
        })
    }

    /// Number of records in the underlying snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact lookup of an uppercase symbol.
    ///
    /// Tries the scope's own table first, then falls back to the global
    /// table so explicitly mentioned out-of-scope symbols still match
    /// exactly; scope filtering downstream decides whether they survive.
    pub fn exact_lookup(&self, scope: MarketScope, symbol_upper: &str) -> Option<&StockRecord> {
        let idx = self
            .partition(scope)
            .and_then(|p| p.exact.get(symbol_upper))
            .or_else(|| {
                self.partition(MarketScope::Global)
                    .and_then(|p| p.exact.get(symbol_upper))
            })?;
        self.records.get(*idx)
    }

    /// Fuzzy search of one scope partition.
    ///
    /// Similarity per entry is the best of Jaro-Winkler against the
    /// lowercase symbol, the full normalized name, and each name token
    /// (token hits discounted by [`NAME_TOKEN_WEIGHT`]). Results with a
    /// score of at least `min_score` are returned sorted by descending
    /// score, ties broken by shorter name then symbol.
    pub fn fuzzy_search(
        &self,
        scope: MarketScope,
        query: &str,
        min_score: f64,
        limit: usize,
    ) -> Vec<(&StockRecord, f64)> {
        let query = normalize(query);
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let Some(partition) = self.partition(scope) else {
            return Vec::new();
        };

        let mut hits: Vec<(&StockRecord, f64)> = partition
            .entries
            .iter()
            .filter_map(|entry| {
                let score = entry_similarity(&query, entry);
                if score >= min_score {
                    Some((&self.records[entry.record], score))
                } else {
                    None
                }
            })
            .collect();

        hits.sort_by(|(a, sa), (b, sb)| {
            sb.partial_cmp(sa)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.len().cmp(&b.name.len()))
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        hits.truncate(limit);
        hits
    }

    fn partition(&self, scope: MarketScope) -> Option<&Partition> {
        self.partitions.get(&scope)
    }
}

fn entry_similarity(query: &str, entry: &FuzzyEntry) -> f64 {
    let symbol = strsim::jaro_winkler(query, &entry.symbol);
    let name = strsim::jaro_winkler(query, &entry.name);
    let token = entry
        .name_tokens
        .iter()
        .map(|token| strsim::jaro_winkler(query, token))
        .fold(0.0, f64::max)
        * NAME_TOKEN_WEIGHT;

    symbol.max(name).max(token)
}

/// Lowercase and collapse interior whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
