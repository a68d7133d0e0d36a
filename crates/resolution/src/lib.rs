//! Tickerlens Resolution Crate
//!
//! Entity-to-symbol resolution: given a short list of surface-text
//! candidates ("Alibaba", "NVDA") extracted from a free-form query, plus a
//! requested market scope, decide which catalog instruments they denote,
//! resolve cross-listed companies to the right exchange, and return a
//! ranked, deduplicated symbol list.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! | CatalogProvider  | --> |  CatalogIndex    |  (built once per snapshot,
//! +------------------+     +------------------+   read-only after publish)
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ResolutionEngine |  (pure pipeline:
//!                          +------------------+   candidates -> matcher ->
//!                                  |              disambiguate -> rank)
//!                                  v
//!                          +------------------+
//!                          |  StockRecord[]   |  (ranked, deduplicated)
//!                          +------------------+
//! ```
//!
//! [`ResolutionService`] wraps the pure engine for async callers: it fetches
//! the catalog, builds and atomically publishes the index, awaits in-flight
//! builds instead of racing, and refreshes on staleness or on demand.
//!
//! # Core Types
//!
//! - [`StockRecord`] - One tradable instrument from the catalog
//! - [`MarketScope`] - Requested market/exchange-region filter
//! - [`CatalogIndex`] - Exact tables plus per-scope fuzzy partitions
//! - [`ScoredMatch`] - Record + confidence + exact/fuzzy kind
//! - [`ResolveOptions`] - Confidence threshold and result count

pub mod errors;
pub mod index;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod service;

pub use errors::ResolutionError;
pub use index::CatalogIndex;
pub use models::{
    detect_market_hint, exchange_name, AssetKind, Candidate, CandidateKind, MarketScope,
    MatchKind, ScoredMatch, StockRecord,
};
pub use provider::{CatalogProvider, EntityExtractor, HttpCatalogProvider, StaticCatalogProvider};
pub use resolver::{ResolutionEngine, ResolveOptions};
pub use service::ResolutionService;
