//! Data model for the resolution engine.
//!
//! # Core Types
//!
//! - [`StockRecord`] - One tradable instrument from the catalog snapshot
//! - [`MarketScope`] - The requested market/exchange-region filter
//! - [`Candidate`] - A normalized match candidate derived from an entity string
//! - [`ScoredMatch`] - A catalog record paired with a match confidence

mod matching;
mod scope;
mod stock;

pub use matching::{Candidate, CandidateKind, MatchKind, ScoredMatch};
pub use scope::{
    detect_market_hint, exchange_name, MarketScope, GLOBAL_ANCHOR_EXCHANGES,
    GLOBAL_PRIMARY_EXCHANGES, KNOWN_EXCHANGES,
};
pub use stock::{AssetKind, StockRecord};
