//! Catalog record models.

use serde::{Deserialize, Serialize};

/// Classification of a catalog instrument.
///
/// Only equities are resolvable today; the enum exists so the catalog
/// payload stays forward-compatible when other kinds appear.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A listed equity share (common stock, ADR, H-share, ...).
    #[default]
    Equity,
}

/// One tradable instrument from a catalog snapshot.
///
/// Display-only provider fields (price, change, volume) are irrelevant to
/// resolution and are ignored on deserialize. Within one snapshot `symbol`
/// is unique and `exchange` is one of the closed set of known exchange codes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Ticker symbol as listed (e.g., "BABA", "9988.HK").
    pub symbol: String,

    /// Company display name (e.g., "Alibaba Group Holding").
    pub name: String,

    /// Exchange code (e.g., "NYSE", "HKSE").
    #[serde(alias = "exchangeCode")]
    pub exchange: String,

    /// Instrument classification.
    #[serde(default)]
    pub kind: AssetKind,
}

impl StockRecord {
    /// Create a new equity record.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
            kind: AssetKind::Equity,
        }
    }
}
