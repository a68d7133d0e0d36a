//! Match candidates and scored matches.

use serde::Serialize;

use super::stock::StockRecord;

/// Fuzzy confidences never reach the exact-match score of 1.0.
pub const MAX_FUZZY_CONFIDENCE: f64 = 0.99;

/// How a candidate string should be tried against the catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CandidateKind {
    /// Uppercase ticker-shaped token, eligible for exact symbol lookup.
    Ticker,
    /// Original-cased phrase, tried against company names by fuzzy search.
    Phrase,
}

/// A normalized match candidate derived from one entity string.
///
/// Candidates exist only within a single resolution call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    /// The normalized text to match.
    pub text: String,
    /// How the text was derived.
    pub kind: CandidateKind,
}

impl Candidate {
    pub fn ticker(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CandidateKind::Ticker,
        }
    }

    pub fn phrase(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: CandidateKind::Phrase,
        }
    }
}

/// Whether a match came from exact symbol lookup or fuzzy search.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Fuzzy,
}

/// A catalog record paired with a match confidence.
///
/// Immutable wrapper: confidence and kind ride alongside the record, never
/// inside it, so catalog records stay pure data. `Exact` implies a
/// confidence of exactly 1.0.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredMatch {
    pub stock: StockRecord,
    pub confidence: f64,
    pub kind: MatchKind,
}

impl ScoredMatch {
    /// An exact symbol hit. Confidence is always 1.0.
    pub fn exact(stock: StockRecord) -> Self {
        Self {
            stock,
            confidence: 1.0,
            kind: MatchKind::Exact,
        }
    }

    /// A fuzzy hit, clamped into `[0, MAX_FUZZY_CONFIDENCE]`.
    pub fn fuzzy(stock: StockRecord, confidence: f64) -> Self {
        Self {
            stock,
            confidence: confidence.clamp(0.0, MAX_FUZZY_CONFIDENCE),
            kind: MatchKind::Fuzzy,
        }
    }

    /// Multiply a fuzzy confidence by `factor`, keeping the exact invariant.
    ///
    /// Exact matches are returned untouched: their confidence is pinned to
    /// 1.0 and boosting them would break that invariant.
    pub fn boosted(self, factor: f64) -> Self {
        match self.kind {
            MatchKind::Exact => self,
            MatchKind::Fuzzy => Self::fuzzy(self.stock, self.confidence * factor),
        }
    }
}
