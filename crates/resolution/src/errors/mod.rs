//! Error types for the resolution crate.
//!
//! Only catalog-level failures are errors. An empty result list is a valid
//! outcome ("no matches found"), a candidate failing ticker-shape checks is
//! normal control flow, and a resolution call arriving before the first
//! index build simply awaits the build inside the service.

use thiserror::Error;

/// Errors that can occur while obtaining or indexing the catalog.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The catalog snapshot is missing, empty, or malformed.
    /// Fatal to resolution: never silently serve results off a bad index.
    #[error("Catalog unavailable: {reason}")]
    CatalogUnavailable {
        /// Why the snapshot was rejected.
        reason: String,
    },

    /// The catalog provider failed to deliver a snapshot.
    /// Transient; the caller owns retry policy.
    #[error("Catalog fetch failed: {provider} - {message}")]
    CatalogFetch {
        /// The provider that failed.
        provider: String,
        /// The error message from the provider.
        message: String,
    },

    /// A network error occurred while fetching the catalog.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ResolutionError {
    /// Shorthand for a malformed/empty snapshot.
    pub fn catalog_unavailable(reason: impl Into<String>) -> Self {
        Self::CatalogUnavailable {
            reason: reason.into(),
        }
    }
}
