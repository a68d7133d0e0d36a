//! Traits for the engine's external collaborators.
//!
//! The catalog provider and entity extractor are off-the-shelf services;
//! the engine consumes them behind these seams and owns no fetching or
//! NLP logic itself. Translation/language detection happens further
//! upstream and never reaches this crate: the engine receives already
//! normalized entities plus the original text.

use async_trait::async_trait;

use crate::errors::ResolutionError;
use crate::models::StockRecord;

/// Supplies the full list of tradable instruments.
///
/// Implementations own their own caching and retry policy; the engine only
/// requires that a successful fetch returns a non-empty snapshot.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the current catalog snapshot.
    ///
    /// # Returns
    ///
    /// The full instrument list, or a [`ResolutionError`] on transient
    /// fetch failure. An empty list is not an error here; the index build
    /// rejects it as [`ResolutionError::CatalogUnavailable`].
    async fn fetch_catalog(&self) -> Result<Vec<StockRecord>, ResolutionError>;
}

/// Turns raw user text into surface candidate strings.
///
/// May return an empty list; the engine treats that as a valid
/// nothing-to-resolve input.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ResolutionError>;
}
