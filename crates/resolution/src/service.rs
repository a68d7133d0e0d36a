//! Resolution service: the async boundary around the pure engine.
//!
//! Owns the "current index" the engine resolves against. Index construction
//! (catalog fetch + build) is the only slow operation in the crate, and the
//! contract is:
//!
//! - an index is published atomically, fully built, or not at all;
//! - a resolution call arriving before the first build awaits it instead of
//!   failing;
//! - at most one rebuild runs at a time; concurrent refresh requests join
//!   the in-flight build's result rather than racing to rebuild;
//! - resolution calls against a published index run fully in parallel (the
//!   index is read-only after publication).

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use crate::errors::ResolutionError;
use crate::index::CatalogIndex;
use crate::models::{MarketScope, StockRecord};
use crate::provider::{CatalogProvider, EntityExtractor};
use crate::resolver::{ResolutionEngine, ResolveOptions};

/// Default index staleness deadline.
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

struct Published {
    index: Arc<CatalogIndex>,
    built_at: Instant,
}

impl Published {
    fn is_fresh(&self, max_age: Duration) -> bool {
        self.built_at.elapsed() < max_age
    }
}

/// Builds, refreshes, and serves the catalog index.
pub struct ResolutionService {
    provider: Arc<dyn CatalogProvider>,
    published: RwLock<Option<Published>>,
    // Single-rebuild gate: holders re-check freshness after acquiring, so a
    // request that waited out an in-flight rebuild joins its result.
    rebuild_gate: Mutex<()>,
    max_age: Duration,
}

impl ResolutionService {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            published: RwLock::new(None),
            rebuild_gate: Mutex::new(()),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Override the staleness deadline.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// The current published index, building it first if necessary.
    ///
    /// When the published index has gone stale a rebuild is attempted; if
    /// that rebuild fails the stale index is served rather than failing the
    /// call, so resolution stays available on a once-valid catalog.
    pub async fn current_index(&self) -> Result<Arc<CatalogIndex>, ResolutionError> {
        if let Some(published) = self.published.read().await.as_ref() {
            if published.is_fresh(self.max_age) {
                return Ok(published.index.clone());
            }
        }

        match self.rebuild(false).await {
            Ok(index) => Ok(index),
            Err(error) => {
                let guard = self.published.read().await;
                match guard.as_ref() {
                    Some(stale) => {
                        log::warn!(
                            "Catalog refresh failed, serving stale index ({} records): {error}",
                            stale.index.len()
                        );
                        Ok(stale.index.clone())
                    }
                    None => Err(error),
                }
            }
        }
    }

    /// Rebuild the index from a fresh catalog snapshot.
    ///
    /// With `force = false` a request that finds a fresh index (typically
    /// one published by a rebuild it waited on) returns it without another
    /// fetch. With `force = true` the snapshot is always refetched.
    pub async fn refresh(&self, force: bool) -> Result<Arc<CatalogIndex>, ResolutionError> {
        self.rebuild(force).await
    }

    /// Resolve against the current index.
    ///
    /// Fails only when no catalog was ever available; an empty result list
    /// is the normal "no matches" outcome.
    pub async fn resolve(
        &self,
        entities: &[String],
        original_text: &str,
        scope: MarketScope,
        options: &ResolveOptions,
    ) -> Result<Vec<StockRecord>, ResolutionError> {
        let index = self.current_index().await?;
        Ok(ResolutionEngine::new(index).resolve(entities, original_text, scope, options))
    }

    /// Extract entities from `text` with the given extractor, then resolve.
    ///
    /// Convenience for callers holding raw (already translated) query text;
    /// `original_text` is the untranslated input used for market hints.
    pub async fn resolve_query(
        &self,
        extractor: &dyn EntityExtractor,
        text: &str,
        original_text: &str,
        scope: MarketScope,
        options: &ResolveOptions,
    ) -> Result<Vec<StockRecord>, ResolutionError> {
        let entities = extractor.extract(text).await?;
        self.resolve(&entities, original_text, scope, options).await
    }

    async fn rebuild(&self, force: bool) -> Result<Arc<CatalogIndex>, ResolutionError> {
        let _gate = self.rebuild_gate.lock().await;

        if !force {
            if let Some(published) = self.published.read().await.as_ref() {
                if published.is_fresh(self.max_age) {
                    return Ok(published.index.clone());
                }
            }
        }

        log::debug!("Rebuilding catalog index via provider {}", self.provider.id());
        let snapshot = self.provider.fetch_catalog().await?;
        let index = Arc::new(CatalogIndex::build(snapshot)?);

        let mut guard = self.published.write().await;
        *guard = Some(Published {
            index: index.clone(),
            built_at: Instant::now(),
        });
        log::debug!("Published catalog index with {} records", index.len());
        Ok(index)
    }
}
