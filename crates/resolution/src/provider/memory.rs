//! In-memory collaborators for embedding and tests.

use async_trait::async_trait;

use crate::errors::ResolutionError;
use crate::models::StockRecord;

use super::traits::{CatalogProvider, EntityExtractor};

/// Catalog provider serving a fixed in-memory snapshot.
pub struct StaticCatalogProvider {
    records: Vec<StockRecord>,
}

impl StaticCatalogProvider {
    pub fn new(records: Vec<StockRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    fn id(&self) -> &'static str {
        "STATIC"
    }

    async fn fetch_catalog(&self) -> Result<Vec<StockRecord>, ResolutionError> {
        Ok(self.records.clone())
    }
}

/// Trivial extractor splitting on whitespace.
///
/// A stand-in where no NLP extractor is wired up; real deployments inject
/// their own [`EntityExtractor`].
pub struct WhitespaceExtractor;

#[async_trait]
impl EntityExtractor for WhitespaceExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ResolutionError> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}
