//! HTTP catalog provider.
//!
//! Fetches a JSON array of catalog records from a configured URL. Thin by
//! design: no retry or caching policy lives here; the service layer decides
//! when to refresh and the transport error surfaces as-is.

use async_trait::async_trait;

use crate::errors::ResolutionError;
use crate::models::StockRecord;

use super::traits::CatalogProvider;

/// Catalog provider backed by an HTTP endpoint returning JSON records.
pub struct HttpCatalogProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Use a preconfigured client (proxies, timeouts, headers).
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogProvider {
    fn id(&self) -> &'static str {
        "HTTP"
    }

    async fn fetch_catalog(&self) -> Result<Vec<StockRecord>, ResolutionError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(ResolutionError::CatalogFetch {
                provider: self.id().to_string(),
                message: format!("unexpected status {}", response.status()),
            });
        }

        let records: Vec<StockRecord> = response.json().await?;
        log::debug!("Fetched {} catalog records from {}", records.len(), self.url);
        Ok(records)
    }
}
