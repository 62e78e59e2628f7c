use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::USER_AGENT;
use super::util::with_retry;
use crate::core::cache::TtlCache;
use crate::core::dataset::CpiDataset;
use crate::core::provider::CpiProvider;

/// Fetches a CPI dataset published as JSON over HTTP.
///
/// The snapshot is kept in the supplied cache under the dataset URL, so
/// repeated fetches within the cache TTL do not touch the network.
pub struct HttpCpiProvider {
    url: String,
    cache: Arc<TtlCache<String, Arc<CpiDataset>>>,
}

impl HttpCpiProvider {
    pub fn new(url: &str, cache: Arc<TtlCache<String, Arc<CpiDataset>>>) -> Self {
        HttpCpiProvider {
            url: url.to_string(),
            cache,
        }
    }
}

#[async_trait]
impl CpiProvider for HttpCpiProvider {
    #[instrument(name = "CpiDatasetFetch", skip(self), fields(url = %self.url))]
    async fn fetch_dataset(&self) -> Result<Arc<CpiDataset>> {
        if let Some(cached) = self.cache.get(&self.url).await {
            return Ok(cached);
        }

        debug!("Requesting CPI dataset from {}", self.url);
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = with_retry(|| client.get(&self.url).send(), 2, 500)
            .await
            .map_err(|e| anyhow!("Request error: {} for CPI dataset: {}", e, self.url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for CPI dataset: {}",
                response.status(),
                self.url
            ));
        }

        let text = response.text().await?;
        let dataset = CpiDataset::from_json(&text)
            .map_err(|e| anyhow!("Failed to parse CPI dataset from {}: {}", self.url, e))?;
        debug!(records = dataset.len(), "Received CPI dataset");

        let dataset = Arc::new(dataset);
        self.cache.put(self.url.clone(), Arc::clone(&dataset)).await;
        Ok(dataset)
    }
}
