use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::USER_AGENT;
use crate::core::cache::TtlCache;
use crate::core::currency::CurrencyRateProvider;

/// Latest exchange rates from an `open.er-api.com` compatible service.
///
/// One request returns every rate for the base currency; all of them are
/// cached under `FROM:TO` keys.
pub struct ExchangeRateProvider {
    base_url: String,
    cache: Arc<TtlCache<String, f64>>,
}

impl ExchangeRateProvider {
    pub fn new(base_url: &str, cache: Arc<TtlCache<String, f64>>) -> Self {
        ExchangeRateProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

fn cache_key(from: &str, to: &str) -> String {
    format!("{from}:{to}")
}

#[async_trait]
impl CurrencyRateProvider for ExchangeRateProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self))]
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        let from = from.to_uppercase();
        let to = to.to_uppercase();
        if from == to {
            return Ok(1.0);
        }
        if let Some(cached) = self.cache.get(&cache_key(&from, &to)).await {
            return Ok(cached);
        }

        let pair = format!("{from}{to}");
        let url = format!("{}/latest/{}", self.base_url, from);
        debug!("Requesting exchange rates from {}", url);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, pair))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", pair, e))?;

        let rate = data.rates.get(&to).copied();
        for (currency, value) in data.rates {
            self.cache.put(cache_key(&from, &currency), value).await;
        }

        rate.ok_or_else(|| anyhow!("No rate found for currency pair: {}", pair))
    }
}
