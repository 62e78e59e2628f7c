//! Exchange rate abstractions used to restate results in another currency

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Units of `to` bought by one unit of `from`.
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;

    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        if from.eq_ignore_ascii_case(to) {
            debug!("No currency conversion needed ({from} -> {to})");
            return Ok(amount);
        }
        let rate = self
            .get_rate(from, to)
            .await
            .with_context(|| format!("Currency conversion failed from {from} to {to}"))?;
        let converted = amount * rate;
        debug!("Converted {amount} from {from} to {to} at rate {rate}: {converted}");
        Ok(converted)
    }
}
