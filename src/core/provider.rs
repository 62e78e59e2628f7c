//! CPI data source abstractions

use crate::core::dataset::CpiDataset;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CpiProvider: Send + Sync {
    /// Returns a snapshot of the full CPI dataset.
    async fn fetch_dataset(&self) -> Result<Arc<CpiDataset>>;
}
