use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::core::dataset::CpiDataset;
use crate::core::provider::CpiProvider;

/// Reads a static CPI dataset from a local JSON file.
pub struct FileCpiProvider {
    path: PathBuf,
}

impl FileCpiProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCpiProvider { path: path.into() }
    }
}

#[async_trait]
impl CpiProvider for FileCpiProvider {
    async fn fetch_dataset(&self) -> Result<Arc<CpiDataset>> {
        debug!("Reading CPI dataset from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read CPI dataset: {}", self.path.display()))?;
        let dataset = CpiDataset::from_json(&text)
            .with_context(|| format!("Failed to parse CPI dataset: {}", self.path.display()))?;
        Ok(Arc::new(dataset))
    }
}
