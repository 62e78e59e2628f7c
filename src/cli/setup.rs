use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const SAMPLE_DATASET: &str = include_str!("../../docs/cpi_sample.json");
const SAMPLE_DATASET_FILE: &str = "cpi_sample.json";

/// Creates a default configuration file with example content at the default location
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path)
}

/// Creates a default configuration file with example content at the specified path
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    let config_dir = path.parent().unwrap_or(Path::new(""));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("Failed to create directory: {}", config_dir.display()))?;

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    // The example config reads this file; an existing dataset is left alone
    let dataset_path = config_dir.join(SAMPLE_DATASET_FILE);
    if !dataset_path.exists() {
        std::fs::write(&dataset_path, SAMPLE_DATASET).with_context(|| {
            format!("Failed to write sample dataset to {}", dataset_path.display())
        })?;
        tracing::info!("Created sample CPI dataset at {}", dataset_path.display());
    }

    tracing::info!("Created default configuration at {}", path.display());
    println!("Created configuration at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CpiProvider;
    use crate::core::config::CpiSourceConfig;
    use crate::core::dataset::CpiDataset;
    use crate::core::inflation::calculate_inflation;
    use crate::providers::file_cpi::FileCpiProvider;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_config_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        setup_at_path(&config_path)?;

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path)?;
        assert!(content.contains("providers:"));
        assert!(content.contains("default_country:"));
        assert!(content.contains("# Example configuration file for infl"));
        assert!(config_path.with_file_name("cpi_sample.json").exists());

        Ok(())
    }

    #[test]
    fn test_setup_fails_if_config_exists() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "test")?;

        let result = setup_at_path(&config_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));

        Ok(())
    }

    #[test]
    fn test_example_config_is_valid_yaml() -> Result<()> {
        let config: AppConfig = serde_yaml::from_str(EXAMPLE_CONFIG)
            .context("Failed to parse example config as YAML")?;

        assert!(matches!(config.providers.cpi, CpiSourceConfig::File { .. }));
        assert_eq!(config.default_country, "USA");
        assert_eq!(config.cache_ttl_secs, 3600);

        Ok(())
    }

    #[test]
    fn test_sample_dataset_is_valid() -> Result<()> {
        let dataset = CpiDataset::from_json(SAMPLE_DATASET)?;
        assert_eq!(dataset.records().first().map(|r| r.year), Some(2000));
        assert_eq!(dataset.records().last().map(|r| r.year), Some(2023));
        // The README's calculate example restates USA money from 2000 to 2020
        let restated = calculate_inflation(23.0, 2000, 2020, "USA", &dataset)?;
        assert!(restated.is_some());
        Ok(())
    }

    #[test]
    fn test_setup_keeps_existing_dataset() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let dataset_path = temp_dir.path().join("cpi_sample.json");
        fs::write(&dataset_path, "[]")?;

        setup_at_path(temp_dir.path().join("config.yaml"))?;

        assert_eq!(fs::read_to_string(&dataset_path)?, "[]");
        Ok(())
    }

    #[tokio::test]
    async fn test_setup_config_reads_dataset_from_config_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        setup_at_path(&config_path)?;

        let config = AppConfig::load_from_path(&config_path)?;
        let CpiSourceConfig::File { path } = config.providers.cpi else {
            panic!("Expected a file CPI source");
        };
        assert_eq!(path, temp_dir.path().join("cpi_sample.json"));

        let dataset = FileCpiProvider::new(path).fetch_dataset().await?;
        assert_eq!(dataset.records().first().map(|r| r.year), Some(2000));
        Ok(())
    }
}
