use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the CPI dataset comes from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum CpiSourceConfig {
    Url { url: String },
    File { path: PathBuf },
}

impl CpiSourceConfig {
    fn resolve_relative_to(&mut self, base: &Path) {
        if let CpiSourceConfig::File { path } = self
            && path.is_relative()
        {
            *path = base.join(&*path);
            debug!("Resolved CPI dataset path to {}", path.display());
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeProviderConfig {
    pub base_url: String,
}

impl Default for ExchangeProviderConfig {
    fn default() -> Self {
        ExchangeProviderConfig {
            base_url: "https://open.er-api.com/v6".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub cpi: CpiSourceConfig,
    #[serde(default)]
    pub exchange: ExchangeProviderConfig,
}

fn default_country() -> String {
    "USA".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    #[serde(default = "default_country")]
    pub default_country: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "infl", "infl")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    /// Loads the config at `path`. A relative CPI dataset path is taken
    /// relative to the directory holding the config file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        if let Some(config_dir) = path.as_ref().parent() {
            config.providers.cpi.resolve_relative_to(config_dir);
        }
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization_with_defaults() {
        let yaml_str = r#"
providers:
  cpi:
    url: "https://data.example.com/cpi.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.cpi,
            CpiSourceConfig::Url {
                url: "https://data.example.com/cpi.json".to_string()
            }
        );
        assert_eq!(
            config.providers.exchange.base_url,
            "https://open.er-api.com/v6"
        );
        assert_eq!(config.default_country, "USA");
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_config_deserialization_with_file_source() {
        let yaml_str = r#"
providers:
  cpi:
    path: "/var/data/cpi.json"
  exchange:
    base_url: "http://example.com/rates"
default_country: "JPN"
cache_ttl_secs: 60
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.cpi,
            CpiSourceConfig::File {
                path: PathBuf::from("/var/data/cpi.json")
            }
        );
        assert_eq!(config.providers.exchange.base_url, "http://example.com/rates");
        assert_eq!(config.default_country, "JPN");
        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_requires_cpi_source() {
        let yaml_str = r#"
default_country: "USA"
"#;
        let result: Result<AppConfig, _> = serde_yaml::from_str(yaml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_path_reports_file() {
        let err = AppConfig::load_from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_path_resolves_dataset_next_to_config() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "providers:\n  cpi:\n    path: \"data/cpi.json\"\n")?;

        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(
            config.providers.cpi,
            CpiSourceConfig::File {
                path: temp_dir.path().join("data/cpi.json")
            }
        );
        Ok(())
    }

    #[test]
    fn test_load_from_path_keeps_absolute_dataset_and_url() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");

        fs::write(&config_path, "providers:\n  cpi:\n    path: \"/var/data/cpi.json\"\n")?;
        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(
            config.providers.cpi,
            CpiSourceConfig::File {
                path: PathBuf::from("/var/data/cpi.json")
            }
        );

        fs::write(&config_path, "providers:\n  cpi:\n    url: \"cpi.json\"\n")?;
        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(
            config.providers.cpi,
            CpiSourceConfig::Url {
                url: "cpi.json".to_string()
            }
        );
        Ok(())
    }
}
