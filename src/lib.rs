pub mod cli;
pub mod core;
pub mod providers;

pub use crate::core::config;

use crate::core::CpiProvider;
use crate::core::cache::TtlCache;
use crate::core::config::{AppConfig, CpiSourceConfig};
use anyhow::Result;
use providers::exchange_rate::ExchangeRateProvider;
use providers::file_cpi::FileCpiProvider;
use providers::http_cpi::HttpCpiProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a single purchasing-power calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateArgs {
    pub amount: f64,
    pub from: i32,
    /// Defaults to the latest year with data for the country.
    pub to: Option<i32>,
    /// Defaults to the configured country.
    pub country: Option<String>,
    /// Currency to additionally express the result in.
    pub convert_to: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Calculate(CalculateArgs),
    Range { country: Option<String> },
    Countries,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("infl starting...");

    match command {
        AppCommand::Countries => {
            cli::countries::run();
            Ok(())
        }
        AppCommand::Calculate(args) => {
            let config = load_config(config_path)?;
            let cpi_provider = build_cpi_provider(&config);
            let rate_cache = Arc::new(TtlCache::new(config.cache_ttl()));
            let currency_provider =
                ExchangeRateProvider::new(&config.providers.exchange.base_url, rate_cache);
            cli::calculate::run(
                &args,
                cpi_provider.as_ref(),
                &currency_provider,
                &config.default_country,
            )
            .await
        }
        AppCommand::Range { country } => {
            let config = load_config(config_path)?;
            let cpi_provider = build_cpi_provider(&config);
            cli::range::run(country.as_deref(), cpi_provider.as_ref()).await
        }
    }
}

fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

fn build_cpi_provider(config: &AppConfig) -> Box<dyn CpiProvider> {
    match &config.providers.cpi {
        CpiSourceConfig::Url { url } => {
            let dataset_cache = Arc::new(TtlCache::new(config.cache_ttl()));
            Box::new(HttpCpiProvider::new(url, dataset_cache))
        }
        CpiSourceConfig::File { path } => Box::new(FileCpiProvider::new(path.clone())),
    }
}
