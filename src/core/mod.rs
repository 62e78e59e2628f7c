//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod country;
pub mod currency;
pub mod dataset;
pub mod inflation;
pub mod log;
pub mod provider;

// Re-export main types for cleaner imports
pub use country::Country;
pub use currency::CurrencyRateProvider;
pub use dataset::{CpiDataset, CpiRecord};
pub use inflation::{CountryDateRange, InflationCalculation, InflationError, YearSelection};
pub use provider::CpiProvider;
