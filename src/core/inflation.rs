//! Converts money between years of a single country's CPI series.
//!
//! Every function here is pure and works on the snapshot it is handed. Missing
//! data is reported through `Option`, while contract violations (bad caller
//! input, zero CPI divisors) surface as [`InflationError`].
use crate::core::dataset::CpiDataset;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InflationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid CPI values: start {cpi_start}, end {cpi_end}")]
    InvalidCpi { cpi_start: f64, cpi_end: f64 },
}

/// Span of years for which a country reports CPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryDateRange {
    pub start_year: i32,
    pub end_year: i32,
    pub data_point_count: usize,
}

/// Outcome of checking a user's year selection against a country's coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSelection {
    Valid,
    Rejected(String),
}

impl YearSelection {
    pub fn is_valid(&self) -> bool {
        matches!(self, YearSelection::Valid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyValue {
    pub year: i32,
    pub value: f64,
}

/// The amount restated between two years, with descriptive statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InflationCalculation {
    pub original_amount: f64,
    pub original_year: i32,
    pub target_year: i32,
    pub adjusted_value: f64,
    pub average_inflation: f64,
    pub purchasing_power_change: f64,
    pub is_deflation: bool,
    pub yearly_values: Vec<YearlyValue>,
}

pub fn lookup_cpi(dataset: &CpiDataset, country: &str, year: i32) -> Option<f64> {
    let cpi = dataset.record(year).and_then(|record| record.get(country));
    if cpi.is_none() {
        debug!("No CPI for {country} in {year}");
    }
    cpi
}

pub fn country_date_range(dataset: &CpiDataset, country: &str) -> Option<CountryDateRange> {
    let mut years: Vec<i32> = dataset
        .records()
        .iter()
        .filter(|record| record.get(country).is_some())
        .map(|record| record.year)
        .collect();
    years.sort_unstable();

    match (years.first(), years.last()) {
        (Some(&start_year), Some(&end_year)) => Some(CountryDateRange {
            start_year,
            end_year,
            data_point_count: years.len(),
        }),
        _ => {
            debug!("No CPI data available for {country}");
            None
        }
    }
}

pub fn calculate_adjusted_value(
    amount: f64,
    cpi_start: f64,
    cpi_end: f64,
) -> Result<f64, InflationError> {
    ensure_nonzero(cpi_start, cpi_end)?;
    Ok(amount * (cpi_end / cpi_start))
}

/// Annualized compound rate, in percent, that takes `cpi_start` to `cpi_end`
/// over `year_span` years. A zero span yields `0.0`.
pub fn calculate_average_inflation(
    cpi_start: f64,
    cpi_end: f64,
    year_span: f64,
) -> Result<f64, InflationError> {
    if year_span == 0.0 {
        return Ok(0.0);
    }
    ensure_nonzero(cpi_start, cpi_end)?;
    Ok(((cpi_end / cpi_start).powf(1.0 / year_span) - 1.0) * 100.0)
}

pub fn calculate_purchasing_power_change(
    cpi_start: f64,
    cpi_end: f64,
) -> Result<f64, InflationError> {
    if cpi_start == 0.0 {
        return Err(InflationError::InvalidCpi { cpi_start, cpi_end });
    }
    Ok(((cpi_end - cpi_start) / cpi_start) * 100.0)
}

/// Checks a year selection against a country's coverage, reporting only the
/// first rule that fails. Missing coverage always wins.
pub fn validate_year_selection(
    start_year: i32,
    end_year: i32,
    date_range: Option<&CountryDateRange>,
) -> YearSelection {
    let Some(range) = date_range else {
        return YearSelection::Rejected("No data available for the selected country".to_string());
    };
    if start_year < range.start_year {
        return YearSelection::Rejected(format!(
            "Start year cannot be before {}",
            range.start_year
        ));
    }
    if end_year > range.end_year {
        return YearSelection::Rejected(format!("End year cannot be after {}", range.end_year));
    }
    if start_year >= end_year {
        return YearSelection::Rejected("Start year must be before end year".to_string());
    }
    YearSelection::Valid
}

/// Restates `amount` from `start_year` money into `end_year` money for
/// `country`.
///
/// Returns `Ok(None)` when either endpoint year has no CPI for the country.
/// Trajectory points are all relative to the start year's CPI; years without
/// data are left out.
#[instrument(name = "CalculateInflation", skip(dataset), level = "debug")]
pub fn calculate_inflation(
    amount: f64,
    start_year: i32,
    end_year: i32,
    country: &str,
    dataset: &CpiDataset,
) -> Result<Option<InflationCalculation>, InflationError> {
    if start_year >= end_year {
        return Err(InflationError::InvalidInput(format!(
            "start year {start_year} must be before end year {end_year}"
        )));
    }
    if amount.is_nan() || amount <= 0.0 {
        return Err(InflationError::InvalidInput(format!(
            "amount must be positive, got {amount}"
        )));
    }

    let (Some(cpi_start), Some(cpi_end)) = (
        lookup_cpi(dataset, country, start_year),
        lookup_cpi(dataset, country, end_year),
    ) else {
        debug!("Insufficient CPI data for {country} between {start_year} and {end_year}");
        return Ok(None);
    };

    let adjusted_value = calculate_adjusted_value(amount, cpi_start, cpi_end)?;
    let year_span = f64::from(end_year) - f64::from(start_year);
    let average_inflation = calculate_average_inflation(cpi_start, cpi_end, year_span)?;
    let purchasing_power_change = calculate_purchasing_power_change(cpi_start, cpi_end)?;

    // Records are sorted by year, so the trajectory comes out in order
    let yearly_values = dataset
        .records()
        .iter()
        .filter(|record| (start_year..=end_year).contains(&record.year))
        .filter_map(|record| record.get(country).map(|cpi| (record.year, cpi)))
        .map(|(year, cpi)| {
            calculate_adjusted_value(amount, cpi_start, cpi)
                .map(|value| YearlyValue { year, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        adjusted_value,
        average_inflation,
        points = yearly_values.len(),
        "Calculated inflation"
    );

    Ok(Some(InflationCalculation {
        original_amount: amount,
        original_year: start_year,
        target_year: end_year,
        adjusted_value,
        average_inflation,
        purchasing_power_change,
        is_deflation: average_inflation < 0.0,
        yearly_values,
    }))
}

fn ensure_nonzero(cpi_start: f64, cpi_end: f64) -> Result<(), InflationError> {
    if cpi_start == 0.0 || cpi_end == 0.0 {
        return Err(InflationError::InvalidCpi { cpi_start, cpi_end });
    }
    Ok(())
}
