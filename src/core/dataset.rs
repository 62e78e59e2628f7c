//! Year-indexed CPI data as supplied by the data providers

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("Duplicate CPI record for year {0}")]
    DuplicateYear(i32),
}

/// CPI values for every country reporting in a single year.
///
/// On the wire a record is a flat object: `{"year": 2000, "USA": 172.2, ...}`.
/// Fields that are not JSON numbers are dropped, so a country whose value is
/// `null` or a string is treated as not reporting that year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCpiRecord")]
pub struct CpiRecord {
    pub year: i32,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct RawCpiRecord {
    year: i32,
    #[serde(flatten)]
    fields: HashMap<String, serde_json::Value>,
}

impl From<RawCpiRecord> for CpiRecord {
    fn from(raw: RawCpiRecord) -> Self {
        let values = raw
            .fields
            .into_iter()
            .filter_map(|(country, value)| value.as_f64().map(|cpi| (country, cpi)))
            .collect();
        CpiRecord {
            year: raw.year,
            values,
        }
    }
}

impl CpiRecord {
    pub fn new(year: i32, values: impl IntoIterator<Item = (impl Into<String>, f64)>) -> Self {
        CpiRecord {
            year,
            values: values
                .into_iter()
                .map(|(country, cpi)| (country.into(), cpi))
                .collect(),
        }
    }

    pub fn get(&self, country: &str) -> Option<f64> {
        self.values.get(country).copied()
    }
}

/// An immutable snapshot of CPI records, ordered by ascending year with at
/// most one record per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CpiDataset {
    records: Vec<CpiRecord>,
}

impl CpiDataset {
    pub fn new(mut records: Vec<CpiRecord>) -> Result<Self, DatasetError> {
        records.sort_by_key(|r| r.year);
        if let Some(pair) = records.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(DatasetError::DuplicateYear(pair[0].year));
        }
        Ok(CpiDataset { records })
    }

    /// Parses the JSON array form published by the data providers.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let records: Vec<CpiRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records)?)
    }

    pub fn records(&self) -> &[CpiRecord] {
        &self.records
    }

    pub fn record(&self, year: i32) -> Option<&CpiRecord> {
        self.records
            .binary_search_by_key(&year, |r| r.year)
            .ok()
            .map(|index| &self.records[index])
    }

    /// Every country identifier that reports at least once.
    pub fn countries(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .flat_map(|r| r.values.keys().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization_drops_non_numeric_values() {
        let json = r#"{"year": 2001, "USA": 177.1, "GBR": null, "DEU": "n/a", "JPN": 0}"#;
        let record: CpiRecord = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(record.year, 2001);
        assert_eq!(record.get("USA"), Some(177.1));
        assert_eq!(record.get("JPN"), Some(0.0));
        assert!(record.get("GBR").is_none());
        assert!(record.get("DEU").is_none());
        assert_eq!(record.values.len(), 2);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = CpiRecord::new(1999, [("USA", 166.6)]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"year": 1999, "USA": 166.6}));
    }

    #[test]
    fn test_dataset_sorts_records_by_year() {
        let dataset = CpiDataset::new(vec![
            CpiRecord::new(2003, [("USA", 184.0)]),
            CpiRecord::new(2000, [("USA", 172.2)]),
            CpiRecord::new(2001, [("GBR", 93.1)]),
        ])
        .unwrap();

        let years: Vec<i32> = dataset.records().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001, 2003]);
        assert_eq!(dataset.record(2001).and_then(|r| r.get("GBR")), Some(93.1));
        assert!(dataset.record(2002).is_none());
        assert_eq!(
            dataset.countries().into_iter().collect::<Vec<_>>(),
            vec!["GBR", "USA"]
        );
    }

    #[test]
    fn test_dataset_from_json() {
        let json = r#"[
            {"year": 2001, "USA": 177.1},
            {"year": 2000, "USA": 172.2, "GBR": 93.1}
        ]"#;
        let dataset = CpiDataset::from_json(json).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].year, 2000);

        let err = CpiDataset::from_json(r#"[{"year": 2000}, {"year": 2000}]"#).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate CPI record for year 2000");
        assert!(CpiDataset::from_json(r#"{"year": 2000}"#).is_err());
    }

    #[test]
    fn test_dataset_rejects_duplicate_years() {
        let result = CpiDataset::new(vec![
            CpiRecord::new(2000, [("USA", 172.2)]),
            CpiRecord::new(2000, [("GBR", 93.1)]),
        ]);
        assert_eq!(result, Err(DatasetError::DuplicateYear(2000)));
    }
}
