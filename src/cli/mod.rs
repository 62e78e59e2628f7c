pub mod calculate;
pub mod countries;
pub mod range;
pub mod setup;
pub mod ui;

use crate::core::Country;

/// A country chosen on the command line.
///
/// Catalogue countries resolve by code or name; anything else is passed
/// through verbatim as a dataset key without display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCountry {
    pub key: String,
    pub country: Option<Country>,
}

impl SelectedCountry {
    pub fn resolve(input: &str) -> Self {
        match input.parse::<Country>() {
            Ok(country) => SelectedCountry {
                key: country.code().to_string(),
                country: Some(country),
            },
            Err(_) => SelectedCountry {
                key: input.trim().to_string(),
                country: None,
            },
        }
    }

    /// Wraps a key taken from the dataset itself. The key is kept verbatim;
    /// metadata is attached only when it is exactly a catalogue code.
    pub fn from_dataset_key(key: &str) -> Self {
        SelectedCountry {
            key: key.to_string(),
            country: Country::all().find(|country| country.code() == key),
        }
    }

    pub fn display_name(&self) -> String {
        match self.country {
            Some(country) => format!("{} {}", country.info().flag, country.name()),
            None => self.key.clone(),
        }
    }

    pub fn currency_code(&self) -> Option<&'static str> {
        self.country.map(|c| c.info().currency_code)
    }

    pub fn currency_symbol(&self) -> Option<&'static str> {
        self.country.map(|c| c.info().currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_catalogue_country() {
        let selected = SelectedCountry::resolve("japan");
        assert_eq!(selected.key, "JPN");
        assert_eq!(selected.country, Some(Country::Japan));
        assert_eq!(selected.currency_code(), Some("JPY"));
        assert!(selected.display_name().ends_with("Japan"));
    }

    #[test]
    fn test_resolve_unknown_country_passes_key_through() {
        let selected = SelectedCountry::resolve(" EA19 ");
        assert_eq!(selected.key, "EA19");
        assert!(selected.country.is_none());
        assert!(selected.currency_symbol().is_none());
        assert_eq!(selected.display_name(), "EA19");
    }

    #[test]
    fn test_dataset_key_is_kept_verbatim() {
        let selected = SelectedCountry::from_dataset_key("GBR");
        assert_eq!(selected.key, "GBR");
        assert_eq!(selected.country, Some(Country::UnitedKingdom));

        let selected = SelectedCountry::from_dataset_key("Japan");
        assert_eq!(selected.key, "Japan");
        assert!(selected.country.is_none());

        let selected = SelectedCountry::from_dataset_key("usa");
        assert_eq!(selected.key, "usa");
        assert!(selected.country.is_none());
    }
}
