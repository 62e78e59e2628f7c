//! Supported countries and their display metadata

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Country {
    UnitedStates,
    UnitedKingdom,
    Germany,
    France,
    Japan,
    China,
    India,
    Brazil,
    Canada,
    Australia,
    Italy,
    Spain,
    SouthKorea,
    Mexico,
    Russia,
    SouthAfrica,
    Switzerland,
    Sweden,
    Turkey,
    Argentina,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryInfo {
    /// Key used for the country in CPI datasets (ISO 3166 alpha-3).
    pub code: &'static str,
    pub name: &'static str,
    pub currency_code: &'static str,
    pub currency_symbol: &'static str,
    pub flag: &'static str,
}

/// Rows are in variant declaration order.
static COUNTRY_TABLE: [(Country, CountryInfo); 20] = [
    (Country::UnitedStates, info("USA", "United States", "USD", "$", "🇺🇸")),
    (Country::UnitedKingdom, info("GBR", "United Kingdom", "GBP", "£", "🇬🇧")),
    (Country::Germany, info("DEU", "Germany", "EUR", "€", "🇩🇪")),
    (Country::France, info("FRA", "France", "EUR", "€", "🇫🇷")),
    (Country::Japan, info("JPN", "Japan", "JPY", "¥", "🇯🇵")),
    (Country::China, info("CHN", "China", "CNY", "¥", "🇨🇳")),
    (Country::India, info("IND", "India", "INR", "₹", "🇮🇳")),
    (Country::Brazil, info("BRA", "Brazil", "BRL", "R$", "🇧🇷")),
    (Country::Canada, info("CAN", "Canada", "CAD", "C$", "🇨🇦")),
    (Country::Australia, info("AUS", "Australia", "AUD", "A$", "🇦🇺")),
    (Country::Italy, info("ITA", "Italy", "EUR", "€", "🇮🇹")),
    (Country::Spain, info("ESP", "Spain", "EUR", "€", "🇪🇸")),
    (Country::SouthKorea, info("KOR", "South Korea", "KRW", "₩", "🇰🇷")),
    (Country::Mexico, info("MEX", "Mexico", "MXN", "MX$", "🇲🇽")),
    (Country::Russia, info("RUS", "Russia", "RUB", "₽", "🇷🇺")),
    (Country::SouthAfrica, info("ZAF", "South Africa", "ZAR", "R", "🇿🇦")),
    (Country::Switzerland, info("CHE", "Switzerland", "CHF", "CHF", "🇨🇭")),
    (Country::Sweden, info("SWE", "Sweden", "SEK", "kr", "🇸🇪")),
    (Country::Turkey, info("TUR", "Turkey", "TRY", "₺", "🇹🇷")),
    (Country::Argentina, info("ARG", "Argentina", "ARS", "AR$", "🇦🇷")),
];

const fn info(
    code: &'static str,
    name: &'static str,
    currency_code: &'static str,
    currency_symbol: &'static str,
    flag: &'static str,
) -> CountryInfo {
    CountryInfo {
        code,
        name,
        currency_code,
        currency_symbol,
        flag,
    }
}

impl Country {
    pub fn all() -> impl Iterator<Item = Country> {
        COUNTRY_TABLE.iter().map(|(country, _)| *country)
    }

    pub fn info(&self) -> &'static CountryInfo {
        &COUNTRY_TABLE[*self as usize].1
    }

    pub fn code(&self) -> &'static str {
        self.info().code
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Country {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Country::all()
            .find(|country| {
                let info = country.info();
                info.code.eq_ignore_ascii_case(needle) || info.name.eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown country: {}", s))
    }
}
