use super::ports::CountryCatalog;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryModel {
    pub iso_code: String,
    pub country_name: String,
    pub calling_code: String,
}

impl CountryModel {
    pub fn new(
        iso_code: impl Into<String>,
        country_name: impl Into<String>,
        calling_code: impl Into<String>,
    ) -> Self {
        Self {
            iso_code: iso_code.into(),
            country_name: country_name.into(),
            calling_code: calling_code.into(),
        }
    }

    /// Compact label used next to the phone number input, e.g. `PT +351`.
    pub fn to_short_string(&self) -> String {
        format!("{} {}", self.iso_code, self.calling_code)
    }
}

struct CountryInfo {
    iso_code: &'static str,
    calling_code: &'static str,
    /// Display names keyed by language, English first.
    names: &'static [(&'static str, &'static str)],
}

const COUNTRIES: &[CountryInfo] = &[
    CountryInfo {
        iso_code: "BR",
        calling_code: "+55",
        names: &[("en", "Brazil"), ("pt", "Brasil"), ("es", "Brasil"), ("nl", "Brazilië")],
    },
    CountryInfo {
        iso_code: "DE",
        calling_code: "+49",
        names: &[("en", "Germany"), ("pt", "Alemanha"), ("es", "Alemania"), ("nl", "Duitsland")],
    },
    CountryInfo {
        iso_code: "ES",
        calling_code: "+34",
        names: &[("en", "Spain"), ("pt", "Espanha"), ("es", "España"), ("nl", "Spanje")],
    },
    CountryInfo {
        iso_code: "FR",
        calling_code: "+33",
        names: &[("en", "France"), ("pt", "França"), ("es", "Francia"), ("nl", "Frankrijk")],
    },
    CountryInfo {
        iso_code: "GB",
        calling_code: "+44",
        names: &[
            ("en", "United Kingdom"),
            ("pt", "Reino Unido"),
            ("es", "Reino Unido"),
            ("nl", "Verenigd Koninkrijk"),
        ],
    },
    CountryInfo {
        iso_code: "NL",
        calling_code: "+31",
        names: &[("en", "Netherlands"), ("pt", "Países Baixos"), ("es", "Países Bajos"), ("nl", "Nederland")],
    },
    CountryInfo {
        iso_code: "PL",
        calling_code: "+48",
        names: &[("en", "Poland"), ("pt", "Polónia"), ("es", "Polonia"), ("nl", "Polen")],
    },
    CountryInfo {
        iso_code: "PT",
        calling_code: "+351",
        names: &[("en", "Portugal"), ("pt", "Portugal"), ("es", "Portugal"), ("nl", "Portugal")],
    },
    CountryInfo {
        iso_code: "US",
        calling_code: "+1",
        names: &[
            ("en", "United States"),
            ("pt", "Estados Unidos"),
            ("es", "Estados Unidos"),
            ("nl", "Verenigde Staten"),
        ],
    },
];

/// Built-in country table with calling codes and a few localized names.
///
/// Unknown languages fall back to English names.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCountryCatalog;

impl StaticCountryCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl CountryCatalog for StaticCountryCatalog {
    fn localized_countries(&self, language: &str, allowed: Option<&[&str]>) -> Vec<CountryModel> {
        let mut countries: Vec<CountryModel> = COUNTRIES
            .iter()
            .filter(|info| allowed.is_none_or(|codes| codes.contains(&info.iso_code)))
            .map(|info| {
                let name = info
                    .names
                    .iter()
                    .find(|(lang, _)| lang.eq_ignore_ascii_case(language))
                    .or_else(|| info.names.first())
                    .map(|(_, name)| *name)
                    .unwrap_or(info.iso_code);
                CountryModel::new(info.iso_code, name, info.calling_code)
            })
            .collect();
        countries.sort_by(|a, b| a.country_name.cmp(&b.country_name));
        countries
    }
}
