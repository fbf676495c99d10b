//! Default country for a detected language.
//!
//! Detection only yields a language tag. Callers that need a full locale
//! (e.g. `de_DE` rather than `de_CH`) look up the most common country here.
//! This table is application data; the detector never consults it.

const DEFAULT_COUNTRIES: &[(&str, &str)] = &[
    ("ar", "AE"),
    ("bg", "BG"),
    ("de", "DE"),
    ("en", "US"),
    ("es", "ES"),
    ("fi", "FI"),
    ("fr", "FR"),
    ("hr", "HR"),
    ("hu", "HU"),
    ("is", "IS"),
    ("it", "IT"),
    ("jp", "JP"),
    ("lt", "LT"),
    ("lv", "LV"),
    ("mk", "MK"),
    ("mt", "MT"),
    ("nl", "NL"),
    ("no", "NO"),
    ("pl", "PL"),
    ("pt", "PT"),
    ("ro", "RO"),
    ("ru", "RU"),
    ("sk", "SK"),
    ("th", "TH"),
    ("tr", "TR"),
];

/// Most common country for `language`, if known.
pub fn default_country(language: &str) -> Option<&'static str> {
    DEFAULT_COUNTRIES
        .binary_search_by(|(l, _)| (*l).cmp(language))
        .ok()
        .map(|i| DEFAULT_COUNTRIES[i].1)
}

/// `language_COUNTRY` when a default country exists, else the bare tag.
pub fn locale_tag(language: &str) -> String {
    match default_country(language) {
        Some(country) => format!("{}_{}", language, country),
        None => language.to_string(),
    }
}
