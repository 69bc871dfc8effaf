//! Country records and the catalog they are delivered in.
//!
//! The catalog is owned by the caller. The picker only reads it and
//! re-derives every view from whatever catalog it currently holds.

use serde::Deserialize;
use std::fmt;

/// Stable identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct CountryId(u32);

impl CountryId {
    /// Wrap a raw dataset id.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw dataset id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single country as supplied by the catalog.
///
/// Field names on the wire follow the dataset contract
/// (`zhName`, `enName`, `shortName`, `firstLetter`, `code`, `id`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    zh_name: String,
    en_name: String,
    short_name: String,
    #[serde(default)]
    first_letter: String,
    code: String,
    id: CountryId,
}

impl Country {
    /// Build a country; the first letter is derived from the short name.
    pub fn new(
        id: u32,
        zh_name: impl Into<String>,
        en_name: impl Into<String>,
        short_name: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        let short_name = short_name.into();
        let first_letter = short_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        Self {
            zh_name: zh_name.into(),
            en_name: en_name.into(),
            short_name,
            first_letter,
            code: code.into(),
            id: CountryId::new(id),
        }
    }

    /// Override the precomputed first letter.
    pub fn with_first_letter(mut self, first_letter: impl Into<String>) -> Self {
        self.first_letter = first_letter.into();
        self
    }

    /// Chinese name (`台灣`).
    pub fn zh_name(&self) -> &str {
        &self.zh_name
    }

    /// English name (`Taiwan`).
    pub fn en_name(&self) -> &str {
        &self.en_name
    }

    /// ISO-like short code, e.g. `TW`.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// Index letter from the dataset.
    pub fn first_letter(&self) -> &str {
        &self.first_letter
    }

    /// Numeric dial code without the leading `+`, e.g. `886`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Dataset id.
    pub fn id(&self) -> CountryId {
        self.id
    }

    /// `{zhName} {enName} ({shortName})`
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.zh_name, self.en_name, self.short_name)
    }

    /// Whether `value` identifies this country by dial code or short name.
    pub fn is_identified_by(&self, value: &str) -> bool {
        self.code == value || self.short_name == value
    }
}

/// Hot list plus full list, as delivered by the owner of the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCatalog {
    #[serde(default)]
    hot_list: Vec<Country>,
    #[serde(default, rename = "list", alias = "fullList")]
    full_list: Vec<Country>,
}

impl CountryCatalog {
    /// Catalog from a hot list and a full list.
    pub fn new(hot_list: Vec<Country>, full_list: Vec<Country>) -> Self {
        Self {
            hot_list,
            full_list,
        }
    }

    /// Catalog with no countries, used while data is still loading.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Curated countries shown first.
    pub fn hot_list(&self) -> &[Country] {
        &self.hot_list
    }

    /// Every country, in dataset order.
    pub fn full_list(&self) -> &[Country] {
        &self.full_list
    }

    /// True when both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.hot_list.is_empty() && self.full_list.is_empty()
    }

    /// Hot list followed by full list.
    pub fn all(&self) -> impl Iterator<Item = &Country> {
        self.hot_list.iter().chain(self.full_list.iter())
    }

    /// Resolve a stored value (dial code or short name) against hot + full list.
    ///
    /// Empty values never resolve.
    pub fn resolve(&self, value: &str) -> Option<&Country> {
        if value.is_empty() {
            return None;
        }
        self.all().find(|c| c.is_identified_by(value))
    }
}
