//! Catalog sources.
//!
//! The picker never fetches data itself; its owner hands it a catalog. This
//! module provides the two ways the binary gets one:
//! - the sample catalog compiled into the binary
//! - a JSON file in the dataset shape
//!
//! Both accept either the wrapped document (`{"mobileCodeList": {...}}`)
//! or the bare `{"hotList": [...], "list": [...]}` object.

use crate::model::{CatalogError, CountryCatalog};
use std::path::PathBuf;
use tracing::{info, warn};

pub mod file;

pub use file::load_catalog_file;

/// Key wrapping the catalog in the full dataset document.
pub const WRAPPER_KEY: &str = "mobileCodeList";

/// Origin label used in errors for the compiled-in catalog.
pub const BUNDLED_ORIGIN: &str = "<bundled>";

const BUNDLED_JSON: &str = include_str!("../../data/countries.sample.json");

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Sample catalog compiled into the binary.
    Bundled,
    /// JSON file on disk.
    File(PathBuf),
}

impl CatalogSource {
    /// File source when a path is given, bundled otherwise.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(CatalogSource::Bundled, CatalogSource::File)
    }

    /// Load the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file is missing, unreadable or not a
    /// catalog document.
    pub fn load(&self) -> Result<CountryCatalog, CatalogError> {
        match self {
            CatalogSource::Bundled => bundled_catalog(),
            CatalogSource::File(path) => load_catalog_file(path),
        }
    }
}

/// The compiled-in sample catalog.
///
/// # Errors
///
/// Only if the bundled JSON is malformed.
pub fn bundled_catalog() -> Result<CountryCatalog, CatalogError> {
    parse_catalog(BUNDLED_JSON, BUNDLED_ORIGIN)
}

/// Parse a catalog document, wrapped or bare.
///
/// # Errors
///
/// Returns `CatalogError::Parse` naming `origin` on invalid JSON or shape.
pub fn parse_catalog(json: &str, origin: &str) -> Result<CountryCatalog, CatalogError> {
    let parse_error = |source| CatalogError::Parse {
        origin: origin.to_string(),
        source,
    };

    let mut document: serde_json::Value = serde_json::from_str(json).map_err(parse_error)?;
    if let Some(inner) = document.get_mut(WRAPPER_KEY).map(serde_json::Value::take) {
        document = inner;
    }
    let catalog: CountryCatalog = serde_json::from_value(document).map_err(parse_error)?;

    if catalog.is_empty() {
        warn!(origin, "catalog has no countries");
    }
    info!(
        origin,
        hot = catalog.hot_list().len(),
        full = catalog.full_list().len(),
        "catalog loaded"
    );
    Ok(catalog)
}
