//! Catalog loading from a JSON file.

use crate::model::{CatalogError, CountryCatalog};
use crate::source::parse_catalog;
use std::path::Path;

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if the file does not exist,
/// `CatalogError::Io` for other I/O errors and `CatalogError::Parse` if the
/// contents are not a catalog document.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<CountryCatalog, CatalogError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&contents, &path.display().to_string())
}
