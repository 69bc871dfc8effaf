//! Error types for the country picker.
//!
//! The picker core (matching and the selection store) never fails: unknown
//! values, empty catalogs and odd search input are all degraded states.
//! Errors only exist at the boundaries, where data or configuration enters
//! the program and where the terminal is driven.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary
//!   - [`CatalogError`] - Catalog file reading/parsing failures
//!   - [`crate::config::ConfigError`] - Config file failures
//!   - [`crate::logging::LoggingError`] - Tracing setup failures
//!   - [`crate::view::TuiError`] - Terminal failures

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// All boundary errors convert into `AppError` via `From`, so `main`
/// can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog could not be loaded.
    #[error("Failed to load country catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The terminal front end failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] crate::view::TuiError),
}

/// Errors while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("Catalog file not found: {path:?}")]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The catalog file could not be read.
    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or does not match the dataset shape.
    #[error("Invalid catalog JSON in {origin}: {source}")]
    Parse {
        /// File path or `"<bundled>"`.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_converts_into_app_error() {
        let err = CatalogError::NotFound {
            path: PathBuf::from("/missing.json"),
        };
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Catalog(CatalogError::NotFound { .. })));
        assert!(app.to_string().contains("missing.json"));
    }

    #[test]
    fn parse_error_names_origin() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CatalogError::Parse {
            origin: "<bundled>".to_string(),
            source,
        };
        assert!(err.to_string().contains("<bundled>"));
    }
}
