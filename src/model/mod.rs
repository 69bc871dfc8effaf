//! Domain model: countries, catalogs, picker options, key actions, errors.

pub mod country;
pub mod error;
pub mod key_action;
pub mod options;

pub use country::{Country, CountryCatalog, CountryId};
pub use error::{AppError, CatalogError};
pub use key_action::KeyAction;
pub use options::{InvalidMode, PickerOptions, SelectorMode};
