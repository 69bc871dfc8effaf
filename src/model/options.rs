//! Picker modes and the options an owner configures a picker with.

use crate::model::Country;
use std::fmt;
use std::str::FromStr;

/// What the picker selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectorMode {
    /// Phone prefix selection, stores the dial code (`886`).
    #[default]
    DialCode,
    /// Nationality selection, stores the short name (`TW`).
    Nationality,
}

impl SelectorMode {
    /// The value a selected country is stored under in this mode.
    pub fn value_of<'a>(self, country: &'a Country) -> &'a str {
        match self {
            SelectorMode::DialCode => country.code(),
            SelectorMode::Nationality => country.short_name(),
        }
    }

    /// Text shown on the trigger for a selected country.
    pub fn trigger_text(self, country: &Country) -> String {
        match self {
            SelectorMode::DialCode => format!("+{}", country.code()),
            SelectorMode::Nationality => country.display_name(),
        }
    }

    /// Trigger text when nothing is selected.
    pub fn default_placeholder(self) -> &'static str {
        match self {
            SelectorMode::DialCode => "Select dial code",
            SelectorMode::Nationality => "Select nationality",
        }
    }

    /// Search box text when the search is empty.
    pub fn default_search_placeholder(self) -> &'static str {
        match self {
            SelectorMode::DialCode => "Search country / dial code",
            SelectorMode::Nationality => "Search country",
        }
    }

    /// Canonical spelling, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectorMode::DialCode => "dial-code",
            SelectorMode::Nationality => "nationality",
        }
    }
}

impl fmt::Display for SelectorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised mode strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown selector mode {0:?} (expected \"dial-code\" or \"nationality\")")]
pub struct InvalidMode(pub String);

impl FromStr for SelectorMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dial-code" | "dialcode" | "dial_code" => Ok(SelectorMode::DialCode),
            "nationality" => Ok(SelectorMode::Nationality),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}

/// Everything an owner can configure on a picker.
///
/// `value` makes the picker controlled; `default_value` only seeds an
/// uncontrolled picker. `is_loading`, when set, overrides the internal
/// search debounce flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerOptions {
    /// What the picker selects.
    pub mode: SelectorMode,
    /// Owner-held value; makes the picker controlled.
    pub value: Option<String>,
    /// Initial value of an uncontrolled picker.
    pub default_value: Option<String>,
    /// Label shown above the trigger.
    pub label: Option<String>,
    /// Hidden form field name.
    pub field_name: Option<String>,
    /// Show the required marker.
    pub required: bool,
    /// Disabled pickers never open.
    pub disabled: bool,
    /// Owner loading flag; overrides the search debounce.
    pub is_loading: Option<bool>,
    /// Trigger placeholder override.
    pub placeholder_text: Option<String>,
    /// Search box placeholder override.
    pub search_placeholder_text: Option<String>,
    /// Hint shown above the search box.
    pub hint_text: Option<String>,
}

impl PickerOptions {
    /// Options for `mode` with everything else unset.
    pub fn new(mode: SelectorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Make the picker controlled by `value`.
    pub fn controlled(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Seed an uncontrolled picker.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the hidden form field name.
    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_both_spellings() {
        assert_eq!("dial-code".parse(), Ok(SelectorMode::DialCode));
        assert_eq!("dialCode".parse(), Ok(SelectorMode::DialCode));
        assert_eq!(" Nationality ".parse(), Ok(SelectorMode::Nationality));
        assert!("passport".parse::<SelectorMode>().is_err());
    }

    #[test]
    fn value_of_follows_mode() {
        let tw = Country::new(1, "台灣", "Taiwan", "TW", "886");
        assert_eq!(SelectorMode::DialCode.value_of(&tw), "886");
        assert_eq!(SelectorMode::Nationality.value_of(&tw), "TW");
    }

    #[test]
    fn trigger_text_follows_mode() {
        let tw = Country::new(1, "台灣", "Taiwan", "TW", "886");
        assert_eq!(SelectorMode::DialCode.trigger_text(&tw), "+886");
        assert_eq!(
            SelectorMode::Nationality.trigger_text(&tw),
            "台灣 Taiwan (TW)"
        );
    }
}
