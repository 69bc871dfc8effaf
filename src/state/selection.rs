//! Selection store: the picker's state machine.
//!
//! PickerPhase is a sum type with two states:
//! - Closed: dropdown hidden, no search text
//! - Open: dropdown visible with the current search text
//!
//! The selected country is never stored. It is resolved from the current
//! value against the current catalog every time it is asked for, so a
//! catalog swap or an external value change can never leave it stale.

use crate::matching::{filter_and_group, GroupedView};
use crate::model::{Country, CountryCatalog, PickerOptions, SelectorMode};
use crate::state::placement::Placement;
use crate::state::timer::{TimerKind, TimerQueue, TimerToken};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Receives every committed selection.
pub type ChangeCallback = Box<dyn FnMut(Option<&Country>)>;

// ===== PickerPhase =====

/// Open/closed state of the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PickerPhase {
    /// Dropdown hidden.
    #[default]
    Closed,
    /// Dropdown shown.
    Open {
        /// Raw search text, whitespace included.
        search_text: String,
    },
}

// ===== ValueBinding =====

/// Who owns the selected value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ValueBinding {
    /// Owner supplies the value; selections only reach the callback.
    Controlled(String),
    /// The store owns the value, seeded from `default_value`.
    Uncontrolled(Option<String>),
}

impl ValueBinding {
    fn value(&self) -> Option<&str> {
        match self {
            ValueBinding::Controlled(v) => Some(v.as_str()),
            ValueBinding::Uncontrolled(v) => v.as_deref(),
        }
    }
}

// ===== PickerTiming =====

/// Delays used by the store's scheduled tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerTiming {
    /// Quiet period after the last keystroke before loading clears.
    pub debounce: Duration,
    /// Delay between search blur and the blur commit.
    pub blur_grace: Duration,
}

impl Default for PickerTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            blur_grace: Duration::from_millis(200),
        }
    }
}

// ===== RenderFlags / FormValue =====

/// What the dropdown should show besides the grouped list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFlags {
    /// Hot list is shown (blank search).
    pub show_hot_list: bool,
    /// Letter headers are shown (blank search).
    pub show_group_headers: bool,
    /// Search is non-blank and matched nothing.
    pub show_no_result: bool,
}

/// Hidden form field carrying the resolved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValue {
    /// Field name.
    pub name: String,
    /// Code or short name, empty without a selection.
    pub value: String,
}

// ===== SelectionStore =====

/// State of one picker instance.
///
/// Constructed by the composing root and handed by reference to the
/// trigger, the dropdown and the interaction handlers.
pub struct SelectionStore {
    options: PickerOptions,
    catalog: CountryCatalog,
    binding: ValueBinding,
    phase: PickerPhase,
    external_loading: Option<bool>,
    debounce_loading: bool,
    placement: Placement,
    timers: TimerQueue,
    timing: PickerTiming,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("mode", &self.options.mode)
            .field("binding", &self.binding)
            .field("phase", &self.phase)
            .field("external_loading", &self.external_loading)
            .field("debounce_loading", &self.debounce_loading)
            .field("placement", &self.placement)
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    /// Create a closed store. `options.value` makes it controlled.
    pub fn new(options: PickerOptions, catalog: CountryCatalog) -> Self {
        let binding = match &options.value {
            Some(value) => ValueBinding::Controlled(value.clone()),
            None => ValueBinding::Uncontrolled(options.default_value.clone()),
        };
        let store = Self {
            external_loading: options.is_loading,
            options,
            catalog,
            binding,
            phase: PickerPhase::Closed,
            debounce_loading: false,
            placement: Placement::default(),
            timers: TimerQueue::new(),
            timing: PickerTiming::default(),
            on_change: None,
        };
        store.warn_if_unresolved();
        store
    }

    /// Replace the default delays.
    pub fn with_timing(mut self, timing: PickerTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Builder form of [`Self::set_change_callback`].
    pub fn with_change_callback(mut self, callback: impl FnMut(Option<&Country>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Called after every commit, with `None` for a cleared selection.
    pub fn set_change_callback(&mut self, callback: impl FnMut(Option<&Country>) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    // ===== Queries =====

    /// Options the store was built with.
    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    /// Dial code or nationality.
    pub fn mode(&self) -> SelectorMode {
        self.options.mode
    }

    /// Current delays.
    pub fn timing(&self) -> PickerTiming {
        self.timing
    }

    /// Whether the owner holds the value.
    pub fn is_controlled(&self) -> bool {
        matches!(self.binding, ValueBinding::Controlled(_))
    }

    /// Whether interaction is blocked.
    pub fn is_disabled(&self) -> bool {
        self.options.disabled
    }

    /// Open or closed, with the search text.
    pub fn phase(&self) -> &PickerPhase {
        &self.phase
    }

    /// Whether the dropdown is shown.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, PickerPhase::Open { .. })
    }

    /// Current search text; empty while closed.
    pub fn search_text(&self) -> &str {
        match &self.phase {
            PickerPhase::Open { search_text } => search_text,
            PickerPhase::Closed => "",
        }
    }

    /// Whether the search has non-whitespace text.
    pub fn has_search(&self) -> bool {
        !self.search_text().trim().is_empty()
    }

    /// External flag when supplied, otherwise the debounce flag.
    pub fn is_loading(&self) -> bool {
        self.external_loading.unwrap_or(self.debounce_loading)
    }

    /// Controlled value, else the internal one.
    pub fn resolved_value(&self) -> Option<&str> {
        self.binding.value()
    }

    /// Country the current value resolves to, if any.
    pub fn selected_country(&self) -> Option<&Country> {
        self.resolved_value().and_then(|v| self.catalog.resolve(v))
    }

    /// Current catalog.
    pub fn catalog(&self) -> &CountryCatalog {
        &self.catalog
    }

    /// Hot list of the current catalog.
    pub fn hot_list(&self) -> &[Country] {
        self.catalog.hot_list()
    }

    /// Full list filtered by the current search text.
    pub fn grouped_view(&self) -> GroupedView<'_> {
        filter_and_group(self.catalog.full_list(), self.search_text())
    }

    /// What the dropdown shows besides the list.
    pub fn render_flags(&self) -> RenderFlags {
        let searching = self.has_search();
        RenderFlags {
            show_hot_list: !searching,
            show_group_headers: !searching,
            show_no_result: searching && self.grouped_view().is_empty(),
        }
    }

    /// Selected country's trigger text, else the placeholder.
    pub fn trigger_text(&self) -> String {
        match self.selected_country() {
            Some(country) => self.mode().trigger_text(country),
            None => self.placeholder_text().to_string(),
        }
    }

    /// Trigger placeholder: the override, else the mode default.
    pub fn placeholder_text(&self) -> &str {
        self.options
            .placeholder_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.mode().default_placeholder())
    }

    /// Search placeholder: the override, else the mode default.
    pub fn search_placeholder(&self) -> &str {
        self.options
            .search_placeholder_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.mode().default_search_placeholder())
    }

    /// Hint text, if non-empty.
    pub fn hint_text(&self) -> Option<&str> {
        self.options.hint_text.as_deref().filter(|s| !s.is_empty())
    }

    /// Label, if any.
    pub fn label(&self) -> Option<&str> {
        self.options.label.as_deref()
    }

    /// Whether the required marker is shown.
    pub fn is_required(&self) -> bool {
        self.options.required
    }

    /// Hidden form value, present when a field name is configured.
    pub fn form_value(&self) -> Option<FormValue> {
        let name = self.options.field_name.as_ref()?;
        let value = self
            .selected_country()
            .map(|c| self.mode().value_of(c).to_string())
            .unwrap_or_default();
        Some(FormValue {
            name: name.clone(),
            value,
        })
    }

    /// Placement computed for the current (or last) open.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// When the next scheduled task is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether a task of `kind` is waiting.
    pub fn is_timer_pending(&self, kind: TimerKind) -> bool {
        self.timers.is_pending(kind)
    }

    // ===== Transitions =====

    /// Closed → Open("") with the previous placement. No-op when disabled or
    /// already open.
    pub fn open(&mut self) -> bool {
        self.open_with_placement(self.placement)
    }

    /// Closed → Open("") with a freshly computed placement.
    pub fn open_with_placement(&mut self, placement: Placement) -> bool {
        if self.options.disabled || self.is_open() {
            return false;
        }
        self.placement = placement;
        self.phase = PickerPhase::Open {
            search_text: String::new(),
        };
        debug!(?placement, "picker opened");
        true
    }

    /// Replace the search text. No-op while closed.
    ///
    /// Any pending blur commit is cancelled. Without an external loading
    /// flag, non-blank text sets loading until `debounce` passes without
    /// another keystroke; blank text clears it at once.
    pub fn type_text(&mut self, text: impl Into<String>, now: Instant) {
        let PickerPhase::Open { search_text } = &mut self.phase else {
            return;
        };
        *search_text = text.into();
        let blank = search_text.trim().is_empty();
        debug!(search = %search_text, "search text changed");

        self.timers.cancel(TimerKind::BlurCommit);
        if blank {
            self.debounce_loading = false;
            self.timers.cancel(TimerKind::LoadingQuiet);
        } else if self.external_loading.is_none() {
            self.debounce_loading = true;
            self.timers
                .schedule(TimerKind::LoadingQuiet, now, self.timing.debounce);
        }
    }

    /// Clear the search text, keeping the dropdown open.
    pub fn clear_search(&mut self, now: Instant) {
        self.type_text(String::new(), now);
    }

    /// Commit a selection and close.
    ///
    /// Uncontrolled stores take the country's value for the current mode;
    /// controlled stores keep the owner's value. The callback fires either way.
    pub fn select(&mut self, country: Option<Country>) {
        if let Some(country) = &country {
            if let ValueBinding::Uncontrolled(value) = &mut self.binding {
                *value = Some(self.options.mode.value_of(country).to_string());
            }
            info!(
                id = %country.id(),
                short_name = country.short_name(),
                controlled = self.is_controlled(),
                "country selected"
            );
        } else {
            info!("selection cleared");
        }

        self.close();
        if let Some(callback) = self.on_change.as_mut() {
            callback(country.as_ref());
        }
    }

    /// Select the first visible match of a non-blank search.
    ///
    /// Returns whether a selection was committed.
    pub fn commit_first_match(&mut self) -> bool {
        if !self.has_search() {
            return false;
        }
        let first = self.grouped_view().first().cloned();
        match first {
            Some(country) => {
                self.select(Some(country));
                true
            }
            None => {
                debug!(search = %self.search_text(), "no match to commit");
                false
            }
        }
    }

    /// Close without selecting.
    pub fn dismiss(&mut self) {
        if self.is_open() {
            debug!("picker dismissed");
        }
        self.close();
    }

    fn close(&mut self) {
        self.phase = PickerPhase::Closed;
        self.debounce_loading = false;
        self.timers.cancel_all();
    }

    // ===== Owner updates =====

    /// Owner-supplied value; makes the store controlled.
    pub fn set_controlled_value(&mut self, value: impl Into<String>) {
        self.binding = ValueBinding::Controlled(value.into());
        self.warn_if_unresolved();
    }

    /// Swap the catalog. Views and the selected country follow immediately.
    pub fn set_catalog(&mut self, catalog: CountryCatalog) {
        info!(
            hot = catalog.hot_list().len(),
            full = catalog.full_list().len(),
            "catalog replaced"
        );
        self.catalog = catalog;
        self.warn_if_unresolved();
    }

    /// Owner-supplied loading flag; `None` falls back to the debounce flag.
    pub fn set_external_loading(&mut self, loading: Option<bool>) {
        self.external_loading = loading;
    }

    /// Disabling also closes the dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
        if disabled {
            self.dismiss();
        }
    }

    fn warn_if_unresolved(&self) {
        if self.catalog.is_empty() {
            return;
        }
        if let Some(value) = self.resolved_value().filter(|v| !v.is_empty()) {
            if self.selected_country().is_none() {
                warn!(value, "value does not resolve to any country");
            }
        }
    }

    // ===== Scheduled tasks =====

    /// Schedule the blur commit. Nothing is scheduled while closed.
    pub fn schedule_blur_commit(&mut self, now: Instant) -> Option<TimerToken> {
        if !self.is_open() {
            return None;
        }
        Some(
            self.timers
                .schedule(TimerKind::BlurCommit, now, self.timing.blur_grace),
        )
    }

    /// Drop a pending blur commit.
    pub fn cancel_blur_commit(&mut self) {
        self.timers.cancel(TimerKind::BlurCommit);
    }

    /// Run the task `token` refers to. Stale tokens are ignored.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if !self.timers.claim(token) {
            debug!(?token, "stale timer ignored");
            return false;
        }
        match token.kind() {
            TimerKind::LoadingQuiet => {
                self.debounce_loading = false;
            }
            TimerKind::BlurCommit => {
                self.commit_first_match();
            }
        }
        true
    }

    /// Fire every task due at `now`. Returns how many ran.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.timers
            .due(now)
            .into_iter()
            .filter(|token| self.fire(*token))
            .count()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
