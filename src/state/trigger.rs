//! Input-style trigger binding.
//!
//! The input trigger doubles as the search field: it shows the trigger text
//! until the user starts typing, then shows the search text.

use crate::state::interaction::{focus_trigger, handle_search_blur, handle_search_input};
use crate::state::placement::{PlacementLimits, TriggerGeometry};
use crate::state::search_box::TextSurface;
use crate::state::selection::SelectionStore;
use crate::state::timer::TimerToken;
use crossterm::event::KeyEvent;
use std::time::Instant;

/// Text the input trigger should display.
///
/// Search text while open with a non-blank search, otherwise the trigger
/// text (selected country or placeholder).
pub fn display_value(store: &SelectionStore) -> String {
    if store.is_open() && store.has_search() {
        store.search_text().to_string()
    } else {
        store.trigger_text()
    }
}

/// Push the display value into the surface.
pub fn sync_surface<S: TextSurface>(store: &SelectionStore, surface: &mut S) {
    let value = display_value(store);
    surface.set_text(&value);
}

/// Focus opens the dropdown and refreshes the surface.
pub fn on_focus<S: TextSurface>(
    store: &mut SelectionStore,
    surface: &mut S,
    geometry: TriggerGeometry,
    limits: PlacementLimits,
) -> bool {
    let opened = focus_trigger(store, geometry, limits);
    sync_surface(store, surface);
    opened
}

/// Forward an editing key. Returns true if the search text changed.
///
/// The first edit replaces the displayed trigger text instead of appending
/// to it.
pub fn on_edit<S: TextSurface>(
    store: &mut SelectionStore,
    surface: &mut S,
    key: KeyEvent,
    now: Instant,
) -> bool {
    if store.is_disabled() || !store.is_open() {
        return false;
    }
    if !store.has_search() && surface.text() == store.trigger_text() {
        surface.set_text("");
    }
    let before = store.search_text().to_string();
    surface.apply_edit(key);
    let text = surface.text().to_string();
    if text == before {
        sync_surface(store, surface);
        return false;
    }
    handle_search_input(store, &text, now);
    sync_surface(store, surface);
    true
}

/// Blur schedules the grace commit and refreshes the surface.
pub fn on_blur<S: TextSurface>(
    store: &mut SelectionStore,
    surface: &mut S,
    now: Instant,
) -> Option<TimerToken> {
    let token = handle_search_blur(store, now);
    sync_surface(store, surface);
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Country, CountryCatalog, PickerOptions, SelectorMode};
    use crate::state::search_box::SearchBox;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)
    }

    fn store(options: PickerOptions) -> SelectionStore {
        SelectionStore::new(
            options,
            CountryCatalog::new(
                vec![],
                vec![
                    Country::new(1, "台灣", "Taiwan", "TW", "886"),
                    Country::new(2, "日本", "Japan", "JP", "81"),
                ],
            ),
        )
    }

    fn focused(options: PickerOptions) -> (SelectionStore, SearchBox) {
        let mut store = store(options);
        let mut surface = SearchBox::new();
        on_focus(
            &mut store,
            &mut surface,
            TriggerGeometry::new(0, 1, 24),
            PlacementLimits::TERMINAL,
        );
        (store, surface)
    }

    #[test]
    fn shows_trigger_text_until_typing() {
        let (store, surface) =
            focused(PickerOptions::new(SelectorMode::DialCode).with_default_value("886"));
        assert!(store.is_open());
        assert_eq!(surface.text(), "+886");
    }

    #[test]
    fn first_keystroke_replaces_trigger_text() {
        let (mut store, mut surface) =
            focused(PickerOptions::new(SelectorMode::DialCode).with_default_value("886"));
        assert!(on_edit(&mut store, &mut surface, key('j'), Instant::now()));
        assert_eq!(store.search_text(), "j");
        assert_eq!(surface.text(), "j");
    }

    #[test]
    fn clearing_search_restores_trigger_text() {
        let (mut store, mut surface) = focused(PickerOptions::new(SelectorMode::Nationality));
        let now = Instant::now();
        on_edit(&mut store, &mut surface, key('j'), now);
        on_edit(
            &mut store,
            &mut surface,
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            now,
        );
        assert_eq!(store.search_text(), "");
        assert_eq!(surface.text(), "Select nationality");
    }

    #[test]
    fn edits_while_closed_are_ignored() {
        let mut store = store(PickerOptions::default());
        let mut surface = SearchBox::new();
        assert!(!on_edit(&mut store, &mut surface, key('x'), Instant::now()));
        assert_eq!(surface.text(), "");
    }

    #[test]
    fn blur_schedules_commit_and_keeps_text() {
        let (mut store, mut surface) = focused(PickerOptions::new(SelectorMode::DialCode));
        let now = Instant::now();
        on_edit(&mut store, &mut surface, key('j'), now);
        assert!(on_blur(&mut store, &mut surface, now).is_some());
        assert_eq!(surface.text(), "j");
    }
}
