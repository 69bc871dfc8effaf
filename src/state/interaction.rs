//! Interaction handling (pure state transitions).
//!
//! Maps trigger, search box, list and pointer events onto store
//! transitions. Holds no state of its own: everything lives in the
//! [`SelectionStore`] passed in.

use crate::model::KeyAction;
use crate::state::placement::{calculate_placement, PlacementLimits, TriggerGeometry};
use crate::state::rows::{build_rows, DropdownRow, RowOrigin};
use crate::state::selection::SelectionStore;
use crate::state::timer::TimerToken;
use std::time::Instant;
use tracing::debug;

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The trigger button or input.
    Trigger,
    /// The clear-search affordance inside the search box.
    ClearSearch,
    /// Anywhere else inside the widget.
    Inside,
    /// Outside the widget boundary.
    Outside,
}

/// Whether the host should run its default press behaviour (focus change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressDisposition {
    /// Let the press act normally.
    Default,
    /// Keep focus where it is, so the follow-up click can still run.
    PreventDefault,
}

/// A clicked list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// Index into the hot list.
    Hot(usize),
    /// Position inside a group of the current grouped view.
    Listed {
        /// Group key.
        group: String,
        /// Index inside the group.
        index: usize,
    },
}

/// Result of a key action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action changed picker state.
    Handled,
    /// The action did not apply in the current state.
    Ignored,
}

impl ActionOutcome {
    fn from_bool(handled: bool) -> Self {
        if handled {
            ActionOutcome::Handled
        } else {
            ActionOutcome::Ignored
        }
    }
}

// ===== Trigger =====

/// Button trigger activation: toggles the dropdown.
///
/// Opening computes the placement once from the trigger geometry.
pub fn activate_trigger(
    store: &mut SelectionStore,
    geometry: TriggerGeometry,
    limits: PlacementLimits,
) -> bool {
    if store.is_disabled() {
        return false;
    }
    if store.is_open() {
        store.dismiss();
        true
    } else {
        store.open_with_placement(calculate_placement(geometry, limits))
    }
}

/// Input trigger focus: opens the dropdown, never closes it.
pub fn focus_trigger(
    store: &mut SelectionStore,
    geometry: TriggerGeometry,
    limits: PlacementLimits,
) -> bool {
    if store.is_open() {
        return false;
    }
    store.open_with_placement(calculate_placement(geometry, limits))
}

// ===== Keys =====

/// Apply a key action to the store.
///
/// - Commit: with a non-blank search, select the first match (which closes)
/// - Cancel: clear a non-blank search and stay open; on a blank search, close
/// - everything else is left to the caller
pub fn handle_action(store: &mut SelectionStore, action: KeyAction, now: Instant) -> ActionOutcome {
    if store.is_disabled() || !store.is_open() {
        return ActionOutcome::Ignored;
    }
    match action {
        KeyAction::Commit => ActionOutcome::from_bool(store.commit_first_match()),
        KeyAction::Cancel => {
            if store.search_text().is_empty() {
                store.dismiss();
            } else {
                store.clear_search(now);
            }
            ActionOutcome::Handled
        }
        _ => ActionOutcome::Ignored,
    }
}

/// Search box text changed.
pub fn handle_search_input(store: &mut SelectionStore, text: &str, now: Instant) {
    if store.is_disabled() {
        return;
    }
    store.type_text(text, now);
}

/// Search box lost focus: commit the first match after the grace delay,
/// unless a click selection gets there first.
pub fn handle_search_blur(store: &mut SelectionStore, now: Instant) -> Option<TimerToken> {
    if store.is_disabled() {
        return None;
    }
    let token = store.schedule_blur_commit(now);
    debug!(?token, "search blur");
    token
}

// ===== Pointer =====

/// Pointer pressed somewhere.
///
/// Outside presses only count while open: a non-blank search commits its
/// first match, then the dropdown closes. Presses on the clear affordance
/// suppress the default so the search box keeps focus.
pub fn handle_pointer_down(store: &mut SelectionStore, target: PointerTarget) -> PressDisposition {
    match target {
        PointerTarget::Outside if store.is_open() => {
            if store.has_search() {
                store.commit_first_match();
            }
            store.dismiss();
            PressDisposition::Default
        }
        PointerTarget::ClearSearch => PressDisposition::PreventDefault,
        _ => PressDisposition::Default,
    }
}

/// Click on the clear-search affordance.
pub fn handle_clear_click(store: &mut SelectionStore, now: Instant) {
    store.clear_search(now);
}

/// Whether outside presses are being watched.
pub fn watches_outside_clicks(store: &SelectionStore) -> bool {
    store.is_open()
}

// ===== List =====

/// Click on a hot-list or grouped-list item.
pub fn handle_item_click(store: &mut SelectionStore, item: &ListItem) -> bool {
    if store.is_disabled() {
        return false;
    }
    let country = match item {
        ListItem::Hot(index) => store.hot_list().get(*index).cloned(),
        ListItem::Listed { group, index } => store
            .grouped_view()
            .get(group)
            .and_then(|g| g.get(*index).copied())
            .cloned(),
    };
    match country {
        Some(country) => {
            store.select(Some(country));
            true
        }
        None => false,
    }
}

/// Click on (or Enter over) a row of [`build_rows`].
pub fn handle_row_activate(store: &mut SelectionStore, row_index: usize) -> bool {
    if store.is_disabled() {
        return false;
    }
    let country = build_rows(store)
        .get(row_index)
        .and_then(DropdownRow::as_country)
        .map(|row| row.country.clone());
    match country {
        Some(country) => {
            store.select(Some(country));
            true
        }
        None => false,
    }
}

/// Row to scroll to the top of the list: the selected country in the
/// grouped list, only while open.
pub fn scroll_target(store: &SelectionStore) -> Option<usize> {
    if !store.is_open() {
        return None;
    }
    build_rows(store).iter().position(|row| {
        row.as_country()
            .is_some_and(|r| r.is_selected && r.origin == RowOrigin::Listed)
    })
}

// ===== Tests =====

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
