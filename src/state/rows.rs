//! Flattened dropdown rows.
//!
//! The dropdown renders, hit-tests and scrolls one list of rows, built
//! fresh from the store for every frame.

use crate::model::Country;
use crate::state::selection::SelectionStore;

/// Title above the hot list.
pub const HOT_LIST_TITLE: &str = "Popular countries / regions";

/// Message shown when a search has no results.
pub const NO_RESULT_TEXT: &str = "Sorry, no matching results";

/// Upper bound on skeleton rows while loading.
const MAX_SKELETON_ROWS: usize = 10;

/// Skeleton row count when there is nothing to size it by.
const DEFAULT_SKELETON_ROWS: usize = 5;

/// Where a country row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrigin {
    /// Hot list entry.
    Hot,
    /// Entry of the grouped full list.
    Listed,
}

/// Placeholder bar width while loading, alternating long/short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonWidth {
    /// About 70% of the row.
    Long,
    /// About 40% of the row.
    Short,
}

/// A selectable country row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRow<'a> {
    /// The country shown.
    pub country: &'a Country,
    /// Which list the row belongs to.
    pub origin: RowOrigin,
    /// Whether this is the selected country.
    pub is_selected: bool,
}

/// One line of the dropdown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownRow<'a> {
    /// "Popular countries / regions" title.
    HotTitle,
    /// Letter heading of a group.
    GroupHeader(String),
    /// A selectable country.
    Country(CountryRow<'a>),
    /// Shown when a search matches nothing.
    NoResult,
    /// Placeholder bar while loading.
    Skeleton(SkeletonWidth),
}

impl<'a> DropdownRow<'a> {
    /// The country row, if this is one.
    pub fn as_country(&self) -> Option<&CountryRow<'a>> {
        match self {
            DropdownRow::Country(row) => Some(row),
            _ => None,
        }
    }

    /// Only country rows can be highlighted or clicked.
    pub fn is_selectable(&self) -> bool {
        self.as_country().is_some()
    }
}

/// Number of skeleton rows: visible result count bounded to `1..=10`,
/// five when there are no results to size by.
pub fn skeleton_row_count(visible_countries: usize) -> usize {
    let count = if visible_countries == 0 {
        DEFAULT_SKELETON_ROWS
    } else {
        visible_countries
    };
    count.clamp(1, MAX_SKELETON_ROWS)
}

/// Build the rows for the store's current state.
///
/// Loading shows only skeletons; an empty search result shows only the
/// no-result row; otherwise the hot list (when not searching) followed by
/// the grouped full list.
pub fn build_rows(store: &SelectionStore) -> Vec<DropdownRow<'_>> {
    let view = store.grouped_view();
    let flags = store.render_flags();

    if store.is_loading() {
        return (0..skeleton_row_count(view.country_count()))
            .map(|i| {
                DropdownRow::Skeleton(if i % 2 == 0 {
                    SkeletonWidth::Long
                } else {
                    SkeletonWidth::Short
                })
            })
            .collect();
    }

    if flags.show_no_result {
        return vec![DropdownRow::NoResult];
    }

    let selected_id = store.selected_country().map(Country::id);
    let is_selected = |c: &Country| Some(c.id()) == selected_id;
    let mut rows = Vec::new();

    if flags.show_hot_list && !store.hot_list().is_empty() {
        rows.push(DropdownRow::HotTitle);
        rows.extend(store.hot_list().iter().map(|country| {
            DropdownRow::Country(CountryRow {
                country,
                origin: RowOrigin::Hot,
                is_selected: is_selected(country),
            })
        }));
    }

    for (key, countries) in view.iter() {
        if flags.show_group_headers {
            rows.push(DropdownRow::GroupHeader(key.to_string()));
        }
        rows.extend(countries.iter().map(|&country| {
            DropdownRow::Country(CountryRow {
                country,
                origin: RowOrigin::Listed,
                is_selected: is_selected(country),
            })
        }));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CountryCatalog, PickerOptions, SelectorMode};
    use std::time::Instant;

    fn store(options: PickerOptions) -> SelectionStore {
        let catalog = CountryCatalog::new(
            vec![Country::new(1, "台灣", "Taiwan", "TW", "886")],
            vec![
                Country::new(2, "日本", "Japan", "JP", "81"),
                Country::new(1, "台灣", "Taiwan", "TW", "886"),
                Country::new(3, "泰國", "Thailand", "TH", "66"),
            ],
        );
        let mut store = SelectionStore::new(options, catalog);
        store.open();
        store
    }

    #[test]
    fn skeleton_count_is_bounded() {
        assert_eq!(skeleton_row_count(0), 5);
        assert_eq!(skeleton_row_count(3), 3);
        assert_eq!(skeleton_row_count(42), 10);
    }

    #[test]
    fn browse_rows_show_hot_list_then_groups() {
        let store = store(PickerOptions::default());
        let rows = build_rows(&store);
        let kinds: Vec<String> = rows
            .iter()
            .map(|r| match r {
                DropdownRow::HotTitle => "title".to_string(),
                DropdownRow::GroupHeader(k) => format!("[{k}]"),
                DropdownRow::Country(c) => c.country.short_name().to_string(),
                DropdownRow::NoResult => "none".to_string(),
                DropdownRow::Skeleton(_) => "skeleton".to_string(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["title", "TW", "[J]", "JP", "[T]", "TH", "TW"]
        );
    }

    #[test]
    fn search_rows_hide_hot_list_and_headers() {
        let mut store = store(PickerOptions::default());
        store.set_external_loading(Some(false));
        store.type_text("t", Instant::now());
        let rows = build_rows(&store);
        assert!(rows.iter().all(DropdownRow::is_selectable));
        assert!(rows
            .iter()
            .filter_map(DropdownRow::as_country)
            .all(|r| r.origin == RowOrigin::Listed));
    }

    #[test]
    fn no_result_row_when_search_is_empty() {
        let mut store = store(PickerOptions::default());
        store.set_external_loading(Some(false));
        store.type_text("atlantis", Instant::now());
        assert_eq!(build_rows(&store), vec![DropdownRow::NoResult]);
    }

    #[test]
    fn loading_rows_are_alternating_skeletons() {
        let mut store = store(PickerOptions::default());
        store.type_text("t", Instant::now());
        let rows = build_rows(&store);
        // Taiwan and Thailand match, so two skeletons.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], DropdownRow::Skeleton(SkeletonWidth::Long));
        assert_eq!(rows[1], DropdownRow::Skeleton(SkeletonWidth::Short));
    }

    #[test]
    fn selected_country_is_marked_in_both_lists() {
        let store = store(PickerOptions::new(SelectorMode::DialCode).with_default_value("886"));
        let selected: Vec<RowOrigin> = build_rows(&store)
            .iter()
            .filter_map(DropdownRow::as_country)
            .filter(|r| r.is_selected)
            .map(|r| r.origin)
            .collect();
        assert_eq!(selected, vec![RowOrigin::Hot, RowOrigin::Listed]);
    }
}
