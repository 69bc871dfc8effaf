//! Search, sort and grouping over country lists (pure functions).
//!
//! Nothing here allocates new countries: views borrow from the catalog and
//! are rebuilt from scratch on every keystroke.

use crate::model::Country;
use regex::RegexBuilder;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Group key used for search results (no letter headers).
pub const UNGROUPED_KEY: &str = "";

/// Key for countries without any usable letter.
const FALLBACK_KEY: &str = "#";

// ===== MatchKind =====

/// How a country relates to a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// A field equals the query.
    Exact,
    /// A field contains the query.
    Partial,
    /// No field contains the query.
    None,
}

// ===== GroupedView =====

/// Countries grouped by key, keys in ascending order.
///
/// Letter keys (`"A"`, `"B"`, ...) when browsing, a single
/// [`UNGROUPED_KEY`] bucket when searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedView<'a> {
    groups: BTreeMap<String, Vec<&'a Country>>,
}

impl<'a> GroupedView<'a> {
    /// True when no group holds a country.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Number of countries across all groups.
    pub fn country_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of groups, empty ones included.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Countries under `key`.
    pub fn get(&self, key: &str) -> Option<&[&'a Country]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Country])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Group keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// First country of the first non-empty group.
    pub fn first(&self) -> Option<&'a Country> {
        self.groups.values().find_map(|g| g.first().copied())
    }

    /// All countries in display order.
    pub fn countries(&self) -> impl Iterator<Item = &'a Country> + '_ {
        self.groups.values().flat_map(|g| g.iter().copied())
    }

    fn push(&mut self, key: String, country: &'a Country) {
        self.groups.entry(key).or_default().push(country);
    }
}

// ===== Sorting and grouping =====

/// Case-folded comparison of short names, falling back to the raw text.
fn compare_short_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort by short name.
pub fn sort_countries<'a, I>(countries: I) -> Vec<&'a Country>
where
    I: IntoIterator<Item = &'a Country>,
{
    let mut sorted: Vec<&'a Country> = countries.into_iter().collect();
    sorted.sort_by(|a, b| compare_short_names(a.short_name(), b.short_name()));
    sorted
}

/// Uppercased first letter of the short name, then of `firstLetter`.
pub fn group_key(country: &Country) -> String {
    country
        .short_name()
        .chars()
        .next()
        .or_else(|| country.first_letter().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| FALLBACK_KEY.to_string())
}

/// Group an already sorted sequence by first letter. Order inside a group
/// is the input order.
pub fn group_by_letter<'a, I>(countries: I) -> GroupedView<'a>
where
    I: IntoIterator<Item = &'a Country>,
{
    let mut view = GroupedView::default();
    for country in countries {
        view.push(group_key(country), country);
    }
    view
}

// ===== Matching =====

/// Classify a country against a query.
///
/// The query is trimmed first. Names are compared case-insensitively, the
/// dial code verbatim. A blank query matches nothing.
pub fn classify_match(country: &Country, query: &str) -> MatchKind {
    let query = query.trim();
    if query.is_empty() {
        return MatchKind::None;
    }
    let needle = query.to_lowercase();
    let names = [country.zh_name(), country.en_name(), country.short_name()];

    if country.code() == query || names.iter().any(|n| n.to_lowercase() == needle) {
        MatchKind::Exact
    } else if country.code().contains(query)
        || names.iter().any(|n| n.to_lowercase().contains(&needle))
    {
        MatchKind::Partial
    } else {
        MatchKind::None
    }
}

/// Filter, sort and group a country list for display.
///
/// Blank query: every country, sorted and grouped by letter.
/// Otherwise exact matches then partial matches, each sorted by short name,
/// in one [`UNGROUPED_KEY`] bucket. No matches gives an empty view.
pub fn filter_and_group<'a>(countries: &'a [Country], query: &str) -> GroupedView<'a> {
    if query.trim().is_empty() {
        return group_by_letter(sort_countries(countries));
    }

    let mut exact = Vec::new();
    let mut partial = Vec::new();
    for country in countries {
        match classify_match(country, query) {
            MatchKind::Exact => exact.push(country),
            MatchKind::Partial => partial.push(country),
            MatchKind::None => {}
        }
    }

    let mut view = GroupedView::default();
    for country in sort_countries(exact)
        .into_iter()
        .chain(sort_countries(partial))
    {
        view.push(UNGROUPED_KEY.to_string(), country);
    }
    view
}

// ===== Highlighting =====

/// A piece of display text, marked when it matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    /// Slice of the original text.
    pub text: &'a str,
    /// Whether this slice matched the query.
    pub is_match: bool,
}

impl<'a> HighlightSpan<'a> {
    fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_match: false,
        }
    }

    fn matched(text: &'a str) -> Self {
        Self {
            text,
            is_match: true,
        }
    }
}

/// Split `text` around case-insensitive occurrences of `query`.
///
/// The query is trimmed and regex-escaped, so any input is safe. The spans
/// always concatenate back to `text`.
pub fn highlight_spans<'a>(text: &'a str, query: &str) -> Vec<HighlightSpan<'a>> {
    let query = query.trim();
    if query.is_empty() || text.is_empty() {
        return vec![HighlightSpan::plain(text)];
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return vec![HighlightSpan::plain(text)];
    };

    let mut spans = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            spans.push(HighlightSpan::plain(&text[last..m.start()]));
        }
        spans.push(HighlightSpan::matched(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(HighlightSpan::plain(&text[last..]));
    }
    spans
}

// ===== Tests =====

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
