//! Trigger and dropdown widgets.

use crate::matching::highlight_spans;
use crate::model::{Country, SelectorMode};
use crate::state::rows::{CountryRow, DropdownRow, SkeletonWidth, HOT_LIST_TITLE, NO_RESULT_TEXT};
use crate::state::{SearchBox, SelectionStore, TextSurface};
use crate::view::layout::DropdownAreas;
use crate::view::styles::PickerStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const CLEAR_GLYPH: &str = "✕";
const SELECTED_MARK: &str = "✓ ";
const UNSELECTED_MARK: &str = "  ";

// ===== Shared pieces =====

/// Editable text with a block cursor.
///
/// Text before the cursor scrolls off the left edge so the cursor stays
/// within `width` columns.
fn editor_line<'a>(surface: &'a SearchBox, style: Style, cursor: Style, width: u16) -> Line<'a> {
    let (before, after) = surface.split_at_cursor();
    let mut chars = after.chars();
    let under = chars.next().map_or_else(|| " ".to_string(), String::from);
    let room = usize::from(width).saturating_sub(Span::raw(under.as_str()).width());
    let start = before
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| Span::raw(&before[i..]).width() <= room)
        .unwrap_or(before.len());
    Line::from(vec![
        Span::styled(&before[start..], style),
        Span::styled(under, cursor),
        Span::styled(chars.as_str(), style),
    ])
}

/// Spans of `text` with query matches highlighted.
fn highlighted<'a>(text: &'a str, query: &str, base: Style, styles: &PickerStyles) -> Vec<Span<'a>> {
    highlight_spans(text, query)
        .into_iter()
        .map(|span| {
            let style = if span.is_match {
                base.patch(styles.match_highlight)
            } else {
                base
            };
            Span::styled(span.text, style)
        })
        .collect()
}

/// Country row text: `zh en (SHORT)`, plus `+code` in dial-code mode.
pub fn country_spans<'a>(
    country: &'a Country,
    mode: SelectorMode,
    query: &str,
    base: Style,
    styles: &PickerStyles,
) -> Vec<Span<'a>> {
    let mut spans = highlighted(country.zh_name(), query, base, styles);
    spans.push(Span::styled(" ", base));
    spans.extend(highlighted(country.en_name(), query, base, styles));
    spans.push(Span::styled(" (", base));
    spans.extend(highlighted(country.short_name(), query, base, styles));
    spans.push(Span::styled(")", base));
    if mode == SelectorMode::DialCode {
        spans.push(Span::styled("  +", base));
        spans.extend(highlighted(country.code(), query, base, styles));
    }
    spans
}

fn country_line<'a>(
    row: &CountryRow<'a>,
    mode: SelectorMode,
    query: &str,
    styles: &PickerStyles,
) -> Line<'a> {
    let (mark, base) = if row.is_selected {
        (SELECTED_MARK, styles.selected)
    } else {
        (UNSELECTED_MARK, Style::default())
    };
    let mut spans = vec![Span::styled(mark, base)];
    spans.extend(country_spans(row.country, mode, query, base, styles));
    Line::from(spans)
}

/// One list line for a dropdown row.
pub fn row_line<'a>(
    row: &DropdownRow<'a>,
    mode: SelectorMode,
    query: &str,
    width: u16,
    styles: &PickerStyles,
) -> Line<'a> {
    match row {
        DropdownRow::HotTitle => Line::styled(HOT_LIST_TITLE, styles.hot_title),
        DropdownRow::GroupHeader(key) => Line::styled(key.clone(), styles.group_header),
        DropdownRow::Country(country) => country_line(country, mode, query, styles),
        DropdownRow::NoResult => Line::styled(NO_RESULT_TEXT, styles.no_result),
        DropdownRow::Skeleton(size) => {
            let percent = match size {
                SkeletonWidth::Long => 70,
                SkeletonWidth::Short => 40,
            };
            let bar = usize::from(width) * percent / 100;
            Line::styled("░".repeat(bar.max(1)), styles.skeleton)
        }
    }
}

// ===== TriggerWidget =====

/// The trigger box with its label in the border.
pub struct TriggerWidget<'a> {
    store: &'a SelectionStore,
    styles: &'a PickerStyles,
    /// Editable surface when the trigger doubles as the search box.
    surface: Option<&'a SearchBox>,
    focused: bool,
}

impl<'a> TriggerWidget<'a> {
    /// Button trigger for `store`.
    pub fn new(store: &'a SelectionStore, styles: &'a PickerStyles) -> Self {
        Self {
            store,
            styles,
            surface: None,
            focused: false,
        }
    }

    /// Render `surface` as an editable input instead.
    pub fn input(mut self, surface: &'a SearchBox) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Whether the input has focus (shows the cursor).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn title(&self) -> Line<'a> {
        let mut spans = Vec::new();
        if let Some(label) = self.store.label() {
            spans.push(Span::styled(format!(" {label}"), self.styles.label));
            if self.store.is_required() {
                spans.push(Span::styled(" *", self.styles.required_marker));
            }
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn border_style(&self) -> Style {
        if self.store.is_disabled() {
            self.styles.disabled
        } else if self.store.is_open() {
            self.styles.border_focused
        } else {
            self.styles.border
        }
    }

    fn content(&self, width: u16) -> Line<'a> {
        let styles = self.styles;
        if self.store.is_disabled() {
            return Line::styled(self.store.trigger_text(), styles.disabled);
        }
        match self.surface {
            Some(surface) if self.focused && self.store.is_open() => {
                editor_line(surface, styles.search_text, styles.cursor, width)
            }
            Some(surface) if self.store.selected_country().is_none() && !self.store.has_search() => {
                Line::styled(surface.text().to_string(), styles.placeholder)
            }
            Some(surface) => Line::styled(surface.text().to_string(), styles.trigger_text),
            None if self.store.selected_country().is_none() => {
                Line::styled(self.store.placeholder_text().to_string(), styles.placeholder)
            }
            None => Line::styled(self.store.trigger_text(), styles.trigger_text),
        }
    }
}

impl Widget for TriggerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let arrow = if self.store.is_open() { " ▴ " } else { " ▾ " };
        let block = Block::bordered()
            .title(self.title())
            .title_bottom(Line::from(arrow).right_aligned())
            .border_style(self.border_style());
        let inner = block.inner(area);
        Paragraph::new(self.content(inner.width)).block(block).render(area, buf);
    }
}

// ===== DropdownWidget =====

/// The open dropdown: hint, optional search box, and the row list.
pub struct DropdownWidget<'a> {
    store: &'a SelectionStore,
    styles: &'a PickerStyles,
    rows: &'a [DropdownRow<'a>],
    areas: DropdownAreas,
    search: Option<&'a SearchBox>,
    search_focused: bool,
    highlighted: Option<usize>,
    offset: usize,
}

impl<'a> DropdownWidget<'a> {
    /// Dropdown drawing `rows` into `areas`.
    pub fn new(
        store: &'a SelectionStore,
        styles: &'a PickerStyles,
        rows: &'a [DropdownRow<'a>],
        areas: DropdownAreas,
    ) -> Self {
        Self {
            store,
            styles,
            rows,
            areas,
            search: None,
            search_focused: false,
            highlighted: None,
            offset: 0,
        }
    }

    /// Show a search line fed by `search`.
    pub fn search(mut self, search: &'a SearchBox, focused: bool) -> Self {
        self.search = Some(search);
        self.search_focused = focused;
        self
    }

    /// Row index to highlight.
    pub fn highlighted(mut self, highlighted: Option<usize>) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// First row to draw.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    fn render_search(&self, search: &SearchBox, area: Rect, buf: &mut Buffer) {
        let styles = self.styles;
        let reserved = self.areas.clear.map_or(0, |clear| clear.width);
        let text_area = Rect {
            width: area.width.saturating_sub(reserved),
            ..area
        };
        let line = if search.text().is_empty() {
            Line::styled(self.store.search_placeholder().to_string(), styles.placeholder)
        } else if self.search_focused {
            editor_line(search, styles.search_text, styles.cursor, text_area.width)
        } else {
            Line::styled(search.text(), styles.search_text)
        };
        Paragraph::new(line).render(text_area, buf);

        if let Some(clear) = self.areas.clear {
            Paragraph::new(Line::styled(CLEAR_GLYPH, styles.clear_button))
                .alignment(Alignment::Right)
                .render(clear, buf);
        }
    }

    fn render_list(&self, buf: &mut Buffer) {
        let list = self.areas.list;
        let mode = self.store.mode();
        let query = self.store.search_text();

        let visible = self
            .rows
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(usize::from(list.height));
        for (line_no, (index, row)) in visible.enumerate() {
            let Ok(dy) = u16::try_from(line_no) else {
                break;
            };
            let area = Rect::new(list.x, list.y + dy, list.width, 1);
            let mut line = row_line(row, mode, query, list.width, self.styles);
            if self.highlighted == Some(index) {
                line = line.patch_style(self.styles.highlighted);
                buf.set_style(area, self.styles.highlighted);
            }
            Paragraph::new(line).render(area, buf);
        }
    }
}

impl Widget for DropdownWidget<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let outer = self.areas.outer;
        Clear.render(outer, buf);
        Block::bordered()
            .border_style(self.styles.border_focused)
            .render(outer, buf);

        if let (Some(area), Some(hint)) = (self.areas.hint, self.store.hint_text()) {
            Paragraph::new(Line::styled(hint.to_string(), self.styles.hint)).render(area, buf);
        }
        if let (Some(area), Some(search)) = (self.areas.search, self.search) {
            self.render_search(search, area, buf);
        }
        self.render_list(buf);
    }
}
