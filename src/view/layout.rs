//! Screen areas of the picker and pointer hit testing.

use crate::state::{DropdownPosition, Placement};
use ratatui::layout::{Position, Rect};

/// Trigger box height (top border, text, bottom border).
pub const TRIGGER_HEIGHT: u16 = 3;

/// Widest the picker grows on large terminals.
pub const MAX_PICKER_WIDTH: u16 = 56;

/// Columns reserved for the clear-search affordance.
pub const CLEAR_WIDTH: u16 = 2;

const LEFT_MARGIN: u16 = 2;

/// Which optional lines sit above the dropdown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownHeader {
    /// Hint line above the search.
    pub hint: bool,
    /// Search box inside the dropdown (button trigger only).
    pub search: bool,
    /// Clear affordance at the end of the search box.
    pub clear: bool,
}

impl DropdownHeader {
    fn lines(self) -> u16 {
        u16::from(self.hint) + u16::from(self.search)
    }
}

/// Areas of an open dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownAreas {
    /// Bordered box.
    pub outer: Rect,
    /// Hint line.
    pub hint: Option<Rect>,
    /// Search line.
    pub search: Option<Rect>,
    /// Clear affordance at the end of the search line.
    pub clear: Option<Rect>,
    /// Row list.
    pub list: Rect,
}

/// Everything the last frame drew, kept for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerLayout {
    /// Trigger box.
    pub trigger: Rect,
    /// Dropdown, when open.
    pub dropdown: Option<DropdownAreas>,
}

/// What a pointer position landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The trigger box.
    Trigger,
    /// The clear-search affordance.
    ClearSearch,
    /// The search line.
    Search,
    /// A list line, counted from the top of the visible list.
    ListLine(u16),
    /// Dropdown chrome (border, hint).
    Inside,
    /// Anywhere else.
    Outside,
}

/// Trigger box for a picker whose top edge is at `row`.
///
/// Clamped so the whole box stays on screen.
pub fn trigger_area(screen: Rect, row: u16) -> Rect {
    let margin = LEFT_MARGIN.min(screen.width / 4);
    let width = screen
        .width
        .saturating_sub(margin * 2)
        .min(MAX_PICKER_WIDTH);
    let height = TRIGGER_HEIGHT.min(screen.height);
    let y = row.min(screen.height.saturating_sub(height));
    Rect::new(screen.x + margin, screen.y + y, width, height)
}

/// Areas of the dropdown for `row_count` list rows.
///
/// The box is as tall as its content, capped by the placement height and by
/// the room on the chosen side of the trigger.
pub fn dropdown_areas(
    screen: Rect,
    trigger: Rect,
    placement: Placement,
    header: DropdownHeader,
    row_count: usize,
) -> DropdownAreas {
    let rows = u16::try_from(row_count.max(1)).unwrap_or(u16::MAX);
    let content = rows.saturating_add(header.lines()).saturating_add(2);
    let cap = u16::try_from(placement.max_height).unwrap_or(u16::MAX);

    let (available, above) = match placement.position {
        DropdownPosition::Bottom => (screen.bottom().saturating_sub(trigger.bottom()), false),
        DropdownPosition::Top => (trigger.top().saturating_sub(screen.top()), true),
    };
    let height = content.min(cap).min(available);
    let y = if above {
        trigger.top() - height
    } else {
        trigger.bottom()
    };
    let outer = Rect::new(trigger.x, y, trigger.width, height);

    let inner = Rect::new(
        outer.x.saturating_add(1),
        outer.y.saturating_add(1),
        outer.width.saturating_sub(2),
        outer.height.saturating_sub(2),
    );

    let mut next = inner.y;
    let mut take_line = |wanted: bool| {
        if wanted && next < inner.bottom() {
            let line = Rect::new(inner.x, next, inner.width, 1);
            next += 1;
            Some(line)
        } else {
            None
        }
    };
    let hint = take_line(header.hint);
    let search = take_line(header.search);

    let clear = search.filter(|_| header.clear).map(|s| {
        let width = CLEAR_WIDTH.min(s.width);
        Rect::new(s.right() - width, s.y, width, 1)
    });
    let list = Rect::new(inner.x, next, inner.width, inner.bottom().saturating_sub(next));

    DropdownAreas {
        outer,
        hint,
        search,
        clear,
        list,
    }
}

impl PickerLayout {
    /// Hit-test a pointer position against the last drawn frame.
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let pos = Position::new(column, row);
        if self.trigger.contains(pos) {
            return Hit::Trigger;
        }
        let Some(dropdown) = self.dropdown else {
            return Hit::Outside;
        };
        if dropdown.clear.is_some_and(|r| r.contains(pos)) {
            Hit::ClearSearch
        } else if dropdown.search.is_some_and(|r| r.contains(pos)) {
            Hit::Search
        } else if dropdown.list.contains(pos) {
            Hit::ListLine(row - dropdown.list.y)
        } else if dropdown.outer.contains(pos) {
            Hit::Inside
        } else {
            Hit::Outside
        }
    }
}
