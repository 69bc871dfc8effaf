//! Domain-level keyboard actions independent of key bindings.

/// Picker actions that keys can be bound to.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Printable characters and Backspace are not actions: they edit the
/// focused text surface directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Open the dropdown from the trigger. Default: Space/Enter/Down
    Open,
    /// Commit the first match, or the highlighted row when not searching. Default: Enter
    Commit,
    /// Clear the search, or close when the search is already blank. Default: Esc
    Cancel,
    /// Move focus out of the search box (blur). Default: Tab
    Blur,
    /// Highlight the previous selectable row. Default: ↑
    HighlightPrev,
    /// Highlight the next selectable row. Default: ↓
    HighlightNext,
    /// Exit the application. Default: q/Esc (while closed), Ctrl+c
    Quit,
}
