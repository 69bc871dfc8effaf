//! Picker state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal.
//! Time is passed in as an [`std::time::Instant`]; nothing here sleeps.

pub mod interaction;
pub mod placement;
pub mod rows;
pub mod search_box;
pub mod selection;
pub mod timer;
pub mod trigger;

// Re-export for convenience
pub use interaction::{
    activate_trigger, focus_trigger, handle_action, handle_clear_click, handle_item_click,
    handle_pointer_down, handle_row_activate, handle_search_blur, handle_search_input,
    scroll_target, watches_outside_clicks, ActionOutcome, ListItem, PointerTarget,
    PressDisposition,
};
pub use placement::{calculate_placement, DropdownPosition, Placement, PlacementLimits, TriggerGeometry};
pub use rows::{build_rows, CountryRow, DropdownRow, RowOrigin, SkeletonWidth};
pub use search_box::{SearchBox, TextSurface};
pub use selection::{
    ChangeCallback, FormValue, PickerPhase, PickerTiming, RenderFlags, SelectionStore,
};
pub use timer::{TimerKind, TimerQueue, TimerToken};
