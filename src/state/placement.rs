//! Dropdown placement relative to the trigger.
//!
//! Units are whatever the caller measures in (pixels in a browser, rows in
//! a terminal); only the limits have to agree with the geometry.

/// Side of the trigger the dropdown opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownPosition {
    /// Below the trigger.
    #[default]
    Bottom,
    /// Above the trigger.
    Top,
}

/// Size limits for the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementLimits {
    /// Gap kept between the dropdown and the viewport edge.
    pub padding: u32,
    /// Height below which the dropdown flips or clamps.
    pub min_height: u32,
    /// Height the dropdown never exceeds.
    pub max_height: u32,
}

impl PlacementLimits {
    /// Defaults for terminal rows.
    pub const TERMINAL: PlacementLimits = PlacementLimits {
        padding: 1,
        min_height: 6,
        max_height: 20,
    };
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            padding: 20,
            min_height: 200,
            max_height: 600,
        }
    }
}

/// Vertical extent of the trigger and the viewport it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerGeometry {
    /// Top edge of the trigger.
    pub trigger_top: u32,
    /// Bottom edge of the trigger.
    pub trigger_bottom: u32,
    /// Height of the visible viewport.
    pub viewport_height: u32,
}

impl TriggerGeometry {
    /// Geometry from raw edges.
    pub fn new(trigger_top: u32, trigger_bottom: u32, viewport_height: u32) -> Self {
        Self {
            trigger_top,
            trigger_bottom,
            viewport_height,
        }
    }

    /// Geometry of a terminal trigger occupying `area` in a screen of `screen_height` rows.
    pub fn from_rect(area: ratatui::layout::Rect, screen_height: u16) -> Self {
        Self::new(
            u32::from(area.top()),
            u32::from(area.bottom()),
            u32::from(screen_height),
        )
    }
}

/// Where and how tall the dropdown renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Side of the trigger.
    pub position: DropdownPosition,
    /// Height the dropdown may use.
    pub max_height: u32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: DropdownPosition::Bottom,
            max_height: 300,
        }
    }
}

/// Open below when there is room for a full-height dropdown or at least as
/// much room as above; otherwise open above. Height is the available space
/// minus padding, clamped to the limits.
pub fn calculate_placement(geometry: TriggerGeometry, limits: PlacementLimits) -> Placement {
    let space_below = geometry
        .viewport_height
        .saturating_sub(geometry.trigger_bottom);
    let space_above = geometry.trigger_top;

    let (position, space) = if space_below >= limits.max_height || space_below >= space_above {
        (DropdownPosition::Bottom, space_below)
    } else {
        (DropdownPosition::Top, space_above)
    };

    let max_height = space
        .saturating_sub(limits.padding)
        .max(limits.min_height)
        .min(limits.max_height);

    Placement {
        position,
        max_height,
    }
}
