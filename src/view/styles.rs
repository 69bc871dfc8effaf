//! Picker styling configuration.
//!
//! Colors can be turned off; every state then stays distinguishable through
//! modifiers (bold, reversed, dim) alone.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Colors off.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether colors are used.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== PickerStyles =====

/// Styles for every visual element of the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerStyles {
    /// Label in the trigger border.
    pub label: Style,
    /// Required `*` marker.
    pub required_marker: Style,
    /// Selected value on the trigger.
    pub trigger_text: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// Idle border.
    pub border: Style,
    /// Border while open.
    pub border_focused: Style,
    /// Disabled trigger.
    pub disabled: Style,
    /// Hint line.
    pub hint: Style,
    /// Typed search text.
    pub search_text: Style,
    /// Block cursor.
    pub cursor: Style,
    /// Clear-search glyph.
    pub clear_button: Style,
    /// Matched part of a row.
    pub match_highlight: Style,
    /// Hot list title.
    pub hot_title: Style,
    /// Letter headers.
    pub group_header: Style,
    /// Selected country row.
    pub selected: Style,
    /// Highlighted row.
    pub highlighted: Style,
    /// No-result row.
    pub no_result: Style,
    /// Skeleton bars.
    pub skeleton: Style,
}

impl PickerStyles {
    /// Styles for `config`.
    pub fn new(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                label: Style::default().add_modifier(Modifier::BOLD),
                required_marker: Style::default().fg(Color::Red),
                trigger_text: Style::default(),
                placeholder: Style::default().fg(Color::DarkGray),
                border: Style::default().fg(Color::Gray),
                border_focused: Style::default().fg(Color::Cyan),
                disabled: Style::default().fg(Color::DarkGray),
                hint: Style::default().fg(Color::Yellow),
                search_text: Style::default(),
                cursor: Style::default().bg(Color::White).fg(Color::Black),
                clear_button: Style::default().fg(Color::Gray),
                match_highlight: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                hot_title: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                group_header: Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::Green),
                highlighted: Style::default().bg(Color::DarkGray),
                no_result: Style::default().fg(Color::DarkGray),
                skeleton: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                label: Style::default().add_modifier(Modifier::BOLD),
                required_marker: Style::default().add_modifier(Modifier::BOLD),
                trigger_text: Style::default(),
                placeholder: Style::default().add_modifier(Modifier::DIM),
                border: Style::default(),
                border_focused: Style::default().add_modifier(Modifier::BOLD),
                disabled: Style::default().add_modifier(Modifier::DIM),
                hint: Style::default().add_modifier(Modifier::ITALIC),
                search_text: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                clear_button: Style::default(),
                match_highlight: Style::default().add_modifier(Modifier::UNDERLINED),
                hot_title: Style::default().add_modifier(Modifier::ITALIC),
                group_header: Style::default().add_modifier(Modifier::BOLD),
                selected: Style::default().add_modifier(Modifier::BOLD),
                highlighted: Style::default().add_modifier(Modifier::REVERSED),
                no_result: Style::default().add_modifier(Modifier::DIM),
                skeleton: Style::default().add_modifier(Modifier::DIM),
            }
        }
    }
}

impl Default for PickerStyles {
    fn default() -> Self {
        Self::new(ColorConfig::from_env_and_args(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_colors_use_no_foreground_or_background() {
        let styles = PickerStyles::new(ColorConfig::disabled());
        for style in [
            styles.highlighted,
            styles.match_highlight,
            styles.placeholder,
            styles.selected,
        ] {
            assert_eq!(style.fg, None);
            assert_eq!(style.bg, None);
        }
    }

    #[test]
    fn highlight_and_match_stay_distinct_without_color() {
        let styles = PickerStyles::new(ColorConfig::disabled());
        assert_ne!(styles.highlighted, styles.match_highlight);
        assert_ne!(styles.selected, styles.trigger_text);
    }

    #[test]
    fn no_color_flag_disables_colors() {
        assert!(!ColorConfig::from_env_and_args(true).colors_enabled());
    }
}
