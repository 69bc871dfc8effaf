//! Terminal front end (impure shell)
//!
//! Owns the terminal, turns crossterm events into picker transitions and
//! draws the trigger and dropdown. All picker state lives in the
//! [`SelectionStore`]; this module only keeps what is purely visual
//! (focus, highlighted row, scroll offset, last layout).

pub mod layout;
pub mod picker;
pub mod styles;

pub use layout::{Hit, PickerLayout};
pub use picker::{DropdownWidget, TriggerWidget};
pub use styles::{ColorConfig, PickerStyles};

use crate::config::{KeyBindings, TriggerStyle};
use crate::model::{Country, CountryCatalog, KeyAction};
use crate::state::{
    activate_trigger, build_rows, handle_action, handle_clear_click, handle_pointer_down,
    handle_row_activate, handle_search_blur, handle_search_input, scroll_target, trigger,
    PlacementLimits, PointerTarget, PressDisposition, SearchBox, SelectionStore,
    TextSurface, TriggerGeometry,
};
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use layout::{dropdown_areas, trigger_area, DropdownHeader};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Longest the event loop sleeps when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(1000);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Front-end settings that do not belong to the picker itself.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Button or editable-input trigger.
    pub trigger_style: TriggerStyle,
    /// Dropdown placement limits, in rows.
    pub limits: PlacementLimits,
    /// Screen row of the trigger's top edge.
    pub trigger_row: u16,
    /// Act as the owner of a controlled picker: feed every committed
    /// selection back in as the new value.
    pub echo_controlled: bool,
    /// Rendering styles.
    pub styles: PickerStyles,
    /// Key to action tables.
    pub key_bindings: KeyBindings,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            trigger_style: TriggerStyle::Button,
            limits: PlacementLimits::TERMINAL,
            trigger_row: 1,
            echo_controlled: true,
            styles: PickerStyles::default(),
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Which part of the open picker receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Search box (or input trigger) has focus.
    Search,
    /// Search box blurred; the list is being browsed.
    List,
}

/// A catalog that replaces the current one once `due` passes.
#[derive(Debug, Clone)]
struct PendingCatalog {
    due: Instant,
    catalog: CountryCatalog,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    store: SelectionStore,
    settings: ViewSettings,
    /// Search box (button trigger) or the trigger's own text (input trigger).
    search: SearchBox,
    focus: Focus,
    highlighted: Option<usize>,
    offset: usize,
    list_height: u16,
    layout: Option<PickerLayout>,
    changes: Receiver<Option<Country>>,
    pending_catalog: Option<PendingCatalog>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(store: SelectionStore, settings: ViewSettings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, store, settings))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Sleeps until the next input event or the
    /// next scheduled picker task, whichever comes first.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let now = Instant::now();
            let timeout = self
                .next_wakeup()
                .map_or(IDLE_POLL, |due| due.saturating_duration_since(now))
                .min(IDLE_POLL);

            if event::poll(timeout)? {
                let now = Instant::now();
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key, now) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, now),
                    _ => {}
                }
            }

            self.on_tick(Instant::now());
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an existing terminal. Installs the store's change callback.
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut store: SelectionStore,
        settings: ViewSettings,
    ) -> Self {
        let (tx, changes) = mpsc::channel();
        store.set_change_callback(move |country| {
            // Receiver lives as long as the app; a send error only means shutdown.
            let _ = tx.send(country.cloned());
        });
        let mut app = Self {
            terminal,
            store,
            settings,
            search: SearchBox::new(),
            focus: Focus::Search,
            highlighted: None,
            offset: 0,
            list_height: 0,
            layout: None,
            changes,
            pending_catalog: None,
        };
        app.sync_text();
        app
    }

    /// Swap in `catalog` and clear the external loading flag at `due`.
    pub fn schedule_catalog(&mut self, catalog: CountryCatalog, due: Instant) {
        self.pending_catalog = Some(PendingCatalog { due, catalog });
    }

    /// Picker state.
    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    /// Current focus.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Highlighted row index.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Text of the search box or input trigger.
    pub fn search_box(&self) -> &SearchBox {
        &self.search
    }

    /// Layout of the last drawn frame.
    pub fn layout(&self) -> Option<PickerLayout> {
        self.layout
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Earliest moment something is scheduled to happen.
    pub fn next_wakeup(&self) -> Option<Instant> {
        let catalog_due = self.pending_catalog.as_ref().map(|p| p.due);
        match (self.store.next_deadline(), catalog_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ===== Events =====

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let is_open = self.store.is_open();
        let action = self.settings.key_bindings.get(key, is_open);
        debug!(?key, ?action, is_open, "key");

        match action {
            Some(KeyAction::Quit) => return true,
            Some(KeyAction::Open) => {
                self.open();
            }
            Some(KeyAction::Commit) => self.commit(now),
            Some(KeyAction::Cancel) => {
                handle_action(&mut self.store, KeyAction::Cancel, now);
            }
            Some(KeyAction::Blur) => self.toggle_focus(now),
            Some(KeyAction::HighlightPrev) => self.move_highlight(false),
            Some(KeyAction::HighlightNext) => self.move_highlight(true),
            None if is_open => self.edit(key, now),
            None => {}
        }

        self.after_event();
        false
    }

    /// Handle a mouse event (left press and wheel).
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row, now),
            MouseEventKind::ScrollDown => self.scroll(true),
            MouseEventKind::ScrollUp => self.scroll(false),
            _ => return,
        }
        self.after_event();
    }

    /// Fire due tasks, apply a due catalog and deliver committed changes.
    pub fn on_tick(&mut self, now: Instant) {
        let fired = self.store.tick(now);
        if fired > 0 {
            debug!(fired, "scheduled tasks ran");
        }

        if self.pending_catalog.as_ref().is_some_and(|p| p.due <= now) {
            if let Some(pending) = self.pending_catalog.take() {
                self.store.set_catalog(pending.catalog);
                self.store.set_external_loading(None);
            }
        }

        self.after_event();
    }

    // ===== Transitions =====

    fn screen(&self) -> Rect {
        match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width, size.height),
            Err(_) => Rect::new(0, 0, 80, 24),
        }
    }

    fn geometry(&self) -> TriggerGeometry {
        let screen = self.screen();
        TriggerGeometry::from_rect(trigger_area(screen, self.settings.trigger_row), screen.height)
    }

    fn open(&mut self) -> bool {
        if self.store.is_open() {
            return false;
        }
        let geometry = self.geometry();
        let limits = self.settings.limits;
        let opened = match self.settings.trigger_style {
            TriggerStyle::Button => activate_trigger(&mut self.store, geometry, limits),
            TriggerStyle::Input => {
                trigger::on_focus(&mut self.store, &mut self.search, geometry, limits)
            }
        };
        if opened {
            self.focus = Focus::Search;
            let target = scroll_target(&self.store);
            self.offset = target.unwrap_or(0);
            self.highlighted = target;
        }
        opened
    }

    fn commit(&mut self, now: Instant) {
        if self.store.has_search() {
            handle_action(&mut self.store, KeyAction::Commit, now);
        } else if let Some(index) = self.highlighted {
            handle_row_activate(&mut self.store, index);
        }
    }

    fn toggle_focus(&mut self, now: Instant) {
        match self.focus {
            Focus::Search => {
                self.focus = Focus::List;
                match self.settings.trigger_style {
                    TriggerStyle::Button => {
                        handle_search_blur(&mut self.store, now);
                    }
                    TriggerStyle::Input => {
                        trigger::on_blur(&mut self.store, &mut self.search, now);
                    }
                }
            }
            Focus::List => {
                self.focus = Focus::Search;
                self.store.cancel_blur_commit();
            }
        }
    }

    fn edit(&mut self, key: KeyEvent, now: Instant) {
        match self.settings.trigger_style {
            TriggerStyle::Button => {
                if self.search.apply_edit(key) {
                    handle_search_input(&mut self.store, self.search.text(), now);
                }
            }
            TriggerStyle::Input => {
                trigger::on_edit(&mut self.store, &mut self.search, key, now);
            }
        }
        self.focus = Focus::Search;
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) {
        let hit = self.layout.map_or(Hit::Outside, |l| l.hit(column, row));
        let target = match hit {
            Hit::Trigger => PointerTarget::Trigger,
            Hit::ClearSearch => PointerTarget::ClearSearch,
            Hit::Search | Hit::ListLine(_) | Hit::Inside => PointerTarget::Inside,
            Hit::Outside => PointerTarget::Outside,
        };
        if handle_pointer_down(&mut self.store, target) == PressDisposition::PreventDefault {
            self.focus = Focus::Search;
        }

        match hit {
            Hit::Trigger => match self.settings.trigger_style {
                TriggerStyle::Button if self.store.is_open() => self.store.dismiss(),
                _ if self.store.is_open() => {
                    self.focus = Focus::Search;
                    self.store.cancel_blur_commit();
                }
                _ => {
                    self.open();
                }
            },
            Hit::ClearSearch => handle_clear_click(&mut self.store, now),
            Hit::Search => {
                self.focus = Focus::Search;
                self.store.cancel_blur_commit();
            }
            Hit::ListLine(line) => {
                let index = self.offset + usize::from(line);
                handle_row_activate(&mut self.store, index);
            }
            Hit::Inside | Hit::Outside => {}
        }
    }

    fn selectable_rows(&self) -> Vec<usize> {
        build_rows(&self.store)
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_selectable())
            .map(|(i, _)| i)
            .collect()
    }

    fn move_highlight(&mut self, forward: bool) {
        let selectable = self.selectable_rows();
        let current = self
            .highlighted
            .and_then(|h| selectable.iter().position(|&i| i == h));
        let next = match (current, forward) {
            (None, true) => selectable.first(),
            (None, false) => selectable.last(),
            (Some(pos), true) => selectable.get(pos + 1).or(selectable.last()),
            (Some(pos), false) => selectable.get(pos.saturating_sub(1)),
        };
        self.highlighted = next.copied();
    }

    fn scroll(&mut self, down: bool) {
        if !self.store.is_open() {
            return;
        }
        let total = build_rows(&self.store).len();
        let max_offset = total.saturating_sub(usize::from(self.list_height));
        self.offset = if down {
            (self.offset + 1).min(max_offset)
        } else {
            self.offset.saturating_sub(1)
        };
    }

    /// Bring view state in line with the store after any transition.
    fn after_event(&mut self) {
        self.drain_changes();

        if !self.store.is_open() {
            self.focus = Focus::Search;
            self.highlighted = None;
            self.offset = 0;
        } else {
            let rows = build_rows(&self.store);
            let valid = self
                .highlighted
                .and_then(|h| rows.get(h))
                .is_some_and(|row| row.is_selectable());
            if !valid {
                self.highlighted = rows.iter().position(|row| row.is_selectable());
            }
            let max_offset = rows.len().saturating_sub(1);
            self.offset = self.offset.min(max_offset);
            self.ensure_visible();
        }

        self.sync_text();
    }

    fn ensure_visible(&mut self) {
        let height = usize::from(self.list_height);
        let Some(h) = self.highlighted else {
            return;
        };
        if height == 0 {
            return;
        }
        if h < self.offset {
            self.offset = h;
        } else if h >= self.offset + height {
            self.offset = h + 1 - height;
        }
    }

    fn sync_text(&mut self) {
        match self.settings.trigger_style {
            TriggerStyle::Button => self.search.set_text(self.store.search_text()),
            TriggerStyle::Input => trigger::sync_surface(&self.store, &mut self.search),
        }
    }

    fn drain_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            match change {
                Some(country) => {
                    info!(short_name = country.short_name(), "change delivered");
                    if self.settings.echo_controlled && self.store.is_controlled() {
                        let value = self.store.mode().value_of(&country).to_string();
                        self.store.set_controlled_value(value);
                    }
                }
                None => info!("change delivered: none"),
            }
        }
    }

    // ===== Rendering =====

    fn compute_layout(&self, screen: Rect) -> PickerLayout {
        let trigger = trigger_area(screen, self.settings.trigger_row);
        let dropdown = self.store.is_open().then(|| {
            let button = self.settings.trigger_style == TriggerStyle::Button;
            let header = DropdownHeader {
                hint: self.store.hint_text().is_some(),
                search: button,
                clear: button && !self.search.text().is_empty(),
            };
            let rows = build_rows(&self.store).len();
            dropdown_areas(screen, trigger, self.store.placement(), header, rows)
        });
        PickerLayout { trigger, dropdown }
    }

    /// Render a frame and remember its layout for hit testing.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let layout = self.compute_layout(self.screen());
        self.list_height = layout.dropdown.map_or(0, |d| d.list.height);
        self.ensure_visible();
        self.layout = Some(layout);

        let store = &self.store;
        let styles = &self.settings.styles;
        let search = &self.search;
        let input = self.settings.trigger_style == TriggerStyle::Input;
        let search_focused = self.focus == Focus::Search;
        let (highlighted, offset) = (self.highlighted, self.offset);

        self.terminal.draw(|frame| {
            let mut trigger = TriggerWidget::new(store, styles).focused(search_focused);
            if input {
                trigger = trigger.input(search);
            }
            frame.render_widget(trigger, layout.trigger);

            if let Some(areas) = layout.dropdown {
                let rows = build_rows(store);
                let mut dropdown = DropdownWidget::new(store, styles, &rows, areas)
                    .highlighted(highlighted)
                    .offset(offset);
                if !input {
                    dropdown = dropdown.search(search, search_focused);
                }
                frame.render_widget(dropdown, areas.outer);
            }
        })?;
        Ok(())
    }
}

/// Line printed on exit: `name=value` with a field name, else the bare value.
pub fn exit_line(store: &SelectionStore) -> String {
    match store.form_value() {
        Some(form) => format!("{}={}", form.name, form.value),
        None => store
            .selected_country()
            .map(|c| store.mode().value_of(c).to_string())
            .unwrap_or_default(),
    }
}

/// Initialize and run the picker until the user quits.
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on
/// exit. Returns the exit line. Logging must be initialized by the caller.
pub fn run(
    store: SelectionStore,
    settings: ViewSettings,
    pending_catalog: Option<(CountryCatalog, Duration)>,
) -> Result<String, TuiError> {
    let mut app = TuiApp::new(store, settings)?;
    if let Some((catalog, delay)) = pending_catalog {
        app.schedule_catalog(catalog, Instant::now() + delay);
    }

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result.map(|()| exit_line(app.store()))
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
