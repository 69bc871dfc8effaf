//! Tests for the picker TUI driven through TestBackend.

use super::*;
use crate::model::{PickerOptions, SelectorMode};
use crate::state::rows::HOT_LIST_TITLE;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::backend::TestBackend;

const MS: Duration = Duration::from_millis(1);

fn catalog() -> CountryCatalog {
    CountryCatalog::new(
        vec![
            Country::new(1, "台灣", "Taiwan", "TW", "886"),
            Country::new(5, "美國", "United States", "US", "1"),
        ],
        vec![
            Country::new(2, "日本", "Japan", "JP", "81"),
            Country::new(3, "法國", "France", "FR", "33"),
            Country::new(1, "台灣", "Taiwan", "TW", "886"),
            Country::new(4, "泰國", "Thailand", "TH", "66"),
            Country::new(5, "美國", "United States", "US", "1"),
        ],
    )
}

fn settings(style: TriggerStyle) -> ViewSettings {
    ViewSettings {
        trigger_style: style,
        styles: PickerStyles::new(ColorConfig::disabled()),
        ..ViewSettings::default()
    }
}

fn app_with(store: SelectionStore, settings: ViewSettings) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
    let mut app = TuiApp::with_terminal(terminal, store, settings);
    app.draw().unwrap();
    app
}

fn app(options: PickerOptions) -> TuiApp<TestBackend> {
    app_with(
        SelectionStore::new(options, catalog()),
        settings(TriggerStyle::Button),
    )
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode, now: Instant) -> bool {
    let quit = app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    app.draw().unwrap();
    quit
}

fn type_str(app: &mut TuiApp<TestBackend>, text: &str, now: Instant) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch), now);
    }
}

fn click(app: &mut TuiApp<TestBackend>, column: u16, row: u16, now: Instant) {
    app.handle_mouse(
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
        now,
    );
    app.draw().unwrap();
}

fn screen_text(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let area = buffer.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

// ===== Rendering =====

#[test]
fn closed_picker_shows_placeholder_only() {
    let app = app(PickerOptions::default());
    let text = screen_text(&app);
    assert!(text.contains("Select dial code"));
    assert!(!text.contains(HOT_LIST_TITLE));
}

#[test]
fn opening_shows_hot_list_and_groups() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);

    assert!(app.store().is_open());
    let text = screen_text(&app);
    assert!(text.contains(HOT_LIST_TITLE));
    assert!(text.contains("Taiwan (TW)  +886"));
    assert!(text.contains("France (FR)  +33"));
    assert_eq!(app.highlighted(), Some(1));
}

#[test]
fn selected_value_is_shown_on_trigger() {
    let app = app(PickerOptions::new(SelectorMode::Nationality).with_default_value("JP"));
    assert!(screen_text(&app).contains("Japan (JP)"));
}

// ===== Keyboard =====

#[test]
fn typing_then_enter_commits_first_match() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "jp", now);

    assert_eq!(app.store().search_text(), "jp");
    assert_eq!(app.search_box().text(), "jp");

    press(&mut app, KeyCode::Enter, now);
    assert!(!app.store().is_open());
    assert_eq!(exit_line(app.store()), "81");
    assert!(screen_text(&app).contains("+81"));
    assert_eq!(app.search_box().text(), "");
}

#[test]
fn escape_clears_search_then_closes_then_quits() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "x", now);

    assert!(!press(&mut app, KeyCode::Esc, now));
    assert!(app.store().is_open());
    assert_eq!(app.store().search_text(), "");

    assert!(!press(&mut app, KeyCode::Esc, now));
    assert!(!app.store().is_open());

    assert!(press(&mut app, KeyCode::Esc, now));
}

#[test]
fn arrows_move_over_selectable_rows() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);

    // 0 title, 1 TW, 2 US, 3 "F", 4 FR
    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.highlighted(), Some(2));
    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.highlighted(), Some(4));
    press(&mut app, KeyCode::Up, now);
    assert_eq!(app.highlighted(), Some(2));

    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(exit_line(app.store()), "33");
}

#[test]
fn highlight_follows_search_results() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "t", now);
    app.on_tick(now + 500 * MS);

    let rows = build_rows(app.store());
    let highlighted = app.highlighted().and_then(|i| rows.get(i));
    assert!(highlighted.is_some_and(|row| row.is_selectable()));
}

#[test]
fn tab_blur_commits_after_grace_period() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "fr", now);
    press(&mut app, KeyCode::Tab, now);
    assert_eq!(app.focus(), Focus::List);

    app.on_tick(now + 199 * MS);
    assert!(app.store().is_open());

    app.on_tick(now + 200 * MS);
    assert!(!app.store().is_open());
    assert_eq!(exit_line(app.store()), "33");
    assert_eq!(app.focus(), Focus::Search);
}

#[test]
fn refocusing_search_cancels_blur_commit() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "fr", now);
    press(&mut app, KeyCode::Tab, now);
    press(&mut app, KeyCode::Tab, now);

    app.on_tick(now + 300 * MS);
    assert!(app.store().is_open());
    assert_eq!(app.store().search_text(), "fr");
}

#[test]
fn disabled_picker_ignores_open() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default().disabled(true));
    press(&mut app, KeyCode::Enter, now);
    assert!(!app.store().is_open());
}

// ===== Mouse =====

#[test]
fn clicking_trigger_toggles() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    let trigger = app.layout().unwrap().trigger;

    click(&mut app, trigger.x + 1, trigger.y + 1, now);
    assert!(app.store().is_open());
    click(&mut app, trigger.x + 1, trigger.y + 1, now);
    assert!(!app.store().is_open());
}

#[test]
fn clicking_list_line_selects_country() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);

    let list = app.layout().unwrap().dropdown.unwrap().list;
    click(&mut app, list.x + 2, list.y + 2, now);

    assert!(!app.store().is_open());
    assert_eq!(exit_line(app.store()), "1");
}

#[test]
fn clicking_title_row_keeps_dropdown_open() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);

    let list = app.layout().unwrap().dropdown.unwrap().list;
    click(&mut app, list.x + 2, list.y, now);
    assert!(app.store().is_open());
}

#[test]
fn clear_button_empties_search_and_stays_open() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "ja", now);

    let clear = app.layout().unwrap().dropdown.unwrap().clear.unwrap();
    click(&mut app, clear.x, clear.y, now);

    assert!(app.store().is_open());
    assert_eq!(app.store().search_text(), "");
    assert_eq!(app.focus(), Focus::Search);
}

#[test]
fn outside_click_commits_search_match() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default());
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "ja", now);

    click(&mut app, 59, 29, now);
    assert!(!app.store().is_open());
    assert_eq!(exit_line(app.store()), "81");
}

// ===== Owner behaviour =====

#[test]
fn controlled_picker_echoes_committed_value() {
    let now = Instant::now();
    let mut app = app(PickerOptions::default().controlled("886"));
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "fr", now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.store().resolved_value(), Some("33"));
    assert!(screen_text(&app).contains("+33"));
}

#[test]
fn controlled_picker_without_echo_keeps_owner_value() {
    let now = Instant::now();
    let store = SelectionStore::new(PickerOptions::default().controlled("886"), catalog());
    let mut app = app_with(
        store,
        ViewSettings {
            echo_controlled: false,
            ..settings(TriggerStyle::Button)
        },
    );
    press(&mut app, KeyCode::Enter, now);
    type_str(&mut app, "fr", now);
    press(&mut app, KeyCode::Enter, now);

    assert!(!app.store().is_open());
    assert_eq!(app.store().resolved_value(), Some("886"));
}

#[test]
fn scheduled_catalog_replaces_skeletons() {
    let now = Instant::now();
    let mut store = SelectionStore::new(PickerOptions::default(), CountryCatalog::empty());
    store.set_external_loading(Some(true));
    let mut app = app_with(store, settings(TriggerStyle::Button));
    app.schedule_catalog(catalog(), now + 300 * MS);
    assert_eq!(app.next_wakeup(), Some(now + 300 * MS));

    press(&mut app, KeyCode::Enter, now);
    assert!(screen_text(&app).contains('░'));

    app.on_tick(now + 300 * MS);
    app.draw().unwrap();
    assert!(!app.store().is_loading());
    assert!(screen_text(&app).contains("Taiwan (TW)"));
    assert_eq!(app.next_wakeup(), None);
}

#[test]
fn exit_line_uses_field_name_when_present() {
    let store = SelectionStore::new(
        PickerOptions::default()
            .with_field_name("phone_prefix")
            .with_default_value("886"),
        catalog(),
    );
    assert_eq!(exit_line(&store), "phone_prefix=886");

    let bare = SelectionStore::new(PickerOptions::default().with_default_value("886"), catalog());
    assert_eq!(exit_line(&bare), "886");
}

// ===== Input trigger =====

#[test]
fn input_trigger_edits_in_place() {
    let now = Instant::now();
    let store = SelectionStore::new(PickerOptions::default().with_default_value("886"), catalog());
    let mut app = app_with(store, settings(TriggerStyle::Input));
    assert_eq!(app.search_box().text(), "+886");

    press(&mut app, KeyCode::Enter, now);
    assert!(app.store().is_open());
    assert!(app.layout().unwrap().dropdown.unwrap().search.is_none());

    type_str(&mut app, "j", now);
    assert_eq!(app.store().search_text(), "j");
    assert_eq!(app.search_box().text(), "j");

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(exit_line(app.store()), "81");
    assert_eq!(app.search_box().text(), "+81");
}
