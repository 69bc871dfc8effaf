//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to picker actions.
///
/// Bindings differ by whether the dropdown is open: while open, printable
/// keys belong to the search box, so only non-printable keys are bound.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    closed: HashMap<KeyEvent, KeyAction>,
    open: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent, is_open: bool) -> Option<KeyAction> {
        let table = if is_open { &self.open } else { &self.closed };
        table.get(&normalize(key)).copied()
    }
}

/// Drop modifier and state noise that terminals add inconsistently.
fn normalize(key: KeyEvent) -> KeyEvent {
    let modifiers = match key.code {
        KeyCode::Char(_) => key.modifiers & KeyModifiers::CONTROL,
        _ => key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT),
    };
    KeyEvent::new(key.code, modifiers)
}

impl Default for KeyBindings {
    fn default() -> Self {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);

        let mut closed = HashMap::new();
        closed.insert(plain(KeyCode::Char(' ')), KeyAction::Open);
        closed.insert(plain(KeyCode::Enter), KeyAction::Open);
        closed.insert(plain(KeyCode::Down), KeyAction::Open);
        closed.insert(plain(KeyCode::Char('q')), KeyAction::Quit);
        closed.insert(plain(KeyCode::Esc), KeyAction::Quit);
        closed.insert(ctrl_c, KeyAction::Quit);

        let mut open = HashMap::new();
        open.insert(plain(KeyCode::Enter), KeyAction::Commit);
        open.insert(plain(KeyCode::Esc), KeyAction::Cancel);
        open.insert(plain(KeyCode::Tab), KeyAction::Blur);
        open.insert(plain(KeyCode::Up), KeyAction::HighlightPrev);
        open.insert(plain(KeyCode::Down), KeyAction::HighlightNext);
        open.insert(ctrl_c, KeyAction::Quit);

        Self { closed, open }
    }
}
