//! Terminal key events → engine key events.
//!
//! The engine only needs two things from a keypress: the printable symbol
//! (for stereo placement) and a logical name (for picking a special sound).

use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, ModifierKeyCode};

/// One keydown as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Printable character, if the key produces one
    pub symbol: Option<char>,
    /// Logical key name, e.g. "a", "space", "enter", "cmd"
    pub name: String,
}

impl KeyEvent {
    pub fn new(symbol: Option<char>, name: &str) -> Self {
        Self {
            symbol,
            name: name.to_owned(),
        }
    }

    /// A printable character; its logical name is the character itself.
    pub fn char(c: char) -> Self {
        Self {
            symbol: Some(c),
            name: c.to_string(),
        }
    }

    /// A key without a printable symbol.
    pub fn named(name: &str) -> Self {
        Self::new(None, name)
    }
}

/// What the capture loop should do with a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Trigger a sound
    Play(KeyEvent),
    /// Stop capturing
    Quit,
    /// Releases, repeats and keys without a name
    Ignore,
}

/// Map a terminal key event to a capture action. ESC quits.
///
/// Only presses count: a held key does not retrigger on autorepeat.
pub fn classify(event: &TermKeyEvent) -> KeyAction {
    if event.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    if event.code == KeyCode::Esc {
        return KeyAction::Quit;
    }
    match map_key(event.code) {
        Some(key) => KeyAction::Play(key),
        None => KeyAction::Ignore,
    }
}

/// Translate a key code into the (symbol, logical name) pair.
pub fn map_key(code: KeyCode) -> Option<KeyEvent> {
    let name = match code {
        KeyCode::Char(' ') => return Some(KeyEvent::new(Some(' '), "space")),
        KeyCode::Char(c) => return Some(KeyEvent::char(c)),
        KeyCode::Enter => "enter",
        KeyCode::Tab | KeyCode::BackTab => "tab",
        KeyCode::Backspace => "backspace",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "page_up",
        KeyCode::PageDown => "page_down",
        KeyCode::CapsLock => "caps_lock",
        KeyCode::Esc => "esc",
        KeyCode::F(n) => return Some(KeyEvent::named(&format!("f{n}"))),
        KeyCode::Modifier(modifier) => modifier_name(modifier),
        _ => return None,
    };
    Some(KeyEvent::named(name))
}

fn modifier_name(modifier: ModifierKeyCode) -> &'static str {
    match modifier {
        ModifierKeyCode::LeftSuper
        | ModifierKeyCode::RightSuper
        | ModifierKeyCode::LeftMeta
        | ModifierKeyCode::RightMeta => "cmd",
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "shift",
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "ctrl",
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "alt",
        _ => "modifier",
    }
}
