//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! The three configurable keys come from [`Keymap`]; the rest are fixed.
//!
//! | Key(s)                  | Event                  |
//! |-------------------------|------------------------|
//! | `q` *, `Ctrl+c`         | `Quit`                 |
//! | `/` *                   | `OpenSearch`           |
//! | `*` *                   | `OpenSearchWord`       |
//! | `↑` / `k`               | `Nav(Up)`              |
//! | `↓` / `j`               | `Nav(Down)`            |
//! | `PageUp`, `Ctrl+u`      | `PageUp`               |
//! | `PageDown`, `Ctrl+d`    | `PageDown`             |
//! | `g` / `G`               | `Top` / `Bottom`       |
//! | terminal resize         | `Resize(w, h)`         |
//!
//! \* configurable
//!
//! ## Picker mode
//!
//! While the search picker is open the loop calls [`to_app_event_picker`]
//! instead. Every printable character is forwarded as `Char`, arrow keys
//! produce `Nav`, and only `Ctrl+c`, `Escape`, `Enter` and `Backspace` keep
//! their special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use swiper_core::config::KeybindingsConfig;

/// Cardinal direction for cursor and list navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Open the interactive search with the remembered query.
    OpenSearch,
    /// Open the interactive search seeded with the word at the cursor.
    OpenSearchWord,
    Nav(Direction),
    PageUp,
    PageDown,
    Top,
    Bottom,
    /// A printable character forwarded to the picker input.
    Char(char),
    Backspace,
    Enter,
    Escape,
    Resize(u16, u16),
}

/// The configurable keys, resolved once from the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub search: char,
    pub search_word: char,
    pub quit: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

impl Keymap {
    pub fn from_config(bindings: &KeybindingsConfig) -> Self {
        Self {
            search: bindings.search_key(),
            search_word: bindings.search_word_key(),
            quit: bindings.quit_key(),
        }
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (document navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event, keymap: &Keymap) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key, keymap),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] while the picker is open.
pub fn to_app_event_picker(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_picker(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent, keymap: &Keymap) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    // Shifted symbols (`*`, uppercase letters) may or may not carry SHIFT
    // depending on the terminal.
    let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageDown),

        Char(c) if plain && c == keymap.quit => Some(AppEvent::Quit),
        Char(c) if plain && c == keymap.search => Some(AppEvent::OpenSearch),
        Char(c) if plain && c == keymap.search_word => Some(AppEvent::OpenSearchWord),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Home | Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Top),
        End => Some(AppEvent::Bottom),
        Char('G') if plain => Some(AppEvent::Bottom),

        Esc => Some(AppEvent::Escape),
        _ => None,
    }
}

fn map_key_picker(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),
        Char('p') if key.modifiers == Mod::CONTROL => Some(AppEvent::Nav(Direction::Up)),
        Char('n') if key.modifiers == Mod::CONTROL => Some(AppEvent::Nav(Direction::Down)),
        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace => Some(AppEvent::Backspace),
        Enter => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
