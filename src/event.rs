//! Terminal input (crossterm) and key bindings

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::layout::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveDown,
    MoveUp,
    /// Press whichever control the side currently shows
    PressPane(Side),
    /// Icon-rail shortcut for the side
    Shortcut(Side),
    TogglePin,
    NextLocale,
    ToggleHelp,
    None,
}

pub fn key_to_action(key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('[') => Action::PressPane(Side::Left),
        KeyCode::Char(']') => Action::PressPane(Side::Right),
        KeyCode::Char('1') => Action::Shortcut(Side::Left),
        KeyCode::Char('2') => Action::Shortcut(Side::Right),
        KeyCode::Char('p') => Action::TogglePin,
        KeyCode::Char('l') => Action::NextLocale,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Wait up to `timeout` for input. Timeouts surface as [`AppEvent::Tick`];
/// events we do not handle (mouse, key release) as `None`.
pub fn poll_event(timeout: Duration) -> io::Result<Option<AppEvent>> {
    if !event::poll(timeout)? {
        return Ok(Some(AppEvent::Tick));
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
        Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
        _ => Ok(None),
    }
}
