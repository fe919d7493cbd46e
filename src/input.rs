//! Terminal key and focus events to runner input.

use crate::runner::InputEvent;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the host should do with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Game(InputEvent),
    Quit,
    Ignore,
}

/// Map a terminal event. Terminals without key-release reporting only ever
/// send presses; the host synthesizes releases for those.
pub fn map_event(event: &Event) -> HostAction {
    match event {
        Event::Key(key) => map_key(key),
        Event::FocusLost => HostAction::Game(InputEvent::FocusLost),
        Event::FocusGained => HostAction::Game(InputEvent::FocusGained),
        _ => HostAction::Ignore,
    }
}

pub fn map_key(key: &KeyEvent) -> HostAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HostAction::Quit;
    }

    let released = key.kind == KeyEventKind::Release;
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => HostAction::Game(if released {
            InputEvent::JumpReleased
        } else {
            InputEvent::JumpPressed
        }),
        _ if released => HostAction::Ignore,
        KeyCode::Down => HostAction::Game(InputEvent::DropPressed),
        KeyCode::Enter => HostAction::Game(InputEvent::RestartRequested),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => HostAction::Quit,
        KeyCode::Char(c) => HostAction::Game(InputEvent::Typed(c)),
        _ => HostAction::Ignore,
    }
}
