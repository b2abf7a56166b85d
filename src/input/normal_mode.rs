use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Mode, Tab};
use crate::input::{calendar_keys, kanban_keys};

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    if state.show_help {
        handle_help_keys(key, state);
        return None;
    }

    if state.dismiss_notification() && key == KeyCode::Esc {
        return None;
    }

    match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(':') => {
            enter_command_mode(state);
            None
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            None
        }
        KeyCode::Char('r') => Some(Action::Reload),
        KeyCode::Tab => Some(Action::SwitchTab(state.tab.next())),
        KeyCode::BackTab => Some(Action::SwitchTab(state.tab.previous())),
        KeyCode::F(n @ 1..=3) => Tab::ALL
            .get(n as usize - 1)
            .map(|tab| Action::SwitchTab(*tab)),
        _ => match state.tab {
            Tab::Kanban => kanban_keys::handle_key(key, state),
            Tab::Calendar => calendar_keys::handle_key(key, state),
            Tab::Profile => handle_profile_key(key),
        },
    }
}

fn handle_profile_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('y') => Some(Action::CopyUserId),
        KeyCode::Char('o') => Some(Action::Logout),
        _ => None,
    }
}

fn handle_help_keys(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            state.show_help = false;
            state.help_scroll = 0;
        }
        _ => {}
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}
