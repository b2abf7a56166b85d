pub mod auth_mode;
pub mod calendar_keys;
pub mod command_mode;
pub mod confirm_mode;
pub mod insert_mode;
pub mod kanban_keys;
pub mod normal_mode;

use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Mode};
use crate::gate::Route;

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    match state.route() {
        Route::Login | Route::Signup => auth_mode::handle_key(key, state),
        Route::Dashboard => match state.mode {
            Mode::Normal => normal_mode::handle_key(key, state),
            Mode::Insert => insert_mode::handle_key(key, state),
            Mode::Command => command_mode::handle_key(key, state),
            Mode::Confirm => confirm_mode::handle_key(key, state),
        },
    }
}
