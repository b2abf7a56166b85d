use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Mode};

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let task_id = state.delete_confirmation_task_id.take();
            state.mode = Mode::Normal;
            task_id.map(Action::DeleteTask)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.delete_confirmation_task_id = None;
            state.mode = Mode::Normal;
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirming(task_id: &str) -> AppState {
        let mut state = AppState::new();
        state.delete_confirmation_task_id = Some(task_id.to_string());
        state.mode = Mode::Confirm;
        state
    }

    #[test]
    fn y_confirms_delete() {
        let mut state = confirming("7");

        assert_eq!(handle_key(KeyCode::Char('y'), &mut state), Some(Action::DeleteTask("7".to_string())));
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn n_cancels_delete() {
        let mut state = confirming("7");

        assert_eq!(handle_key(KeyCode::Char('n'), &mut state), None);
        assert!(state.delete_confirmation_task_id.is_none());
    }

    #[test]
    fn other_keys_keep_waiting() {
        let mut state = confirming("7");

        handle_key(KeyCode::Char('q'), &mut state);

        assert_eq!(state.mode, Mode::Confirm);
    }
}
