use crossterm::event::KeyCode;

use crate::app::{Action, AppState};
use crate::task::{TaskDraft, TaskStatus};
use crate::views::MoveTarget;

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.kanban.focus_previous_column(),
        KeyCode::Char('l') | KeyCode::Right => state.kanban.focus_next_column(),
        KeyCode::Home => state.kanban.focus_column(0),
        KeyCode::End => state.kanban.focus_column(TaskStatus::ALL.len() - 1),
        KeyCode::Char('j') | KeyCode::Down => state.kanban.select_next(&state.tasks),
        KeyCode::Char('k') | KeyCode::Up => state.kanban.select_previous(),
        KeyCode::Char('a') => state.open_task_form(&TaskDraft::default()),
        KeyCode::Char('e') | KeyCode::Enter => state.open_edit_form(),
        KeyCode::Char('x') => state.request_delete(),
        KeyCode::Char('<') | KeyCode::Char('H') => return move_selected(state, MoveTarget::Back),
        KeyCode::Char('>') | KeyCode::Char('L') => return move_selected(state, MoveTarget::Forward),
        KeyCode::Char('[') => return move_selected(state, MoveTarget::Left),
        KeyCode::Char(']') => return move_selected(state, MoveTarget::Right),
        KeyCode::Char(c @ '1'..='3') => {
            let column = c as usize - '1' as usize;
            return move_selected(state, MoveTarget::Column(column));
        }
        _ => {}
    }
    None
}

fn move_selected(state: &AppState, target: MoveTarget) -> Option<Action> {
    let (task_id, status) = state.kanban.move_request(&state.tasks, target)?;
    Some(Action::MoveTask { task_id, status })
}
