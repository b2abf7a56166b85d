use crossterm::event::KeyCode;

use crate::app::{Action, AppState, TaskField};

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    if key == KeyCode::Esc {
        state.close_task_form();
        return None;
    }

    let form = state.task_form.as_mut()?;

    match key {
        KeyCode::Enter => return Some(Action::SubmitTaskForm),
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left | KeyCode::Right if form.active_field == TaskField::Color => form.cycle_color(),
        KeyCode::Backspace => {
            form.error = None;
            match form.active_field {
                TaskField::Title => {
                    form.title.pop();
                }
                TaskField::DueDate => {
                    form.due_date.pop();
                }
                TaskField::StartTime => {
                    form.start_time.pop();
                }
                TaskField::EndTime => {
                    form.end_time.pop();
                }
                TaskField::Color => form.color = None,
            }
        }
        KeyCode::Char(c) => {
            form.error = None;
            match form.active_field {
                TaskField::Title => form.title.push(c),
                TaskField::DueDate => {
                    if (c.is_ascii_digit() || c == '-') && form.due_date.len() < 10 {
                        form.due_date.push(c);
                    }
                }
                TaskField::StartTime => {
                    if (c.is_ascii_digit() || c == ':') && form.start_time.len() < 5 {
                        form.start_time.push(c);
                    }
                }
                TaskField::EndTime => {
                    if (c.is_ascii_digit() || c == ':') && form.end_time.len() < 5 {
                        form.end_time.push(c);
                    }
                }
                TaskField::Color => {
                    if c == ' ' {
                        form.cycle_color();
                    }
                }
            }
        }
        _ => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::task::{TaskColor, TaskDraft};
    use chrono::NaiveDate;

    fn setup_state_with_form() -> AppState {
        let mut state = AppState::new();
        state.open_task_form(&TaskDraft::new("Essay"));
        state
    }

    fn active_field(state: &AppState) -> TaskField {
        state.task_form.as_ref().unwrap().active_field
    }

    #[test]
    fn tab_moves_to_next_field() {
        let mut state = setup_state_with_form();
        assert_eq!(active_field(&state), TaskField::Title);

        handle_key(KeyCode::Tab, &mut state);

        assert_eq!(active_field(&state), TaskField::DueDate);
    }

    #[test]
    fn backtab_wraps_to_color() {
        let mut state = setup_state_with_form();

        handle_key(KeyCode::BackTab, &mut state);

        assert_eq!(active_field(&state), TaskField::Color);
    }

    #[test]
    fn chars_append_to_title() {
        let mut state = setup_state_with_form();

        handle_key(KeyCode::Char('!'), &mut state);
        handle_key(KeyCode::Backspace, &mut state);
        handle_key(KeyCode::Backspace, &mut state);

        assert_eq!(state.task_form.as_ref().unwrap().title, "Essa");
    }

    #[test]
    fn date_field_accepts_only_date_characters() {
        let mut state = setup_state_with_form();
        handle_key(KeyCode::Tab, &mut state);

        for c in "2024-x03-01".chars() {
            handle_key(KeyCode::Char(c), &mut state);
        }

        let form = state.task_form.as_ref().unwrap();
        assert_eq!(form.due_date, "2024-03-01");
        assert_eq!(form.to_draft().unwrap().due_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn time_field_is_limited_to_five_characters() {
        let mut state = setup_state_with_form();
        handle_key(KeyCode::Tab, &mut state);
        handle_key(KeyCode::Tab, &mut state);

        for c in "09:300".chars() {
            handle_key(KeyCode::Char(c), &mut state);
        }

        assert_eq!(state.task_form.as_ref().unwrap().start_time, "09:30");
    }

    #[test]
    fn space_cycles_color() {
        let mut state = setup_state_with_form();
        handle_key(KeyCode::BackTab, &mut state);

        handle_key(KeyCode::Char(' '), &mut state);

        assert_eq!(state.task_form.as_ref().unwrap().color, Some(TaskColor::Blue));
    }

    #[test]
    fn enter_submits_form() {
        let mut state = setup_state_with_form();

        assert_eq!(handle_key(KeyCode::Enter, &mut state), Some(Action::SubmitTaskForm));
    }

    #[test]
    fn escape_discards_form() {
        let mut state = setup_state_with_form();

        handle_key(KeyCode::Esc, &mut state);

        assert!(state.task_form.is_none());
        assert_eq!(state.mode, Mode::Normal);
    }
}
