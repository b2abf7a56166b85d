use chrono::Local;
use crossterm::event::KeyCode;

use crate::app::{Action, AppState};
use crate::views::CalendarMode;

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.calendar.move_days(-1),
        KeyCode::Char('l') | KeyCode::Right => state.calendar.move_days(1),
        KeyCode::Char('j') | KeyCode::Down => match state.calendar.mode {
            CalendarMode::Month => state.calendar.move_days(7),
            CalendarMode::Week | CalendarMode::Day => state.calendar.next_hour(),
            CalendarMode::Agenda => state.calendar.move_days(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match state.calendar.mode {
            CalendarMode::Month => state.calendar.move_days(-7),
            CalendarMode::Week | CalendarMode::Day => state.calendar.previous_hour(),
            CalendarMode::Agenda => state.calendar.move_days(-1),
        },
        KeyCode::Char('J') => {
            let events = state.events();
            state.calendar.select_next_event(&events);
        }
        KeyCode::Char('K') => state.calendar.select_previous_event(),
        KeyCode::Char('n') | KeyCode::Char('}') => state.calendar.next_period(),
        KeyCode::Char('p') | KeyCode::Char('{') => state.calendar.previous_period(),
        KeyCode::Char('t') => state.calendar.jump_to_today(Local::now().date_naive()),
        KeyCode::Char('m') => state.calendar.set_mode(CalendarMode::Month),
        KeyCode::Char('w') => state.calendar.set_mode(CalendarMode::Week),
        KeyCode::Char('d') => state.calendar.set_mode(CalendarMode::Day),
        KeyCode::Char('A') => state.calendar.set_mode(CalendarMode::Agenda),
        KeyCode::Char('v') => state.calendar.cycle_mode(),
        KeyCode::Enter | KeyCode::Char('a') => {
            let draft = state.calendar.slot().draft();
            state.open_task_form(&draft);
        }
        KeyCode::Char('e') => state.open_edit_form(),
        KeyCode::Char('x') => state.request_delete(),
        _ => {}
    }
    None
}
