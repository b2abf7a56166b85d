pub mod agenda;
pub mod day;
pub mod event_list;
pub mod month;
pub mod week;

use agile_board::{app::AppState, views::CalendarMode};
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let events = app.events();
    let today = Local::now().date_naive();

    if app.calendar.mode == CalendarMode::Agenda {
        agenda::render(f, app, &events, today, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(area);

    match app.calendar.mode {
        CalendarMode::Month => month::render(f, app, &events, today, chunks[0]),
        CalendarMode::Week => week::render(f, app, &events, today, chunks[0]),
        CalendarMode::Day | CalendarMode::Agenda => day::render(f, app, &events, today, chunks[0]),
    }

    event_list::render(f, app, &events, chunks[1]);
}
