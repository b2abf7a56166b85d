use agile_board::{
    app::AppState,
    ui::agenda_view,
    views::CalendarEvent,
};
use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::presentation::task_color;

pub fn render(f: &mut Frame, app: &AppState, events: &[CalendarEvent], today: NaiveDate, area: Rect) {
    let layout = agenda_view::calculate_layout(&app.calendar, events, today);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(app.calendar.title(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if layout.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Nothing due in this period", Style::default().fg(Color::DarkGray)),
        ]));
    }

    for day in &layout.days {
        let heading_style = if day.is_today {
            Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.help_section).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![Span::styled(day.date.format("%A, %B %d").to_string(), heading_style)]));

        for event in &day.events {
            let time_label = if event.all_day {
                "All day".to_string()
            } else {
                format!("{}-{}", app.format_time(event.start.time()), app.format_time(event.end.time()))
            };
            lines.push(Line::from(vec![
                Span::styled("  ▌", Style::default().fg(task_color(event.color))),
                Span::styled(format!("{:<17}", time_label), Style::default().fg(Color::Green)),
                Span::raw(event.title.as_str()),
                Span::styled(format!(" [{}]", event.status.label()), Style::default().fg(Color::DarkGray)),
            ]));
        }
        lines.push(Line::from(""));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Agenda "));
    f.render_widget(content, area);
}
