use agile_board::{
    app::AppState,
    views::{CalendarEvent, calendar::events_on},
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::presentation::task_color;

pub fn render(f: &mut Frame, app: &AppState, events: &[CalendarEvent], area: Rect) {
    let date = app.calendar.focused_date;
    let day_events = events_on(events, date);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Due on {}", date.format("%B %d, %Y")),
                Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if day_events.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("No tasks", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        let selected_base = Style::default().bg(app.theme.selected_bg).add_modifier(Modifier::BOLD);

        for (idx, event) in day_events.iter().enumerate() {
            let time_str = if event.all_day {
                "all day".to_string()
            } else {
                app.format_time(event.start.time())
            };
            let is_selected = idx == app.calendar.selected_event;

            let (time_style, title_style) = if is_selected {
                (selected_base.fg(Color::Black), selected_base.fg(Color::Black))
            } else {
                (Style::default().fg(Color::Green), Style::default().fg(task_color(event.color)))
            };

            let cursor = if is_selected { ">" } else { " " };

            lines.push(Line::from(vec![
                Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
                Span::styled(time_str, time_style),
                Span::raw(" "),
                Span::styled(event.title.as_str(), title_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(event.status.label(), Style::default().fg(Color::DarkGray)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("J/K", Style::default().fg(Color::Cyan)),
            Span::raw(" = Select | "),
            Span::styled("e", Style::default().fg(Color::Green)),
            Span::raw(" = Edit | "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(" = Delete"),
        ]));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
