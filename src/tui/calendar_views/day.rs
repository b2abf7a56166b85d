use agile_board::{
    app::AppState,
    ui::day_view,
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

pub fn render(f: &mut Frame, app: &AppState, events: &[CalendarEvent], today: NaiveDate, area: Rect) {
    let layout = day_view::calculate_layout(&app.calendar, events, today);

    let title_style = if layout.is_today {
        Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(app.calendar.title(), title_style)]),
        Line::from(""),
    ];

    for entry in &layout.all_day {
        lines.push(Line::from(vec![
            Span::styled("All day ", Style::default().fg(Color::Yellow)),
            Span::styled(entry.title.as_str(), Style::default().fg(Color::White)),
            Span::styled(format!(" [{}]", entry.status.label()), Style::default().fg(Color::DarkGray)),
        ]));
    }
    if !layout.all_day.is_empty() {
        lines.push(Line::from(""));
    }

    for hour_block in &layout.hours {
        if hour_block.events.is_empty() && !hour_block.is_selected {
            continue;
        }

        let label_style = if hour_block.is_selected {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![Span::styled(format!("{:02}:00", hour_block.hour), label_style)]));

        for event in &hour_block.events {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:02}:{:02}", hour_block.hour, event.start_minute), Style::default().fg(Color::Green)),
                Span::raw(" "),
                Span::styled(event.title.as_str(), Style::default().fg(Color::White)),
                Span::styled(format!(" ({}m)", event.duration_minutes), Style::default().fg(Color::DarkGray)),
            ]));
        }
    }

    if layout.all_day.is_empty() && layout.hours.iter().all(|h| h.events.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("No tasks scheduled. Press Enter to add one at the selected hour.", Style::default().fg(Color::DarkGray)),
        ]));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Day "));
    f.render_widget(content, area);
}
