use agile_board::{
    app::AppState,
    ui::week_view,
    views::CalendarEvent,
};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(f: &mut Frame, app: &AppState, events: &[CalendarEvent], today: NaiveDate, area: Rect) {
    let layout = week_view::calculate_layout(&app.calendar, events, today);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(app.calendar.title(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    let mut header_spans = vec![Span::styled("      ", Style::default())];

    for day in &layout.days {
        let day_str = format!(" {:>3} {:<2} ", day.date.format("%a"), day.date.day());

        let style = if day.is_selected {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg)
        } else if day.is_today {
            Style::default().fg(app.theme.today).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.weekday_header)
        };

        header_spans.push(Span::styled(day_str, style));
    }

    lines.push(Line::from(header_spans));

    let mut all_day_spans = vec![Span::styled("all   ", Style::default().fg(Color::Gray))];
    for day in &layout.days {
        let cell = if day.all_day.is_empty() {
            "        ".to_string()
        } else {
            format!("{:>8}", day.all_day.len())
        };
        all_day_spans.push(Span::raw(cell));
    }
    lines.push(Line::from(all_day_spans));
    lines.push(Line::from(""));

    for hour in 6..22 {
        let is_selected_hour = hour == app.calendar.selected_hour;
        let time_style = if is_selected_hour {
            Style::default().fg(app.theme.selected_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut line_spans = vec![Span::styled(format!("{:02}:00 ", hour), time_style)];

        for day in &layout.days {
            let count: usize = day
                .slots
                .iter()
                .filter(|slot| slot.hour == hour)
                .map(|slot| slot.events.len())
                .sum();

            let cell = if count > 0 {
                Span::styled(format!("{:>8}", count), Style::default().fg(app.theme.due_marker))
            } else if is_selected_hour && day.is_selected {
                Span::styled(format!("{:>8}", "+"), Style::default().fg(app.theme.selected_bg))
            } else {
                Span::raw("        ")
            };

            line_spans.push(cell);
        }

        lines.push(Line::from(line_spans));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Week "));
    f.render_widget(content, area);
}
