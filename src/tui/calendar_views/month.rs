use agile_board::{
    app::AppState,
    ui::month_view,
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
    let layout = month_view::calculate_layout(&app.calendar, events, today);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(app.calendar.title(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(
            layout
                .weekday_labels
                .iter()
                .map(|label| Span::styled(format!(" {} ", label), Style::default().fg(app.theme.weekday_header)))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();

        for day_cell in &week.days {
            let marker = if day_cell.has_events() { "•" } else { " " };
            let day_text = format!(" {:>2}{} ", day_cell.date.day(), marker);

            let mut style = Style::default();

            if !day_cell.is_current_month {
                style = style.fg(app.theme.muted);
            } else if day_cell.is_selected {
                style = style.bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD);
            } else if day_cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            }

            if day_cell.has_events() {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(day_text, style));
        }

        lines.push(Line::from(day_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Navigate | "),
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" = Add task | "),
        Span::styled("n/p", Style::default().fg(Color::Cyan)),
        Span::raw(" = Month | "),
        Span::styled("m/w/d/A", Style::default().fg(Color::Cyan)),
        Span::raw(" = Views"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Month "));
    f.render_widget(content, area);
}
