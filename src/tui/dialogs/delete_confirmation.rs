use agile_board::app::AppState;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::presentation::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(task) = app
        .delete_confirmation_task_id
        .as_deref()
        .and_then(|id| app.tasks.get(id))
    else {
        return;
    };

    let area = centered(f.size(), 56, 9);
    f.render_widget(Clear, area);

    let mut details = format!("in {}", task.status.label());
    if let Some(due) = task.due_date {
        details.push_str(&format!(", due {}", due.format(&app.date_format)));
    }

    let lines = vec![
        Line::from(vec![Span::styled(task.title.as_str(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(vec![Span::styled(details, Style::default().fg(app.theme.muted))]),
        Line::from(""),
        Line::from("The task is removed from the board and the calendar."),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)),
            Span::raw(" delete   "),
            Span::styled("n/Esc", Style::default().fg(app.theme.success)),
            Span::raw(" keep"),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error))
            .title(" Delete task? ")
            .style(Style::default().bg(Color::Black)));

    f.render_widget(dialog, area);
}
