use agile_board::app::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Toast in the top right corner; Esc dismisses it.
pub fn render(f: &mut Frame, app: &AppState) {
    let Some(notification) = &app.notification else {
        return;
    };

    let area = f.size();
    let width = 50.min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(width),
        y: area.y,
        width,
        height: 4.min(area.height),
    };

    f.render_widget(Clear, toast_area);

    let color = if notification.is_error { app.theme.error } else { app.theme.success };
    let toast = Paragraph::new(vec![Line::from(vec![
        Span::styled(notification.message.as_str(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Left)
    .block(Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" Esc to dismiss ")
        .style(Style::default().bg(Color::Black)));

    f.render_widget(toast, toast_area);
}
