use agile_board::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let lines = match &app.profile {
        None => vec![Line::from(vec![Span::styled("Loading profile...", Style::default().fg(Color::DarkGray))])],
        Some(profile) => vec![
            Line::from(vec![Span::styled("Profile", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Email:   ", Style::default().fg(app.theme.help_section)),
                Span::raw(profile.email.as_str()),
            ]),
            Line::from(vec![
                Span::styled("User ID: ", Style::default().fg(app.theme.help_section)),
                Span::raw(profile.user_id.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Avatar:  ", Style::default().fg(app.theme.help_section)),
                Span::styled(profile.avatar_url.as_str(), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Cyan)),
                Span::raw(" = Copy user ID | "),
                Span::styled("o", Style::default().fg(Color::Red)),
                Span::raw(" = Log out"),
            ]),
        ],
    };

    let content = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
