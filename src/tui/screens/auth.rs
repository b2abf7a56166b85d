use agile_board::{
    app::{AppState, AuthField},
    gate::Route,
};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::presentation::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let signup = app.route() == Route::Signup;
    let form = if signup { &app.signup_form } else { &app.login_form };

    let area = centered(f.size(), 60, 16);
    f.render_widget(Clear, area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label_style = |field: AuthField| {
        Style::default().fg(if form.active_field == field { active_color } else { inactive_color })
    };

    let (heading, submit_label, switch_text) = if signup {
        ("Create an account", "Sign up", "Already have an account? Log in")
    } else {
        ("Log in to your board", "Log in", "No account yet? Sign up")
    };

    let mut lines = vec![
        Line::from(vec![Span::styled(heading, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Email:    ", label_style(AuthField::Email)),
            Span::raw(&form.email),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", label_style(AuthField::Password)),
            Span::raw(form.masked_password()),
        ]),
        Line::from(""),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::from(vec![Span::styled(error, Style::default().fg(app.theme.error))]));
    } else if let Some(message) = &form.message {
        lines.push(Line::from(vec![Span::styled(message, Style::default().fg(app.theme.success))]));
    } else if form.submitting {
        lines.push(Line::from(vec![Span::styled("Please wait...", Style::default().fg(Color::DarkGray))]));
    } else {
        lines.push(Line::from(""));
    }

    lines.extend([
        Line::from(""),
        Line::from(vec![Span::styled(switch_text, label_style(AuthField::Switch).add_modifier(Modifier::UNDERLINED))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" = Next field | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(format!(" = {} | ", submit_label)),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Quit"),
        ]),
    ]);

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", submit_label)))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}
