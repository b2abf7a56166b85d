use agile_board::app::AppState;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::presentation::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let help_height = 23;
    let help_area = centered(f.size(), 62, help_height);

    f.render_widget(Clear, help_area);

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().fg(app.theme.help_section))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("agile-board Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        section("General:"),
        Line::from("  Tab/S-Tab - Next/previous view"),
        Line::from("  F1-F3     - Kanban/Calendar/Profile"),
        Line::from("  r         - Reload tasks"),
        Line::from("  Esc       - Dismiss notification"),
        Line::from("  q         - Quit (signs out)"),
        Line::from(""),
        section("Kanban:"),
        Line::from("  h/l       - Previous/next column"),
        Line::from("  Home/End  - First/last column"),
        Line::from("  j/k       - Select task"),
        Line::from("  a         - Add task"),
        Line::from("  e/Enter   - Edit selected task"),
        Line::from("  x         - Delete selected task"),
        Line::from("  < / >     - Move back to To do / forward to Done"),
        Line::from("  [ / ]     - Move to left/right column"),
        Line::from("  1-3       - Move to column"),
        Line::from(""),
        section("Calendar:"),
        Line::from("  h/l       - Previous/next day"),
        Line::from("  j/k       - Next/previous week or hour"),
        Line::from("  J/K       - Select task on the day"),
        Line::from("  n/p       - Next/previous period"),
        Line::from("  t         - Jump to today"),
        Line::from("  m/w/d/A   - Month/Week/Day/Agenda"),
        Line::from("  v         - Cycle views"),
        Line::from("  Enter/a   - New task in selected slot"),
        Line::from("  e / x     - Edit/delete selected task"),
        Line::from(""),
        section("Profile:"),
        Line::from("  y         - Copy user ID"),
        Line::from("  o         - Log out"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :q        - Quit"),
        Line::from("  :reload   - Fetch tasks again"),
        Line::from("  :new      - Create task (:new [title])"),
        Line::from("  :goto     - Jump to date (:goto 2025-12-25)"),
        Line::from("  :tab      - Switch view (:tab calendar)"),
        Line::from("  :theme    - Change theme (:theme gruvbox)"),
        Line::from("  :logout   - Sign out"),
        Line::from("  :help     - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
