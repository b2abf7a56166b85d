use agile_board::app::{AppState, TaskField};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::presentation::{centered, task_color};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.task_form else {
        return;
    };

    let form_area = centered(f.size(), 70, 18);
    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label = |text: &'static str, field: TaskField| {
        Span::styled(text, Style::default().fg(if form.active_field == field { active_color } else { inactive_color }))
    };
    let hint = |text: &'static str, field: TaskField| {
        Span::styled(if form.active_field == field { text } else { "" }, Style::default().fg(Color::DarkGray))
    };

    let form_title = if form.is_editing() { "Edit Task" } else { "Create New Task" };
    let color_name = form.color.map(|c| c.as_str()).unwrap_or("none");

    let mut form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![label("Title: ", TaskField::Title), Span::raw(form.title.as_str())]),
        Line::from(""),
        Line::from(vec![
            label("Due date: ", TaskField::DueDate),
            Span::raw(form.due_date.as_str()),
            hint(" (YYYY-MM-DD, empty for none)", TaskField::DueDate),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Start time: ", TaskField::StartTime),
            Span::raw(form.start_time.as_str()),
            hint(" (HH:MM)", TaskField::StartTime),
        ]),
        Line::from(""),
        Line::from(vec![
            label("End time: ", TaskField::EndTime),
            Span::raw(form.end_time.as_str()),
            hint(" (HH:MM)", TaskField::EndTime),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Color: ", TaskField::Color),
            Span::styled(color_name, Style::default().fg(task_color(form.color))),
            hint(" (Space or arrows to change)", TaskField::Color),
        ]),
        Line::from(""),
    ];

    match &form.error {
        Some(error) => form_text.push(Line::from(vec![Span::styled(error.as_str(), Style::default().fg(app.theme.error))])),
        None => form_text.push(Line::from("")),
    }

    form_text.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" = Next field | "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(" = Save | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" = Cancel"),
    ]));

    let block_title = if form.is_editing() { " Edit Task " } else { " New Task " };

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
