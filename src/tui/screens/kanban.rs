use agile_board::{
    app::AppState,
    task::TaskStatus,
    views::kanban::progress,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::tui::presentation::task_color;

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    for (index, status) in TaskStatus::ALL.iter().enumerate() {
        render_column(f, app, *status, columns[index]);
    }

    render_progress(f, app, rows[1]);
}

fn render_column(f: &mut Frame, app: &AppState, status: TaskStatus, area: Rect) {
    let focused = app.kanban.focused_status() == status;
    let tasks = app.tasks.with_status(status);

    let mut lines = Vec::new();
    if tasks.is_empty() {
        lines.push(Line::from(vec![Span::styled("No tasks", Style::default().fg(Color::DarkGray))]));
    }

    for (row, task) in tasks.iter().enumerate() {
        let is_selected = focused && row == app.kanban.selected_row();
        let cursor = if is_selected { ">" } else { " " };
        let title_style = if is_selected {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
            Span::styled("▌", Style::default().fg(task_color(task.color))),
            Span::styled(task.title.as_str(), title_style),
        ]));

        if let Some(due) = task.due_date {
            let mut when = format!("   {}", due.format(&app.date_format));
            if let Some(start) = task.start_time {
                when.push_str(&format!(" {}", app.format_time(start)));
            }
            lines.push(Line::from(vec![Span::styled(when, Style::default().fg(Color::DarkGray))]));
        }
    }

    let border_style = if focused {
        Style::default().fg(app.theme.column(status))
    } else {
        Style::default()
    };

    let column = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ({}) ", status.label(), tasks.len())),
    );
    f.render_widget(column, area);
}

fn render_progress(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Progress ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let entries = progress(&app.tasks.counts());
    let constraints: Vec<Constraint> = entries.iter().map(|_| Constraint::Length(1)).collect();
    let bars = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (entry, bar_area) in entries.iter().zip(bars.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(app.theme.column(entry.status)))
            .percent(entry.percent)
            .label(format!("{}: {} ({}%)", entry.status.label(), entry.count, entry.percent));
        f.render_widget(gauge, *bar_area);
    }
}
