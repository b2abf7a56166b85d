use agile_board::{
    app::{AppState, Mode, SyncStatus, Tab},
    gate::Route,
    task::TaskColor,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::tui::{calendar_views, dialogs, screens};

pub fn ui(f: &mut Frame, app: &AppState) {
    match app.route() {
        Route::Login | Route::Signup => screens::auth::render(f, app),
        Route::Dashboard => render_dashboard(f, app),
    }

    if app.notification.is_some() {
        dialogs::notification::render(f, app);
    }
}

fn render_dashboard(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" {} ", tab.label())))
        .collect();
    let selected = Tab::ALL.iter().position(|tab| *tab == app.tab).unwrap_or(0);
    let user = app.gate.user().map(|u| u.display_email().to_string()).unwrap_or_default();

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(app.theme.muted))
        .highlight_style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .divider("|")
        .block(Block::default().borders(Borders::ALL).title(format!(" agile-board - {} ", user)));
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::Kanban => screens::kanban::render(f, app, chunks[1]),
        Tab::Calendar => calendar_views::render(f, app, chunks[1]),
        Tab::Profile => screens::profile::render(f, app, chunks[1]),
    }

    render_status_bar(f, app, chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.task_form.is_some() {
        dialogs::task_form::render(f, app);
    }

    if app.delete_confirmation_task_id.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}

fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let in_command = matches!(app.mode, Mode::Command);

    let status_text = if in_command {
        app.command_buffer.to_string()
    } else {
        let sync = match &app.sync_status {
            SyncStatus::Idle => "idle".to_string(),
            SyncStatus::Syncing => "syncing...".to_string(),
            SyncStatus::Synced => "synced".to_string(),
            SyncStatus::Error(e) => format!("error: {}", e),
        };
        format!(
            "Tasks: {} | Sync: {} | Tab/F1-F3 switch view, '?' for help, 'q' to quit",
            app.tasks.len(),
            sync
        )
    };

    let status_color = match (&app.sync_status, in_command) {
        (_, true) => app.theme.command_mode,
        (SyncStatus::Error(_), false) => app.theme.error,
        _ => app.theme.status_bar,
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if in_command { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

/// Terminal color for a task accent.
pub fn task_color(color: Option<TaskColor>) -> Color {
    match color {
        Some(TaskColor::Blue) => Color::Blue,
        Some(TaskColor::Green) => Color::Green,
        Some(TaskColor::Amber) => Color::Yellow,
        Some(TaskColor::Red) => Color::Red,
        Some(TaskColor::Purple) => Color::Magenta,
        Some(TaskColor::Gray) => Color::Gray,
        None => Color::White,
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
