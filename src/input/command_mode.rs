use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{Action, AppState, Mode, Tab};
use crate::task::TaskDraft;
use crate::ui::theme::Theme;

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Reload,
    Goto(NaiveDate),
    NewTask(Option<String>),
    Theme(String),
    Tab(Tab),
    Logout,
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Commands must start with ':'".to_string());
    };
    let parts: Vec<&str> = command_text.split_whitespace().collect();

    let Some(name) = parts.first() else {
        return Command::Error("Empty command".to_string());
    };

    match *name {
        "q" | "quit" => Command::Quit,
        "reload" | "r" | "w" => Command::Reload,
        "help" => Command::Help,
        "logout" => Command::Logout,
        "goto" => match parts.get(1) {
            None => Command::Error("goto requires a date argument".to_string()),
            Some(arg) => match NaiveDate::parse_from_str(arg, "%Y-%m-%d") {
                Ok(date) => Command::Goto(date),
                Err(_) => Command::Error(format!("Invalid date format: {}", arg)),
            },
        },
        "new" => {
            if parts.len() < 2 {
                Command::NewTask(None)
            } else {
                Command::NewTask(Some(parts[1..].join(" ")))
            }
        }
        "theme" => match parts.get(1) {
            None => Command::Error("theme requires a theme name".to_string()),
            Some(theme) => Command::Theme(theme.to_string()),
        },
        "tab" => match parts.get(1).map(|tab| tab.parse::<Tab>()) {
            None => Command::Error("tab requires kanban, calendar or profile".to_string()),
            Some(Ok(tab)) => Command::Tab(tab),
            Some(Err(e)) => Command::Error(e.to_string()),
        },
        other => Command::Error(format!("Unknown command: {}", other)),
    }
}

pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Action> {
    match key {
        KeyCode::Enter => {
            let command = parse_command(&state.command_buffer);
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            execute(command, state)
        }
        KeyCode::Esc => {
            state.command_buffer.clear();
            state.mode = Mode::Normal;
            None
        }
        KeyCode::Backspace => {
            state.command_buffer.pop();
            if state.command_buffer.is_empty() {
                state.mode = Mode::Normal;
            }
            None
        }
        KeyCode::Char(c) => {
            state.command_buffer.push(c);
            None
        }
        _ => None,
    }
}

fn execute(command: Command, state: &mut AppState) -> Option<Action> {
    match command {
        Command::Quit => Some(Action::Quit),
        Command::Reload => Some(Action::Reload),
        Command::Logout => Some(Action::Logout),
        Command::Tab(tab) => Some(Action::SwitchTab(tab)),
        Command::Help => {
            state.show_help = true;
            None
        }
        Command::Goto(date) => {
            state.calendar.goto(date);
            (state.tab != Tab::Calendar).then_some(Action::SwitchTab(Tab::Calendar))
        }
        Command::Theme(name) => {
            match Theme::by_name(&name) {
                Some(theme) => state.theme = theme,
                None => state.notify_error(format!("Unknown theme: {}", name)),
            }
            None
        }
        Command::NewTask(title) => {
            let mut draft = TaskDraft::new(title.unwrap_or_default());
            if state.tab == Tab::Calendar {
                draft = draft.with_due_date(state.calendar.focused_date);
            }
            state.open_task_form(&draft);
            None
        }
        Command::Error(message) => {
            state.notify_error(message);
            None
        }
    }
}
