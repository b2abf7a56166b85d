use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use agile_board::{
    storage::config::Config,
    sync::{auth_session::AuthSession, sync_engine::SyncEngine},
    views::{CalendarEvent, calendar::events_on, project_events},
};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::tui::ensure_session;

pub const USAGE: &str = "Usage: agile-board [--agenda [YYYY/MM/DD]]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Default,
    Help,
    AgendaDate(NaiveDate),
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

fn parse_args<I>(args: I, today: NaiveDate) -> Result<CliMode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut agenda_date = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--agenda" => {
                let target_date = match args.next_if(|next| !next.starts_with("--")) {
                    Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y/%m/%d")
                        .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", date_str))?,
                    None => today,
                };
                agenda_date = Some(target_date);
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(agenda_date.map_or(CliMode::Default, CliMode::AgendaDate))
}

/// Prints the tasks due on `date` through the pager. The session opened for
/// this is closed again afterwards.
pub async fn run_agenda_mode(config: Config, auth: Arc<AuthSession>, date: NaiveDate) -> anyhow::Result<()> {
    ensure_session(&auth).await?;

    let engine = SyncEngine::new(config, Arc::clone(&auth));
    let fetched = engine.fetch_tasks_for_current_user().await;

    if let Err(e) = auth.sign_out().await {
        tracing::warn!("Sign-out after agenda failed: {}", e);
    }

    let tasks = fetched.context("Failed to fetch tasks")?;
    let events = project_events(&tasks);
    let agenda = format_agenda_text(date, &events_on(&events, date));
    display_with_pager(&agenda)?;
    Ok(())
}

fn format_agenda_text(date: NaiveDate, events: &[&CalendarEvent]) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Agenda - {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    if events.is_empty() {
        lines.push("No tasks due.".to_string());
    } else {
        for event in events {
            lines.push(format!("- {}", build_agenda_line(event)));
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &CalendarEvent) -> String {
    let time_label = if event.all_day {
        "All Day".to_string()
    } else {
        format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"))
    };

    format!("{:<13} {} [{}]", time_label, event.title, event.status.label())
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        print!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            print!("{text}");
        }
    }

    Ok(())
}
