use std::sync::Arc;

use agile_board::storage::config::Config;
use agile_board::sync::auth_session::AuthSession;
use agile_board::sync::supabase_auth::{SessionStorage, SupabaseAuthClient};

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_agenda_mode};
mod tui;
use tui::{check_config, run_tui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(CliMode::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let config = match check_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            tracing::error!("Configuration check failed: {:#}", e);
            return Ok(());
        }
    };

    let auth_client = SupabaseAuthClient::new(&config.supabase.url, config.supabase.anon_key.clone());
    let storage = SessionStorage::new(config.supabase.session_cache.clone());
    let auth = Arc::new(AuthSession::new(Arc::new(auth_client), storage));

    match cli_mode {
        CliMode::AgendaDate(date) => {
            if let Err(e) = run_agenda_mode(config, auth, date).await {
                eprintln!("Agenda error: {:#}", e);
                tracing::error!("Agenda failed: {:#}", e);
            }
            Ok(())
        }
        CliMode::Default | CliMode::Help => {
            run_tui(config, auth).await?;
            Ok(())
        }
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "agile-board.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("agile-board started");
}
