use std::io::{self, Write};

use agile_board::storage::config::Config;
use agile_board::sync::auth_session::AuthSession;
use anyhow::{Context, bail};

pub fn check_config() -> anyhow::Result<Config> {
    let config = Config::load_or_create().context("Failed to load configuration")?;

    if !config.is_complete() {
        println!("Configuration incomplete. Please edit the config file at:");
        println!("{}", Config::config_path().display());
        println!("\nYou need to set:");
        println!("  - supabase.url: Your Supabase project URL");
        println!("  - supabase.anon_key: Your project's anon (public) key");
        println!("\nOr export SUPABASE_URL and SUPABASE_ANON_KEY.");
        println!("Find both under Project Settings > API in the Supabase dashboard.");
        bail!("Missing Supabase settings in config");
    }

    Ok(config)
}

/// Makes sure a session exists, asking for credentials on the terminal when
/// none is cached.
pub async fn ensure_session(auth: &AuthSession) -> anyhow::Result<()> {
    if auth.get_session().await?.is_some() {
        return Ok(());
    }

    println!("Sign in to continue.\n");
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;

    let session = auth.sign_in(&email, &password).await?;
    println!("\nSigned in as {}.\n", session.user.display_email());
    Ok(())
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
