use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const APP_DIR: &str = "agile-board";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config: {0}")]
    WriteError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub supabase: SupabaseConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub session_cache: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub default_tab: String,
    pub calendar_view: String,
    pub first_day_of_week: String,
    pub time_format: String,
    pub date_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarConfig {
    pub agenda_days: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { agenda_days: 30 }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// `SUPABASE_URL` and `SUPABASE_ANON_KEY` take precedence over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SUPABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.supabase.url = url;
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY").filter(|v| !v.trim().is_empty()) {
            self.supabase.anon_key = key;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.supabase.url.trim().is_empty() && !self.supabase.anon_key.trim().is_empty()
    }
}

impl UiConfig {
    pub fn week_start(&self) -> Weekday {
        match self.first_day_of_week.to_lowercase().as_str() {
            "sunday" => Weekday::Sun,
            "saturday" => Weekday::Sat,
            _ => Weekday::Mon,
        }
    }

    pub fn uses_12h_clock(&self) -> bool {
        self.time_format.eq_ignore_ascii_case("12h")
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = Self::config_dir();

        Self {
            supabase: SupabaseConfig {
                url: String::new(),
                anon_key: String::new(),
                session_cache: config_dir.join("session.json"),
            },
            ui: UiConfig {
                theme: "default".to_string(),
                default_tab: "kanban".to_string(),
                calendar_view: "month".to_string(),
                first_day_of_week: "Monday".to_string(),
                time_format: "24h".to_string(),
                date_format: "%Y-%m-%d".to_string(),
            },
            calendar: CalendarConfig::default(),
        }
    }
}
