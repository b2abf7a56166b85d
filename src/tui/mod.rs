mod authentication;
mod calendar_views;
mod dialogs;
mod presentation;
mod screens;
mod session;

pub use authentication::{check_config, ensure_session};
pub use session::run_tui;
