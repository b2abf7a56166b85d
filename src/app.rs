use chrono::{Local, NaiveDate, NaiveTime};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::board::TaskList;
use crate::gate::{Route, SessionGate};
use crate::storage::config::Config;
use crate::sync::supabase_auth::Session;
use crate::task::record::{format_time_of_day, parse_time_of_day};
use crate::task::{Task, TaskColor, TaskDraft, TaskPatch, TaskStatus};
use crate::ui::theme::Theme;
use crate::views::{CalendarEvent, CalendarMode, CalendarView, KanbanView, ProfileView, project_events};

pub const SIGNUP_CONFIRMATION: &str = "Account created. Check your email to confirm your account.";
pub const SIGNUP_REDIRECT_DELAY: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Kanban,
    Calendar,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tab '{0}'")]
pub struct UnknownTab(pub String);

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Kanban, Tab::Calendar, Tab::Profile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Kanban => "kanban",
            Tab::Calendar => "calendar",
            Tab::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Kanban => "Kanban",
            Tab::Calendar => "Calendar",
            Tab::Profile => "Profile",
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Kanban => Tab::Calendar,
            Tab::Calendar => Tab::Profile,
            Tab::Profile => Tab::Kanban,
        }
    }

    pub fn previous(&self) -> Tab {
        match self {
            Tab::Kanban => Tab::Profile,
            Tab::Calendar => Tab::Kanban,
            Tab::Profile => Tab::Calendar,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kanban" | "board" => Ok(Tab::Kanban),
            "calendar" | "cal" => Ok(Tab::Calendar),
            "profile" => Ok(Tab::Profile),
            _ => Err(UnknownTab(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Idle,
    Syncing,
    Synced,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub is_error: bool,
}

/// Everything a key press can ask for that needs the remote services.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SubmitLogin,
    SubmitSignup,
    Reload,
    SwitchTab(Tab),
    SubmitTaskForm,
    MoveTask { task_id: String, status: TaskStatus },
    DeleteTask(String),
    Logout,
    CopyUserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
    Switch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    pub active_field: AuthField,
    pub error: Option<String>,
    pub message: Option<String>,
    pub redirect_at: Option<Instant>,
    pub submitting: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            active_field: AuthField::Email,
            error: None,
            message: None,
            redirect_at: None,
            submitting: false,
        }
    }
}

impl AuthForm {
    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Switch,
            AuthField::Switch => AuthField::Email,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            AuthField::Email => AuthField::Switch,
            AuthField::Password => AuthField::Email,
            AuthField::Switch => AuthField::Password,
        };
    }

    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Invalid time '{0}'. Use HH:MM.")]
    InvalidTime(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    DueDate,
    StartTime,
    EndTime,
    Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub start_time: String,
    pub end_time: String,
    pub color: Option<TaskColor>,
    pub active_field: TaskField,
    pub task_id: Option<String>,
    pub error: Option<String>,
}

impl TaskForm {
    pub fn new(draft: &TaskDraft) -> Self {
        Self {
            title: draft.title.clone(),
            due_date: draft.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            start_time: draft.start_time.map(format_time_of_day).unwrap_or_default(),
            end_time: draft.end_time.map(format_time_of_day).unwrap_or_default(),
            color: draft.color,
            active_field: TaskField::Title,
            task_id: None,
            error: None,
        }
    }

    pub fn for_task(task: &Task) -> Self {
        let mut form = Self::new(&TaskDraft {
            title: task.title.clone(),
            due_date: task.due_date,
            start_time: task.start_time,
            end_time: task.end_time,
            color: task.color,
        });
        form.task_id = Some(task.id.clone());
        form
    }

    pub fn is_editing(&self) -> bool {
        self.task_id.is_some()
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            TaskField::Title => TaskField::DueDate,
            TaskField::DueDate => TaskField::StartTime,
            TaskField::StartTime => TaskField::EndTime,
            TaskField::EndTime => TaskField::Color,
            TaskField::Color => TaskField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            TaskField::Title => TaskField::Color,
            TaskField::DueDate => TaskField::Title,
            TaskField::StartTime => TaskField::DueDate,
            TaskField::EndTime => TaskField::StartTime,
            TaskField::Color => TaskField::EndTime,
        };
    }

    pub fn cycle_color(&mut self) {
        self.color = TaskColor::cycle(self.color);
    }

    pub fn to_draft(&self) -> Result<TaskDraft, FormError> {
        Ok(TaskDraft {
            title: self.title.trim().to_string(),
            due_date: parse_date_field(&self.due_date)?,
            start_time: parse_time_field(&self.start_time)?,
            end_time: parse_time_field(&self.end_time)?,
            color: self.color,
        })
    }

    /// Only the fields that differ from `original` end up in the patch.
    pub fn to_patch(&self, original: &Task) -> Result<TaskPatch, FormError> {
        let draft = self.to_draft()?;
        Ok(TaskPatch {
            title: (draft.title != original.title).then_some(draft.title),
            status: None,
            due_date: (draft.due_date != original.due_date).then_some(draft.due_date),
            start_time: (draft.start_time != original.start_time).then_some(draft.start_time),
            end_time: (draft.end_time != original.end_time).then_some(draft.end_time),
            color: (draft.color != original.color).then_some(draft.color),
        })
    }
}

fn parse_date_field(value: &str) -> Result<Option<NaiveDate>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate(value.to_string()))
}

fn parse_time_field(value: &str) -> Result<Option<NaiveTime>, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_time_of_day(value)
        .map(Some)
        .ok_or_else(|| FormError::InvalidTime(value.to_string()))
}

pub struct AppState {
    pub mode: Mode,
    pub tab: Tab,
    pub gate: SessionGate,
    pub tasks: TaskList,
    pub kanban: KanbanView,
    pub calendar: CalendarView,
    pub profile: Option<ProfileView>,
    pub login_form: AuthForm,
    pub signup_form: AuthForm,
    pub task_form: Option<TaskForm>,
    pub delete_confirmation_task_id: Option<String>,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub sync_status: SyncStatus,
    pub notification: Option<Notification>,
    pub clock_12h: bool,
    pub date_format: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            tab: Tab::Kanban,
            gate: SessionGate::new(Route::Dashboard),
            tasks: TaskList::new(),
            kanban: KanbanView::new(),
            calendar: CalendarView::new(CalendarMode::Month, Local::now().date_naive()),
            profile: None,
            login_form: AuthForm::default(),
            signup_form: AuthForm::default(),
            task_form: None,
            delete_confirmation_task_id: None,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            sync_status: SyncStatus::Idle,
            notification: None,
            clock_12h: false,
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::new().with_theme(Theme::get_by_name(&config.ui.theme));
        state.tab = config.ui.default_tab.parse().unwrap_or(Tab::Kanban);
        let mode = config.ui.calendar_view.parse().unwrap_or(CalendarMode::Month);
        state.calendar = CalendarView::new(mode, Local::now().date_naive())
            .with_week_start(config.ui.week_start())
            .with_agenda_days(config.calendar.agenda_days);
        state.clock_12h = config.ui.uses_12h_clock();
        state.date_format = config.ui.date_format.clone();
        state
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn route(&self) -> Route {
        self.gate.route()
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        project_events(self.tasks.tasks())
    }

    pub fn selected_task(&self) -> Option<&Task> {
        match self.tab {
            Tab::Kanban => self.kanban.selected_task(&self.tasks),
            Tab::Calendar => {
                let events = self.events();
                let task_id = self.calendar.selected(&events)?.task_id.clone();
                self.tasks.get(&task_id)
            }
            Tab::Profile => None,
        }
    }

    pub fn open_task_form(&mut self, draft: &TaskDraft) {
        self.task_form = Some(TaskForm::new(draft));
        self.mode = Mode::Insert;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(form) = self.selected_task().map(TaskForm::for_task) {
            self.task_form = Some(form);
            self.mode = Mode::Insert;
        }
    }

    pub fn close_task_form(&mut self) {
        self.task_form = None;
        self.mode = Mode::Normal;
    }

    pub fn request_delete(&mut self) {
        if let Some(task_id) = self.selected_task().map(|t| t.id.clone()) {
            self.delete_confirmation_task_id = Some(task_id);
            self.mode = Mode::Confirm;
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(Notification {
            message: message.into(),
            is_error: false,
        });
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.sync_status = SyncStatus::Error(message.clone());
        self.notification = Some(Notification {
            message,
            is_error: true,
        });
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notification.take().is_some()
    }

    /// Applies a session change announced by the auth session. Anything
    /// loaded for a previous user is dropped once that user is gone.
    pub fn on_session_change(&mut self, session: Option<&Session>) {
        let previous_user = self.gate.user().map(|user| user.id);
        self.gate.on_session_change(session);

        if previous_user.is_some() && previous_user != session.map(|s| s.user.id) {
            self.tasks.reset();
            self.kanban = KanbanView::new();
            self.profile = None;
            self.task_form = None;
            self.delete_confirmation_task_id = None;
            self.mode = Mode::Normal;
            self.sync_status = SyncStatus::Idle;
        }
    }

    /// Follows the delayed redirect to login after a signup that needs email
    /// confirmation.
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.signup_form.redirect_at
            && now >= at
        {
            self.signup_form = AuthForm::default();
            self.gate.navigate(Route::Login);
        }
    }

    pub fn format_time(&self, time: NaiveTime) -> String {
        if self.clock_12h {
            time.format("%I:%M %p").to_string()
        } else {
            time.format("%H:%M").to_string()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
