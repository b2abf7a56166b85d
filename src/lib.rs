pub mod app;
pub mod board;
pub mod controller;
pub mod gate;
pub mod input;
pub mod storage;
pub mod sync;
pub mod task;
pub mod ui;
pub mod views;

pub use app::{Action, AppState, Mode, SyncStatus, Tab};
pub use task::{Task, TaskColor, TaskDraft, TaskPatch, TaskStatus};

pub use input::{command_mode, normal_mode};
