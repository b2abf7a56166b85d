pub mod calendar;
pub mod kanban;
pub mod profile;

pub use calendar::{CalendarEvent, CalendarMode, CalendarView, project_events};
pub use kanban::{KanbanView, MoveTarget};
pub use profile::ProfileView;
