pub mod draft;
pub mod palette;
pub mod record;

pub use draft::{TaskDraft, TaskPatch};
pub use palette::TaskColor;
pub use record::{Task, TaskStatus};
