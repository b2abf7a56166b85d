use chrono::{NaiveDate, NaiveTime};

use crate::task::palette::TaskColor;
use crate::task::record::TaskStatus;

/// Field values for a task that does not exist remotely yet. New tasks always
/// start in the `todo` column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<TaskColor>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_times(mut self, start: NaiveTime, end: Option<NaiveTime>) -> Self {
        self.start_time = Some(start);
        self.end_time = end;
        self
    }

    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    pub fn has_title(&self) -> bool {
        !self.trimmed_title().is_empty()
    }
}

/// A partial update. `None` leaves a field untouched; for nullable columns
/// `Some(None)` clears the value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<NaiveDate>>,
    pub start_time: Option<Option<NaiveTime>>,
    pub end_time: Option<Option<NaiveTime>>,
    pub color: Option<Option<TaskColor>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.color.is_none()
    }

    pub fn has_blank_title(&self) -> bool {
        self.title.as_deref().is_some_and(|title| title.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_draft_has_no_title() {
        assert!(!TaskDraft::new("   ").has_title());
        assert!(TaskDraft::new(" Study ").has_title());
    }

    #[test]
    fn draft_title_is_trimmed() {
        assert_eq!(TaskDraft::new("  Study  ").trimmed_title(), "Study");
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::status(TaskStatus::Done).is_empty());
    }

    #[test]
    fn clearing_a_field_is_not_empty() {
        let patch = TaskPatch {
            color: Some(None),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn blank_title_is_detected() {
        let patch = TaskPatch {
            title: Some("  ".to_string()),
            ..TaskPatch::default()
        };
        assert!(patch.has_blank_title());
        assert!(!TaskPatch::default().has_blank_title());
    }
}
