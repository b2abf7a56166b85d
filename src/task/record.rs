use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::task::draft::TaskPatch;
use crate::task::palette::TaskColor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Option<TaskColor>,
    pub owner: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown task status '{0}'")]
pub struct UnknownStatus(pub String);

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::Doing => "In progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::Doing => 1,
            TaskStatus::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl Task {
    /// Overwrites exactly the fields present in `patch`.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Accepts a plain `YYYY-MM-DD` date or a full RFC 3339 timestamp, which is
/// read in the local timezone.
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Local).date_naive())
        })
        .or_else(|| value.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()))
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            status: TaskStatus::Todo,
            due_date: None,
            start_time: None,
            end_time: None,
            color: None,
            owner: Uuid::nil(),
        }
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn status_round_trips_through_its_key() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert_eq!(
            "blocked".parse::<TaskStatus>(),
            Err(UnknownStatus("blocked".to_string()))
        );
    }

    #[test]
    fn status_index_matches_column_order() {
        assert_eq!(TaskStatus::from_index(0), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::from_index(2), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::from_index(3), None);
        assert_eq!(TaskStatus::Doing.index(), 1);
    }

    #[test]
    fn parses_plain_due_date() {
        assert_eq!(parse_due_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn parses_timestamp_due_date() {
        assert_eq!(
            parse_due_date("2024-03-01T12:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_due_date("2024-03-01T12:00:00+00:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn blank_due_date_is_none() {
        assert_eq!(parse_due_date("  "), None);
        assert_eq!(parse_due_date("not a date"), None);
    }

    #[test]
    fn parses_time_with_and_without_seconds() {
        assert_eq!(parse_time_of_day("09:00"), Some(time(9, 0)));
        assert_eq!(parse_time_of_day("17:45:00"), Some(time(17, 45)));
        assert_eq!(parse_time_of_day("25:00"), None);
    }

    #[test]
    fn formats_time_without_seconds() {
        assert_eq!(format_time_of_day(time(9, 5)), "09:05");
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut task = create_task("t1", "Write report");
        task.color = Some(TaskColor::Red);

        let patch = TaskPatch {
            status: Some(TaskStatus::Doing),
            ..TaskPatch::default()
        };
        task.apply(&patch);

        assert_eq!(task.status, TaskStatus::Doing);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.color, Some(TaskColor::Red));
    }

    #[test]
    fn apply_can_clear_nullable_fields() {
        let mut task = create_task("t1", "Write report");
        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let patch = TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        };
        task.apply(&patch);

        assert_eq!(task.due_date, None);
    }
}
