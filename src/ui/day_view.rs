use chrono::{NaiveDate, Timelike};

use crate::task::TaskStatus;
use crate::views::calendar::{CalendarEvent, CalendarView, events_on};

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
    pub date: NaiveDate,
    pub is_today: bool,
    pub all_day: Vec<EventEntry>,
    pub hours: Vec<HourBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourBlock {
    pub hour: u32,
    pub is_selected: bool,
    pub events: Vec<EventEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    pub task_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub start_minute: u32,
    pub duration_minutes: i64,
}

impl EventEntry {
    fn from_event(event: &CalendarEvent) -> Self {
        Self {
            task_id: event.task_id.clone(),
            title: event.title.clone(),
            status: event.status,
            start_minute: event.start.minute(),
            duration_minutes: event.duration_minutes(),
        }
    }
}

pub fn calculate_layout(view: &CalendarView, events: &[CalendarEvent], today: NaiveDate) -> DayLayout {
    let date = view.focused_date;
    let day_events = events_on(events, date);

    let all_day = day_events
        .iter()
        .filter(|e| e.all_day)
        .map(|e| EventEntry::from_event(e))
        .collect();

    let hours = (0..24)
        .map(|hour| HourBlock {
            hour,
            is_selected: hour == view.selected_hour,
            events: day_events
                .iter()
                .filter(|e| !e.all_day && e.start.hour() == hour)
                .map(|e| EventEntry::from_event(e))
                .collect(),
        })
        .collect();

    DayLayout {
        date,
        is_today: date == today,
        all_day,
        hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use crate::views::calendar::{CalendarMode, project_events};
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_task(id: &str, start: Option<(u32, u32)>, end: Option<(u32, u32)>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            status: TaskStatus::Doing,
            due_date: Some(date(2025, 1, 15)),
            start_time: start.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            end_time: end.and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0)),
            color: None,
            owner: Uuid::nil(),
        }
    }

    fn layout_for(tasks: &[Task], today: NaiveDate) -> DayLayout {
        let view = CalendarView::new(CalendarMode::Day, date(2025, 1, 15));
        calculate_layout(&view, &project_events(tasks), today)
    }

    #[test]
    fn day_layout_has_24_ordered_hours() {
        let layout = layout_for(&[], date(2025, 1, 1));

        assert_eq!(layout.date, date(2025, 1, 15));
        assert_eq!(layout.hours.len(), 24);
        for (i, block) in layout.hours.iter().enumerate() {
            assert_eq!(block.hour, i as u32);
        }
    }

    #[test]
    fn events_are_placed_in_start_hour() {
        let layout = layout_for(&[create_task("1", Some((9, 30)), Some((10, 45)))], date(2025, 1, 1));

        let entry = &layout.hours[9].events[0];

        assert_eq!(entry.title, "Task 1");
        assert_eq!(entry.start_minute, 30);
        assert_eq!(entry.duration_minutes, 75);
    }

    #[test]
    fn untimed_tasks_are_all_day() {
        let layout = layout_for(&[create_task("1", None, None)], date(2025, 1, 1));

        assert_eq!(layout.all_day.len(), 1);
        assert!(layout.hours.iter().all(|h| h.events.is_empty()));
    }

    #[test]
    fn selected_hour_is_marked() {
        let layout = layout_for(&[], date(2025, 1, 1));

        let selected: Vec<_> = layout.hours.iter().filter(|h| h.is_selected).map(|h| h.hour).collect();

        assert_eq!(selected, vec![9]);
    }

    #[test]
    fn is_today_flag() {
        assert!(layout_for(&[], date(2025, 1, 15)).is_today);
        assert!(!layout_for(&[], date(2025, 1, 1)).is_today);
    }
}
