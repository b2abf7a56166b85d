use chrono::{Days, NaiveDate, Timelike};

use crate::views::calendar::{CalendarEvent, CalendarView, events_on};

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub all_day: Vec<EventBlock>,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    pub hour: u32,
    pub events: Vec<EventBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub task_id: String,
    pub title: String,
    pub start_hour: u32,
    pub start_minute: u32,
    pub duration_minutes: i64,
}

impl EventBlock {
    fn from_event(event: &CalendarEvent) -> Self {
        Self {
            task_id: event.task_id.clone(),
            title: event.title.clone(),
            start_hour: event.start.hour(),
            start_minute: event.start.minute(),
            duration_minutes: event.duration_minutes(),
        }
    }
}

pub fn calculate_layout(view: &CalendarView, events: &[CalendarEvent], today: NaiveDate) -> WeekLayout {
    let week_start = view.start_of_week();

    let days = (0..7u64)
        .filter_map(|offset| week_start.checked_add_days(Days::new(offset)))
        .map(|date| {
            let day_events = events_on(events, date);
            DayColumn {
                date,
                is_selected: date == view.focused_date,
                is_today: date == today,
                all_day: day_events.iter().filter(|e| e.all_day).map(|e| EventBlock::from_event(e)).collect(),
                slots: build_time_slots(&day_events),
            }
        })
        .collect();

    WeekLayout { week_start, days }
}

/// Hours that hold at least one timed event.
fn build_time_slots(events: &[&CalendarEvent]) -> Vec<TimeSlot> {
    (0..24)
        .filter_map(|hour| {
            let hour_events: Vec<EventBlock> = events
                .iter()
                .filter(|e| !e.all_day && e.start.hour() == hour)
                .map(|e| EventBlock::from_event(e))
                .collect();
            (!hour_events.is_empty()).then_some(TimeSlot { hour, events: hour_events })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskStatus};
    use crate::views::calendar::{CalendarMode, project_events};
    use chrono::{Datelike, NaiveTime, Weekday};
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_task(id: &str, due: NaiveDate, hour: Option<u32>, duration_hours: u32) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            status: TaskStatus::Todo,
            due_date: Some(due),
            start_time: hour.and_then(|h| NaiveTime::from_hms_opt(h, 0, 0)),
            end_time: hour.and_then(|h| NaiveTime::from_hms_opt(h + duration_hours, 0, 0)),
            color: None,
            owner: Uuid::nil(),
        }
    }

    fn layout_for(tasks: &[Task]) -> WeekLayout {
        let view = CalendarView::new(CalendarMode::Week, date(2025, 1, 15));
        calculate_layout(&view, &project_events(tasks), date(2025, 1, 1))
    }

    #[test]
    fn week_has_seven_days_from_monday() {
        let layout = layout_for(&[]);

        assert_eq!(layout.days.len(), 7);
        assert_eq!(layout.days[0].date.weekday(), Weekday::Mon);
        assert_eq!(layout.days[6].date.weekday(), Weekday::Sun);
    }

    #[test]
    fn week_can_start_on_sunday() {
        let view = CalendarView::new(CalendarMode::Week, date(2025, 1, 15)).with_week_start(Weekday::Sun);

        let layout = calculate_layout(&view, &[], date(2025, 1, 1));

        assert_eq!(layout.week_start, date(2025, 1, 12));
    }

    #[test]
    fn selected_date_is_marked() {
        let layout = layout_for(&[]);

        let selected: Vec<_> = layout.days.iter().filter(|d| d.is_selected).collect();

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].date, date(2025, 1, 15));
    }

    #[test]
    fn timed_events_are_grouped_by_hour() {
        let layout = layout_for(&[
            create_task("1", date(2025, 1, 15), Some(9), 1),
            create_task("2", date(2025, 1, 15), Some(14), 2),
        ]);

        let slots = &layout.days[2].slots;

        assert_eq!(slots.iter().map(|s| s.hour).collect::<Vec<_>>(), vec![9, 14]);
        assert_eq!(slots[1].events[0].duration_minutes, 120);
    }

    #[test]
    fn all_day_events_are_kept_apart() {
        let layout = layout_for(&[create_task("1", date(2025, 1, 15), None, 0)]);

        let wednesday = &layout.days[2];

        assert_eq!(wednesday.all_day.len(), 1);
        assert!(wednesday.slots.is_empty());
    }
}
