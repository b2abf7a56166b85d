use chrono::NaiveDate;

use crate::views::calendar::{CalendarEvent, CalendarView};

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaLayout {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub days: Vec<AgendaDay>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
}

impl AgendaLayout {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Days of the agenda window that have events, in date order.
pub fn calculate_layout(view: &CalendarView, events: &[CalendarEvent], today: NaiveDate) -> AgendaLayout {
    let (first, last) = view.agenda_range();

    let mut in_range: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.date() >= first && e.date() <= last)
        .collect();
    in_range.sort_by_key(|e| (e.date(), !e.all_day, e.start));

    let mut days: Vec<AgendaDay> = Vec::new();
    for event in in_range {
        match days.last_mut() {
            Some(day) if day.date == event.date() => day.events.push(event.clone()),
            _ => days.push(AgendaDay {
                date: event.date(),
                is_today: event.date() == today,
                events: vec![event.clone()],
            }),
        }
    }

    AgendaLayout { first, last, days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskStatus};
    use crate::views::calendar::{CalendarMode, project_events};
    use chrono::NaiveTime;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_task(id: &str, due: NaiveDate, hour: Option<u32>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            status: TaskStatus::Todo,
            due_date: Some(due),
            start_time: hour.and_then(|h| NaiveTime::from_hms_opt(h, 0, 0)),
            end_time: None,
            color: None,
            owner: Uuid::nil(),
        }
    }

    #[test]
    fn groups_events_by_day_within_window() {
        let tasks = vec![
            create_task("late", date(2024, 3, 2), Some(15)),
            create_task("outside", date(2024, 4, 20), None),
            create_task("early", date(2024, 3, 2), Some(8)),
            create_task("first", date(2024, 3, 1), None),
        ];
        let view = CalendarView::new(CalendarMode::Agenda, date(2024, 3, 1)).with_agenda_days(30);

        let layout = calculate_layout(&view, &project_events(&tasks), date(2024, 3, 1));

        assert_eq!(layout.days.len(), 2);
        assert!(layout.days[0].is_today);
        let second: Vec<_> = layout.days[1].events.iter().map(|e| e.task_id.as_str()).collect();
        assert_eq!(second, vec!["early", "late"]);
    }

    #[test]
    fn empty_window() {
        let view = CalendarView::new(CalendarMode::Agenda, date(2024, 3, 1));

        let layout = calculate_layout(&view, &[], date(2024, 3, 1));

        assert!(layout.is_empty());
        assert_eq!(layout.last, date(2024, 3, 30));
    }
}
