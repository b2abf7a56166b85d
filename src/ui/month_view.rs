use chrono::{Datelike, Days, NaiveDate};

use crate::views::calendar::{CalendarEvent, CalendarView, events_on};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weekday_labels: Vec<String>,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub event_count: usize,
    pub is_current_month: bool,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            event_count: 0,
            is_current_month: true,
        }
    }

    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

/// Up to six rows around the focused month, starting on the configured weekday.
pub fn calculate_layout(view: &CalendarView, events: &[CalendarEvent], today: NaiveDate) -> MonthLayout {
    let year = view.focused_date.year();
    let month = view.focused_date.month();

    let Some(first_day) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthLayout { year, month, weekday_labels: Vec::new(), weeks: Vec::new() };
    };
    let grid_start = crate::views::calendar::start_of_week(first_day, view.week_start);

    let weekday_labels = (0..7u64)
        .filter_map(|offset| grid_start.checked_add_days(Days::new(offset)))
        .map(|date| date.format("%a").to_string())
        .collect();

    let mut weeks = Vec::new();
    let mut current = grid_start;

    while weeks.len() < 6 && (weeks.is_empty() || current.month() == month) {
        let mut week = Week { days: Vec::with_capacity(7) };
        for _ in 0..7 {
            week.days.push(DayCell {
                is_selected: current == view.focused_date,
                is_today: current == today,
                event_count: events_on(events, current).len(),
                is_current_month: current.month() == month,
                ..DayCell::new(current)
            });
            let Some(next) = current.succ_opt() else { break };
            current = next;
        }
        weeks.push(week);
    }

    MonthLayout { year, month, weekday_labels, weeks }
}
