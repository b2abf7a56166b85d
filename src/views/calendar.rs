use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::task::{Task, TaskColor, TaskDraft, TaskStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub task_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub color: Option<TaskColor>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
}

impl CalendarEvent {
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Calendar entries for every task that has a due date, in list order.
pub fn project_events(tasks: &[Task]) -> Vec<CalendarEvent> {
    tasks.iter().filter_map(project_event).collect()
}

fn project_event(task: &Task) -> Option<CalendarEvent> {
    let date = task.due_date?;

    let (start, end, all_day) = match task.start_time {
        Some(start_time) => {
            let end_time = task
                .end_time
                .filter(|end| *end >= start_time)
                .unwrap_or(start_time);
            (date.and_time(start_time), date.and_time(end_time), false)
        }
        None => {
            let midnight = date.and_time(NaiveTime::MIN);
            (midnight, midnight, true)
        }
    };

    Some(CalendarEvent {
        task_id: task.id.clone(),
        title: task.title.clone(),
        status: task.status,
        color: task.color,
        start,
        end,
        all_day,
    })
}

/// Events falling on `date`, all-day entries first, then by start time.
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    let mut day: Vec<&CalendarEvent> = events.iter().filter(|e| e.date() == date).collect();
    day.sort_by_key(|e| (!e.all_day, e.start));
    day
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarMode {
    Month,
    Week,
    Day,
    Agenda,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown calendar view '{0}'")]
pub struct UnknownMode(pub String);

impl CalendarMode {
    pub const ALL: [CalendarMode; 4] = [
        CalendarMode::Month,
        CalendarMode::Week,
        CalendarMode::Day,
        CalendarMode::Agenda,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarMode::Month => "month",
            CalendarMode::Week => "week",
            CalendarMode::Day => "day",
            CalendarMode::Agenda => "agenda",
        }
    }

    pub fn has_hour_slots(&self) -> bool {
        matches!(self, CalendarMode::Week | CalendarMode::Day)
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" => Ok(CalendarMode::Month),
            "week" => Ok(CalendarMode::Week),
            "day" => Ok(CalendarMode::Day),
            "agenda" => Ok(CalendarMode::Agenda),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// A selected calendar slot: a day, plus an hour in week and day modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    pub hour: Option<u32>,
}

impl Slot {
    pub fn draft(&self) -> TaskDraft {
        let draft = TaskDraft::default().with_due_date(self.date);
        match self.hour.and_then(|h| NaiveTime::from_hms_opt(h, 0, 0)) {
            Some(start) => {
                let end = NaiveTime::from_hms_opt(start.hour() + 1, 0, 0);
                draft.with_times(start, end)
            }
            None => draft,
        }
    }
}

pub const DEFAULT_SLOT_HOUR: u32 = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub mode: CalendarMode,
    pub focused_date: NaiveDate,
    pub week_start: Weekday,
    pub agenda_days: u32,
    pub selected_event: usize,
    pub selected_hour: u32,
}

impl CalendarView {
    pub fn new(mode: CalendarMode, today: NaiveDate) -> Self {
        Self {
            mode,
            focused_date: today,
            week_start: Weekday::Mon,
            agenda_days: 30,
            selected_event: 0,
            selected_hour: DEFAULT_SLOT_HOUR,
        }
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_agenda_days(mut self, days: u32) -> Self {
        self.agenda_days = days.max(1);
        self
    }

    pub fn set_mode(&mut self, mode: CalendarMode) {
        self.mode = mode;
        self.selected_event = 0;
    }

    pub fn cycle_mode(&mut self) {
        let next = (CalendarMode::ALL.iter().position(|m| *m == self.mode).unwrap_or(0) + 1)
            % CalendarMode::ALL.len();
        self.set_mode(CalendarMode::ALL[next]);
    }

    pub fn goto(&mut self, date: NaiveDate) {
        self.focused_date = date;
        self.selected_event = 0;
    }

    pub fn jump_to_today(&mut self, today: NaiveDate) {
        self.goto(today);
    }

    pub fn move_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.focused_date.checked_add_days(Days::new(days as u64))
        } else {
            self.focused_date.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.goto(date);
        }
    }

    pub fn next_period(&mut self) {
        match self.mode {
            CalendarMode::Month => {
                if let Some(date) = self.focused_date.checked_add_months(Months::new(1)) {
                    self.goto(date);
                }
            }
            CalendarMode::Week => self.move_days(7),
            CalendarMode::Day => self.move_days(1),
            CalendarMode::Agenda => self.move_days(self.agenda_days as i64),
        }
    }

    pub fn previous_period(&mut self) {
        match self.mode {
            CalendarMode::Month => {
                if let Some(date) = self.focused_date.checked_sub_months(Months::new(1)) {
                    self.goto(date);
                }
            }
            CalendarMode::Week => self.move_days(-7),
            CalendarMode::Day => self.move_days(-1),
            CalendarMode::Agenda => self.move_days(-(self.agenda_days as i64)),
        }
    }

    pub fn start_of_week(&self) -> NaiveDate {
        start_of_week(self.focused_date, self.week_start)
    }

    /// Inclusive first and last day of the agenda window.
    pub fn agenda_range(&self) -> (NaiveDate, NaiveDate) {
        let last = self
            .focused_date
            .checked_add_days(Days::new(self.agenda_days.saturating_sub(1) as u64))
            .unwrap_or(self.focused_date);
        (self.focused_date, last)
    }

    pub fn next_hour(&mut self) {
        self.selected_hour = (self.selected_hour + 1).min(23);
    }

    pub fn previous_hour(&mut self) {
        self.selected_hour = self.selected_hour.saturating_sub(1);
    }

    pub fn select_next_event(&mut self, events: &[CalendarEvent]) {
        let count = events_on(events, self.focused_date).len();
        if count > 0 && self.selected_event + 1 < count {
            self.selected_event += 1;
        }
    }

    pub fn select_previous_event(&mut self) {
        self.selected_event = self.selected_event.saturating_sub(1);
    }

    pub fn selected<'a>(&self, events: &'a [CalendarEvent]) -> Option<&'a CalendarEvent> {
        events_on(events, self.focused_date)
            .get(self.selected_event)
            .copied()
    }

    pub fn slot(&self) -> Slot {
        Slot {
            date: self.focused_date,
            hour: self.mode.has_hour_slots().then_some(self.selected_hour),
        }
    }

    pub fn title(&self) -> String {
        match self.mode {
            CalendarMode::Month => self.focused_date.format("%B %Y").to_string(),
            CalendarMode::Week => {
                let start = self.start_of_week();
                let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
                format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y"))
            }
            CalendarMode::Day => self.focused_date.format("%A, %B %d, %Y").to_string(),
            CalendarMode::Agenda => {
                let (first, last) = self.agenda_range();
                format!("{} - {}", first.format("%b %d"), last.format("%b %d, %Y"))
            }
        }
    }
}

pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date.checked_sub_days(Days::new(offset as u64)).unwrap_or(date)
}
