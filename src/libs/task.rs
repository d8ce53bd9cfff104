//! Task records and creation defaults.
//!
//! A [`Task`] is one entry of a daily to-do list. Tasks are grouped by their
//! `task_date` and ordered inside a day by `day_order`. The identifier is
//! assigned by the store on first save and is never touched afterwards.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Format used for task dates at every boundary (storage, JSON, CLI).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a task repeats. Stored and displayed only; no instances are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatPattern {
    #[default]
    None,
    EveryXDays,
    EveryXWeeks,
    EveryXMonths,
    SpecificWeekdays,
}

impl RepeatPattern {
    pub const ALL: [RepeatPattern; 5] = [
        RepeatPattern::None,
        RepeatPattern::EveryXDays,
        RepeatPattern::EveryXWeeks,
        RepeatPattern::EveryXMonths,
        RepeatPattern::SpecificWeekdays,
    ];

    /// Member name as it appears in storage and JSON.
    pub fn name(&self) -> &'static str {
        match self {
            RepeatPattern::None => "NONE",
            RepeatPattern::EveryXDays => "EVERY_X_DAYS",
            RepeatPattern::EveryXWeeks => "EVERY_X_WEEKS",
            RepeatPattern::EveryXMonths => "EVERY_X_MONTHS",
            RepeatPattern::SpecificWeekdays => "SPECIFIC_WEEKDAYS",
        }
    }
}

impl Display for RepeatPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RepeatPattern {
    type Err = String;

    /// Exact, case-sensitive match on the member name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|pattern| pattern.name() == s)
            .ok_or_else(|| format!("No repeat pattern named '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Option<i64>,
    pub task_date: NaiveDate,
    pub day_order: i32,
    pub category: String,
    pub name: String,
    pub complete: bool,
    /// Time of day the task was ticked off; set by the update dispatcher.
    pub assigned_time: Option<NaiveTime>,
    pub in_progress: bool,
    pub long_term: bool,
    /// Tracked duration in milliseconds.
    pub time_taken: Option<i64>,
    pub repeat_type: RepeatPattern,
    pub repeat_duration: i32,
    pub priority: i32,
}

impl Task {
    pub fn new(task_date: NaiveDate, day_order: i32, category: &str, name: &str) -> Self {
        Task {
            id: None,
            task_date,
            day_order,
            category: category.to_string(),
            name: name.to_string(),
            complete: false,
            assigned_time: None,
            in_progress: false,
            long_term: false,
            time_taken: None,
            repeat_type: RepeatPattern::None,
            repeat_duration: 0,
            priority: 0,
        }
    }

    /// ISO date key of the bucket this task belongs to.
    pub fn date_key(&self) -> String {
        self.task_date.format(DATE_FORMAT).to_string()
    }
}

/// Values applied to a new task when the caller leaves them out.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TaskDefaults {
    pub repeat_type: RepeatPattern,
    pub repeat_duration: i32,
    pub priority: i32,
    pub long_term: bool,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        TaskDefaults {
            repeat_type: RepeatPattern::None,
            repeat_duration: 0,
            priority: 0,
            long_term: false,
        }
    }
}

/// A creation request. Optional attributes fall back to [`TaskDefaults`].
#[derive(Debug, Clone)]
pub struct NewTask {
    pub category: String,
    pub name: String,
    pub task_date: NaiveDate,
    pub repeat_type: Option<RepeatPattern>,
    pub repeat_duration: Option<i32>,
    pub priority: Option<i32>,
    pub long_term: Option<bool>,
}

impl NewTask {
    pub fn new(category: &str, name: &str, task_date: NaiveDate) -> Self {
        NewTask {
            category: category.to_string(),
            name: name.to_string(),
            task_date,
            repeat_type: None,
            repeat_duration: None,
            priority: None,
            long_term: None,
        }
    }

    /// Builds the unsaved record at the given position inside its day.
    pub fn into_task(self, day_order: i32, defaults: &TaskDefaults) -> Task {
        let mut task = Task::new(self.task_date, day_order, &self.category, &self.name);
        task.repeat_type = self.repeat_type.unwrap_or(defaults.repeat_type);
        task.repeat_duration = self.repeat_duration.unwrap_or(defaults.repeat_duration);
        task.priority = self.priority.unwrap_or(defaults.priority);
        task.long_term = self.long_term.unwrap_or(defaults.long_term);
        task
    }
}
