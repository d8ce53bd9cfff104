//! Updatable task fields and their conversion rules.
//!
//! Every field a client may change is a [`TaskField`]. Each one maps to a
//! [`FieldHandler`] holding the parser for the raw string value, the setter
//! that writes the typed value into a [`Task`], and an optional side effect
//! that runs after the setter. The table is built once on first use.
//!
//! | field            | accepted value                          | side effect                  |
//! |------------------|-----------------------------------------|------------------------------|
//! | `taskName`       | any text                                |                              |
//! | `category`       | any text                                |                              |
//! | `taskDate`       | `yyyy-MM-dd`                            |                              |
//! | `dayOrder`       | 32-bit integer                          |                              |
//! | `complete`       | `true` / `false`, any case              | `true` stamps `assignedTime` |
//! | `priority`       | 32-bit integer                          |                              |
//! | `repeatType`     | exact repeat pattern name               |                              |
//! | `repeatDuration` | 32-bit integer                          |                              |
//! | `assignedTime`   | `null` or zero-padded `HH:MM[:SS[.fff]]`|                              |
//! | `inProgress`     | `true` / `false`, any case              |                              |
//! | `longTerm`       | `true` / `false`, any case              |                              |
//! | `timeTaken`      | 64-bit integer (milliseconds)           |                              |

use super::clock::Clock;
use super::task::{RepeatPattern, Task, DATE_FORMAT};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    TaskName,
    Category,
    TaskDate,
    DayOrder,
    Complete,
    Priority,
    RepeatType,
    RepeatDuration,
    AssignedTime,
    InProgress,
    LongTerm,
    TimeTaken,
}

impl TaskField {
    pub const ALL: [TaskField; 12] = [
        TaskField::TaskName,
        TaskField::Category,
        TaskField::TaskDate,
        TaskField::DayOrder,
        TaskField::Complete,
        TaskField::Priority,
        TaskField::RepeatType,
        TaskField::RepeatDuration,
        TaskField::AssignedTime,
        TaskField::InProgress,
        TaskField::LongTerm,
        TaskField::TimeTaken,
    ];

    /// Wire name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            TaskField::TaskName => "taskName",
            TaskField::Category => "category",
            TaskField::TaskDate => "taskDate",
            TaskField::DayOrder => "dayOrder",
            TaskField::Complete => "complete",
            TaskField::Priority => "priority",
            TaskField::RepeatType => "repeatType",
            TaskField::RepeatDuration => "repeatDuration",
            TaskField::AssignedTime => "assignedTime",
            TaskField::InProgress => "inProgress",
            TaskField::LongTerm => "longTerm",
            TaskField::TimeTaken => "timeTaken",
        }
    }

    /// Case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<TaskField> {
        static BY_NAME: OnceLock<HashMap<&'static str, TaskField>> = OnceLock::new();
        BY_NAME
            .get_or_init(|| TaskField::ALL.iter().map(|field| (field.name(), *field)).collect())
            .get(name)
            .copied()
    }

    pub fn handler(&self) -> &'static FieldHandler {
        &registry()[self]
    }
}

impl Display for TaskField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A raw value after conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Int(i32),
    Long(i64),
    Bool(bool),
    Repeat(RepeatPattern),
    Time(Option<NaiveTime>),
}

impl FieldValue {
    fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Date(_) => "date",
            FieldValue::Int(_) => "integer",
            FieldValue::Long(_) => "long integer",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Repeat(_) => "repeat pattern",
            FieldValue::Time(_) => "time of day",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("Cannot convert '{value}' for field '{field}': {reason}")]
    Conversion {
        field: TaskField,
        value: String,
        reason: String,
    },
    #[error("Field '{field}' expects a {expected} value, got {actual}")]
    Mismatch {
        field: TaskField,
        expected: &'static str,
        actual: &'static str,
    },
}

type Parser = fn(&str) -> Result<FieldValue, String>;
type Setter = fn(&mut Task, FieldValue) -> Result<(), FieldValue>;
type SideEffect = fn(&mut Task, &dyn Clock);

pub struct FieldHandler {
    pub parse: Parser,
    /// Hands the value back when it has the wrong kind for the field.
    pub apply: Setter,
    pub side_effect: Option<SideEffect>,
    expected: &'static str,
}

impl FieldHandler {
    fn new(parse: Parser, apply: Setter, expected: &'static str) -> Self {
        Self {
            parse,
            apply,
            side_effect: None,
            expected,
        }
    }

    fn with_side_effect(mut self, side_effect: SideEffect) -> Self {
        self.side_effect = Some(side_effect);
        self
    }
}

/// Builds a setter that accepts a single [`FieldValue`] variant.
macro_rules! setter {
    ($variant:ident, |$task:ident, $value:ident| $body:expr) => {
        |$task: &mut Task, value: FieldValue| match value {
            FieldValue::$variant($value) => {
                $body;
                Ok(())
            }
            other => Err(other),
        }
    };
}

fn registry() -> &'static HashMap<TaskField, FieldHandler> {
    static HANDLERS: OnceLock<HashMap<TaskField, FieldHandler>> = OnceLock::new();
    HANDLERS.get_or_init(|| {
        HashMap::from([
            (
                TaskField::TaskName,
                FieldHandler::new(parse_text, setter!(Text, |task, name| task.name = name), "text"),
            ),
            (
                TaskField::Category,
                FieldHandler::new(parse_text, setter!(Text, |task, category| task.category = category), "text"),
            ),
            (
                TaskField::TaskDate,
                FieldHandler::new(parse_date, setter!(Date, |task, date| task.task_date = date), "date"),
            ),
            (
                TaskField::DayOrder,
                FieldHandler::new(parse_int, setter!(Int, |task, order| task.day_order = order), "integer"),
            ),
            (
                TaskField::Complete,
                FieldHandler::new(parse_bool, setter!(Bool, |task, complete| task.complete = complete), "boolean")
                    .with_side_effect(stamp_completion),
            ),
            (
                TaskField::Priority,
                FieldHandler::new(parse_int, setter!(Int, |task, priority| task.priority = priority), "integer"),
            ),
            (
                TaskField::RepeatType,
                FieldHandler::new(
                    parse_repeat,
                    setter!(Repeat, |task, pattern| task.repeat_type = pattern),
                    "repeat pattern",
                ),
            ),
            (
                TaskField::RepeatDuration,
                FieldHandler::new(
                    parse_int,
                    setter!(Int, |task, duration| task.repeat_duration = duration),
                    "integer",
                ),
            ),
            (
                TaskField::AssignedTime,
                FieldHandler::new(parse_time, setter!(Time, |task, time| task.assigned_time = time), "time of day"),
            ),
            (
                TaskField::InProgress,
                FieldHandler::new(parse_bool, setter!(Bool, |task, flag| task.in_progress = flag), "boolean"),
            ),
            (
                TaskField::LongTerm,
                FieldHandler::new(parse_bool, setter!(Bool, |task, flag| task.long_term = flag), "boolean"),
            ),
            (
                TaskField::TimeTaken,
                FieldHandler::new(
                    parse_long,
                    setter!(Long, |task, millis| task.time_taken = Some(millis)),
                    "long integer",
                ),
            ),
        ])
    })
}

/// Converts `raw` for `field` and writes it into `task`, then runs the
/// field's side effect. `task` is left untouched when conversion fails.
pub fn apply_field(task: &mut Task, field: TaskField, raw: &str, clock: &dyn Clock) -> Result<(), FieldError> {
    let handler = field.handler();
    let value = (handler.parse)(raw).map_err(|reason| FieldError::Conversion {
        field,
        value: raw.to_string(),
        reason,
    })?;

    (handler.apply)(task, value).map_err(|rejected| FieldError::Mismatch {
        field,
        expected: handler.expected,
        actual: rejected.kind(),
    })?;

    if let Some(side_effect) = handler.side_effect {
        side_effect(task, clock);
    }

    Ok(())
}

/// Marking a task complete records when it happened.
fn stamp_completion(task: &mut Task, clock: &dyn Clock) {
    if task.complete {
        task.assigned_time = Some(clock.now());
    }
}

fn parse_text(raw: &str) -> Result<FieldValue, String> {
    Ok(FieldValue::Text(raw.to_string()))
}

/// Only the zero-padded `yyyy-MM-dd` form; chrono alone would also take
/// `2023-1-5` or `+2023-01-05`.
fn parse_date(raw: &str) -> Result<FieldValue, String> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| e.to_string())?;
    if date.format(DATE_FORMAT).to_string() != raw {
        return Err("expected yyyy-MM-dd".to_string());
    }

    Ok(FieldValue::Date(date))
}

fn parse_int(raw: &str) -> Result<FieldValue, String> {
    raw.parse::<i32>().map(FieldValue::Int).map_err(|e| e.to_string())
}

fn parse_long(raw: &str) -> Result<FieldValue, String> {
    raw.parse::<i64>().map(FieldValue::Long).map_err(|e| e.to_string())
}

fn parse_bool(raw: &str) -> Result<FieldValue, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(FieldValue::Bool(true))
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(FieldValue::Bool(false))
    } else {
        Err("expected 'true' or 'false'".to_string())
    }
}

fn parse_repeat(raw: &str) -> Result<FieldValue, String> {
    raw.parse::<RepeatPattern>().map(FieldValue::Repeat)
}

fn parse_time(raw: &str) -> Result<FieldValue, String> {
    if raw == "null" {
        return Ok(FieldValue::Time(None));
    }

    if !is_padded_time(raw) {
        return Err("expected HH:MM[:SS[.fff]]".to_string());
    }

    let format = if raw.len() == 5 { "%H:%M" } else { "%H:%M:%S%.f" };
    NaiveTime::parse_from_str(raw, format)
        .map(|time| FieldValue::Time(Some(time)))
        .map_err(|e| e.to_string())
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.f` with 1 to 9 fraction digits.
fn is_padded_time(raw: &str) -> bool {
    let (clock, fraction) = match raw.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (raw, None),
    };

    let clock_ok = match (clock.len(), fraction) {
        (5, None) | (8, _) => clock
            .bytes()
            .enumerate()
            .all(|(i, b)| if i % 3 == 2 { b == b':' } else { b.is_ascii_digit() }),
        _ => false,
    };
    let fraction_ok =
        fraction.map_or(true, |f| (1..=9).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit()));

    clock_ok && fraction_ok
}
