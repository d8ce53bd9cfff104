//! SQLite-backed task store.
//!
//! ```rust,no_run
//! use dayplan::db::tasks::Tasks;
//! use dayplan::libs::store::TaskStore;
//! use dayplan::libs::task::Task;
//! use chrono::NaiveDate;
//!
//! let mut tasks = Tasks::new()?;
//! let date = NaiveDate::from_ymd_opt(2023, 10, 26).unwrap();
//! let saved = tasks.save(&Task::new(date, 1, "Work", "Write report"))?;
//! assert!(saved.id.is_some());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::db::Db;
use crate::libs::store::TaskStore;
use crate::libs::task::{RepeatPattern, Task};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const TASK_COLUMNS: &str = "id, task_date, day_order, category, name, complete, assigned_time, in_progress, long_term, time_taken, repeat_type, repeat_duration, priority";
const INSERT_TASK: &str = "INSERT INTO tasks (task_date, day_order, category, name, complete, assigned_time, in_progress, long_term, time_taken, repeat_type, repeat_duration, priority)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPSERT_TASK: &str = "INSERT INTO tasks (task_date, day_order, category, name, complete, assigned_time, in_progress, long_term, time_taken, repeat_type, repeat_duration, priority, id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
    ON CONFLICT(id) DO UPDATE SET
        task_date = excluded.task_date,
        day_order = excluded.day_order,
        category = excluded.category,
        name = excluded.name,
        complete = excluded.complete,
        assigned_time = excluded.assigned_time,
        in_progress = excluded.in_progress,
        long_term = excluded.long_term,
        time_taken = excluded.time_taken,
        repeat_type = excluded.repeat_type,
        repeat_duration = excluded.repeat_duration,
        priority = excluded.priority";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_DATE: &str = "WHERE task_date = ?1 ORDER BY id";
const ORDER_BY_ID: &str = "ORDER BY id";

impl ToSql for RepeatPattern {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.name()))
    }
}

impl FromSql for RepeatPattern {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    /// Store on the application database.
    pub fn new() -> Result<Tasks> {
        let db = Db::new()?;
        Ok(Tasks { conn: db.conn })
    }

    /// Store on the database file at `path`.
    pub fn open(path: &Path) -> Result<Tasks> {
        let db = Db::open(path)?;
        Ok(Tasks { conn: db.conn })
    }

    fn select(&self, clause: &str) -> String {
        format!("SELECT {} FROM tasks {}", TASK_COLUMNS, clause)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get(0)?,
            task_date: row.get(1)?,
            day_order: row.get(2)?,
            category: row.get(3)?,
            name: row.get(4)?,
            complete: row.get(5)?,
            assigned_time: row.get(6)?,
            in_progress: row.get(7)?,
            long_term: row.get(8)?,
            time_taken: row.get(9)?,
            repeat_type: row.get(10)?,
            repeat_duration: row.get(11)?,
            priority: row.get(12)?,
        })
    }

    fn query(&self, clause: &str, date: Option<NaiveDate>) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&self.select(clause))?;
        let task_iter = match date {
            Some(date) => stmt.query_map(params![date], Self::from_row)?,
            None => stmt.query_map([], Self::from_row)?,
        };

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }
}

impl TaskStore for Tasks {
    fn get(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&self.select(WHERE_ID), params![id], Self::from_row)
            .optional()
            .map_err(Into::into)
    }

    fn save(&mut self, task: &Task) -> Result<Task> {
        let values = params![
            task.task_date,
            task.day_order,
            task.category,
            task.name,
            task.complete,
            task.assigned_time,
            task.in_progress,
            task.long_term,
            task.time_taken,
            task.repeat_type,
            task.repeat_duration,
            task.priority,
        ];

        let mut saved = task.clone();
        match task.id {
            Some(id) => {
                let mut values = values.to_vec();
                values.push(&id);
                self.conn.execute(UPSERT_TASK, values.as_slice())?;
            }
            None => {
                self.conn.execute(INSERT_TASK, values)?;
                saved.id = Some(self.conn.last_insert_rowid());
            }
        }

        Ok(saved)
    }

    fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.conn.execute(DELETE_TASK, params![id])?;
        Ok(())
    }

    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        self.query(WHERE_DATE, Some(date))
    }

    fn find_all(&self) -> Result<Vec<Task>> {
        self.query(ORDER_BY_ID, None)
    }
}
