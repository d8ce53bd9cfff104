//! Task operations: creation, field updates, deletion and grouped listing.
//!
//! [`TaskService`] holds no state of its own between calls besides its
//! configuration; everything lives in the [`TaskStore`]. Each operation does
//! one read followed by at most one write, without a surrounding
//! transaction, so two concurrent `add_task` calls for the same day can end
//! up with the same `day_order`.
//!
//! ## Usage
//!
//! ```rust
//! use dayplan::libs::service::TaskService;
//! use dayplan::libs::store::MemoryStore;
//! use dayplan::libs::task::NewTask;
//! use chrono::NaiveDate;
//!
//! let mut service = TaskService::new(MemoryStore::new());
//! let date = NaiveDate::from_ymd_opt(2023, 10, 26).unwrap();
//! let added = service.add_task(NewTask::new("Work", "Write report", date))?;
//! let id = added.item.unwrap().id.unwrap();
//!
//! let updated = service.update_field(id, "complete", "true");
//! assert_eq!(updated.status, "Updated");
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::clock::{Clock, ReferenceClock};
use super::config::Config;
use super::fields::{apply_field, FieldError, TaskField};
use super::store::TaskStore;
use super::task::{NewTask, Task, TaskDefaults};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use thiserror::Error;
use tracing::{error, info, warn};

pub const STATUS_ADDED: &str = "Added";
pub const STATUS_UPDATED: &str = "Updated";
pub const ERROR_PREFIX: &str = "Error: ";

/// Outcome of a mutating operation: a status label and the affected task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub status: String,
    pub item: Option<Task>,
}

impl OperationResult {
    pub fn success(status: &str, item: Task) -> Self {
        Self {
            status: status.to_string(),
            item: Some(item),
        }
    }

    pub fn failure(error: impl std::fmt::Display) -> Self {
        Self {
            status: format!("{}{}", ERROR_PREFIX, error),
            item: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.starts_with(ERROR_PREFIX)
    }
}

/// Why a field update was refused.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Item not found")]
    NotFound,
    #[error("Invalid field")]
    InvalidField(String),
    #[error(transparent)]
    Conversion(#[from] FieldError),
    #[error("{0}")]
    Store(anyhow::Error),
}

/// Tasks bucketed by ISO date, buckets in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTasks {
    items_by_date: BTreeMap<String, Vec<Task>>,
}

impl GroupedTasks {
    /// Buckets `tasks` by date, keeping their relative order inside a bucket.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut items_by_date: BTreeMap<String, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            items_by_date.entry(task.date_key()).or_default().push(task);
        }

        Self { items_by_date }
    }

    /// Adds a bucket unless one with the same key exists already.
    pub fn merge_bucket(&mut self, date: String, tasks: Vec<Task>) {
        self.items_by_date.entry(date).or_insert(tasks);
    }

    pub fn dates(&self) -> Vec<&str> {
        self.items_by_date.keys().map(String::as_str).collect()
    }

    pub fn get(&self, date: &str) -> Option<&Vec<Task>> {
        self.items_by_date.get(date)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<Task>> {
        self.items_by_date.iter()
    }

    pub fn len(&self) -> usize {
        self.items_by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items_by_date.is_empty()
    }
}

pub struct TaskService<S: TaskStore> {
    store: S,
    clock: Box<dyn Clock>,
    defaults: TaskDefaults,
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Box::new(ReferenceClock::default()),
            defaults: TaskDefaults::default(),
        }
    }

    /// Service configured from the `defaults` and `clock` sections.
    pub fn with_config(store: S, config: &Config) -> Self {
        Self {
            store,
            clock: Box::new(ReferenceClock::new(&config.clock.clone().unwrap_or_default())),
            defaults: config.defaults.clone().unwrap_or_default(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_defaults(mut self, defaults: TaskDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Creates a task at the end of its day.
    pub fn add_task(&mut self, new_task: NewTask) -> Result<OperationResult> {
        let existing = self.store.find_by_date(new_task.task_date)?;
        let day_order = existing.len() as i32 + 1;

        let task = new_task.into_task(day_order, &self.defaults);
        let saved = self.store.save(&task)?;
        info!(id = ?saved.id, date = %saved.date_key(), day_order, "Created new task");

        Ok(OperationResult::success(STATUS_ADDED, saved))
    }

    /// Changes one field of a stored task from its raw string value.
    ///
    /// Never fails: a missing task, an unknown field, a value that does not
    /// convert and a store error all come back as an `"Error: ..."` status
    /// with no item, and nothing is written.
    pub fn update_field(&mut self, id: i64, field: &str, value: &str) -> OperationResult {
        match self.try_update_field(id, field, value) {
            Ok(saved) => {
                info!(id, field, "Updated task field");
                OperationResult::success(STATUS_UPDATED, saved)
            }
            Err(e) => {
                match &e {
                    UpdateError::NotFound => warn!(id, "Attempted to update non-existent task"),
                    UpdateError::InvalidField(name) => warn!(id, field = %name, "Invalid field update attempted"),
                    other => error!(id, field, error = %other, "Error updating task"),
                }
                OperationResult::failure(e)
            }
        }
    }

    fn try_update_field(&mut self, id: i64, field: &str, value: &str) -> Result<Task, UpdateError> {
        let mut task = self.store.get(id).map_err(UpdateError::Store)?.ok_or(UpdateError::NotFound)?;
        let field = TaskField::from_name(field).ok_or_else(|| UpdateError::InvalidField(field.to_string()))?;

        apply_field(&mut task, field, value, self.clock.as_ref())?;

        self.store.save(&task).map_err(UpdateError::Store)
    }

    /// Removes a task and reports whether it had been completed.
    ///
    /// A missing id yields `false` as well, so `false` alone does not tell
    /// whether anything was deleted.
    pub fn delete_task(&mut self, id: i64) -> Result<bool> {
        match self.store.get(id)? {
            Some(task) => {
                self.store.delete_by_id(id)?;
                info!(id, complete = task.complete, "Deleted task");
                Ok(task.complete)
            }
            None => {
                warn!(id, "Attempted to delete non-existent task");
                Ok(false)
            }
        }
    }

    pub fn group_by_date(&self) -> Result<GroupedTasks> {
        let tasks = self.store.find_all()?;
        Ok(GroupedTasks::from_tasks(tasks))
    }

    pub fn list_all(&self) -> Result<Vec<Task>> {
        self.store.find_all()
    }
}
