//! Storage seam for task records.
//!
//! The task service only talks to a [`TaskStore`]. The SQLite implementation
//! lives in [`crate::db::tasks`]; [`MemoryStore`] keeps everything in process
//! and counts writes, which makes it handy for embedding and for tests.

use super::task::Task;
use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Keyed task storage with a secondary lookup by date.
pub trait TaskStore {
    fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Inserts a task without id (assigning one) or overwrites an existing one.
    fn save(&mut self, task: &Task) -> Result<Task>;

    fn delete_by_id(&mut self, id: i64) -> Result<()>;

    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Task>>;

    /// All tasks in id order.
    fn find_all(&self) -> Result<Vec<Task>>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` and `delete_by_id` calls served so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TaskStore for MemoryStore {
    fn get(&self, id: i64) -> Result<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn save(&mut self, task: &Task) -> Result<Task> {
        self.writes += 1;
        let mut saved = task.clone();
        let id = match saved.id {
            Some(id) => {
                self.next_id = self.next_id.max(id);
                id
            }
            None => {
                self.next_id += 1;
                self.next_id
            }
        };
        saved.id = Some(id);
        self.tasks.insert(id, saved.clone());

        Ok(saved)
    }

    fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.writes += 1;
        self.tasks.remove(&id);
        Ok(())
    }

    fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        Ok(self.tasks.values().filter(|task| task.task_date == date).cloned().collect())
    }

    fn find_all(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.values().cloned().collect())
    }
}
