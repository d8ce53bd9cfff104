//! Display implementation for dayplan application messages.
//!
//! All user-facing text is defined here, in one place, so that commands and
//! database code only deal with structured [`Message`] values.
//!
//! ```rust
//! use dayplan::libs::messages::Message;
//!
//! let message = Message::TaskDeletedWasComplete(7);
//! assert_eq!(message.to_string(), "Task 7 deleted (it was complete)");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskAdded(name) => format!("Task '{}' added", name),
            Message::TaskFieldUpdated(id, field) => format!("Task {} updated: {}", id, field),
            Message::TaskDeletedWasComplete(id) => format!("Task {} deleted (it was complete)", id),
            Message::TaskNotDeletedOrIncomplete(id) => {
                format!("Task {} was incomplete or did not exist", id)
            }
            Message::TaskOperationFailed(status) => status.clone(),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::TasksByDateHeader => "Tasks by date:".to_string(),

            // === SCRATCHPAD MESSAGES ===
            Message::ScratchpadSaved => "Scratchpad saved".to_string(),
            Message::ScratchpadEmpty => "Scratchpad is empty.".to_string(),
            Message::ScratchpadLastModified(timestamp) => format!("Last modified: {}", timestamp),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "Configuration file not found".to_string(),
            Message::ConfigParseError => "Failed to parse configuration".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NothingToRollback => "Nothing to rollback".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rolled back to version {}", version),
        };
        write!(f, "{}", text)
    }
}
