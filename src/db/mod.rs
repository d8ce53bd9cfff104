//! Database layer for the dayplan application.
//!
//! All data lives in one SQLite file in the platform data directory. The
//! schema is owned by the migration system; the other modules only read and
//! write rows.
//!
//! ```rust,no_run
//! use dayplan::db::tasks::Tasks;
//! use dayplan::libs::store::TaskStore;
//!
//! let mut tasks = Tasks::new()?;
//! let all = tasks.find_all()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection management; opening a database applies pending migrations.
pub mod db;

/// Versioned schema changes tracked in the `migrations` table.
pub mod migrations;

/// Single-record note storage.
pub mod scratchpad;

/// `TaskStore` implementation on the `tasks` table.
pub mod tasks;
