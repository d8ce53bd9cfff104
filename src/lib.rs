//! # Dayplan - daily task planning
//!
//! A command-line task planner that keeps daily to-do lists in a local
//! SQLite database.
//!
//! ## Features
//!
//! - **Task Creation**: New tasks are appended to the end of their day
//! - **Field Updates**: Change any single field from its string form; ticking
//!   a task off records the time it happened
//! - **Date Grouping**: All tasks bucketed by day, days in ascending order
//! - **Scratchpad**: One free-form note next to the task lists
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dayplan::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
