//! Core library modules for the dayplan application.
//!
//! ## Features
//!
//! - **Task Model**: Task records, repeat patterns and creation defaults
//! - **Task Operations**: Field updates, creation, deletion and date grouping
//! - **Storage Seam**: The `TaskStore` trait and an in-memory store
//! - **Infrastructure**: Configuration, data directory, messaging, console views
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dayplan::db::tasks::Tasks;
//! use dayplan::libs::service::TaskService;
//!
//! let mut service = TaskService::new(Tasks::new()?);
//! let grouped = service.group_by_date()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod clock;
pub mod config;
pub mod data_storage;
pub mod fields;
pub mod messages;
pub mod service;
pub mod store;
pub mod task;
pub mod view;
