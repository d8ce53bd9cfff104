//! Command-line interface.
//!
//! Each subcommand lives in its own module exposing an `Args` struct and a
//! `cmd` function. Task commands go through [`TaskService`] on the SQLite
//! store, configured from `config.json`.

pub mod add;
pub mod delete;
pub mod init;
pub mod list;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod scratchpad;
pub mod update;

use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::service::TaskService;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add a task to a day")]
    Add(add::AddArgs),
    #[command(about = "Change one field of a task", arg_required_else_help = true)]
    Update(update::UpdateArgs),
    #[command(about = "Delete a task", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "List tasks")]
    List(list::ListArgs),
    #[command(about = "Show or replace the scratchpad")]
    Scratchpad(scratchpad::ScratchpadArgs),
    #[cfg(debug_assertions)]
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::Update(args) => update::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Scratchpad(args) => scratchpad::cmd(args),
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Task service on the application database.
pub(crate) fn task_service() -> Result<TaskService<Tasks>> {
    let config = Config::read()?;
    Ok(TaskService::with_config(Tasks::new()?, &config))
}
