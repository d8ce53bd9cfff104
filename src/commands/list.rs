use super::task_service;
use crate::libs::{messages::Message, view::View};
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Group tasks by date
    #[arg(short, long)]
    grouped: bool,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let service = task_service()?;

    if args.grouped {
        let grouped = service.group_by_date()?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&grouped)?);
        } else if grouped.is_empty() {
            msg_info!(Message::NoTasksFound);
        } else {
            msg_print!(Message::TasksByDateHeader, true);
            View::grouped(&grouped)?;
        }
        return Ok(());
    }

    let tasks = service.list_all()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
    } else {
        msg_print!(Message::TasksHeader, true);
        View::tasks(&tasks)?;
    }

    Ok(())
}
