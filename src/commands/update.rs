use super::task_service;
use crate::libs::{messages::Message, view::View};
use crate::{msg_error, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Task ID
    id: i64,
    /// Field name, e.g. taskName, complete, dayOrder, assignedTime
    field: String,
    /// New value; `null` clears assignedTime
    value: String,
}

pub fn cmd(args: UpdateArgs) -> Result<()> {
    let result = task_service()?.update_field(args.id, &args.field, &args.value);

    match result.item {
        Some(task) if !result.is_error() => {
            msg_success!(Message::TaskFieldUpdated(args.id, args.field));
            View::tasks(&[task])?;
        }
        _ => msg_error!(Message::TaskOperationFailed(result.status)),
    }

    Ok(())
}
