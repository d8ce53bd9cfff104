use super::task_service;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task ID
    id: i64,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    if task_service()?.delete_task(args.id)? {
        msg_success!(Message::TaskDeletedWasComplete(args.id));
    } else {
        msg_info!(Message::TaskNotDeletedOrIncomplete(args.id));
    }

    Ok(())
}
