use super::task_service;
use crate::libs::{
    messages::Message,
    task::{NewTask, RepeatPattern},
    view::View,
};
use crate::{msg_error, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task category
    category: String,
    /// Task name
    name: String,
    /// Day of the task (YYYY-MM-DD), today when omitted
    #[arg(short, long)]
    date: Option<NaiveDate>,
    /// Repeat pattern: NONE, EVERY_X_DAYS, EVERY_X_WEEKS, EVERY_X_MONTHS or SPECIFIC_WEEKDAYS
    #[arg(long)]
    repeat_type: Option<RepeatPattern>,
    /// Repeat interval for the chosen pattern
    #[arg(long)]
    repeat_duration: Option<i32>,
    #[arg(short, long)]
    priority: Option<i32>,
    /// Mark the task as long-term
    #[arg(long)]
    long_term: bool,
}

pub fn cmd(args: AddArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut new_task = NewTask::new(&args.category, &args.name, date);
    new_task.repeat_type = args.repeat_type;
    new_task.repeat_duration = args.repeat_duration;
    new_task.priority = args.priority;
    new_task.long_term = args.long_term.then_some(true);

    let result = task_service()?.add_task(new_task)?;
    match result.item {
        Some(task) => {
            msg_success!(Message::TaskAdded(task.name.clone()));
            View::tasks(&[task])?;
        }
        None => msg_error!(Message::TaskOperationFailed(result.status)),
    }

    Ok(())
}
