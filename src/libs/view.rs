use super::service::GroupedTasks;
use super::task::Task;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "#", "CATEGORY", "NAME", "DONE", "AT", "PRIORITY", "REPEAT"]);
        for task in tasks {
            table.add_row(Self::task_row(task));
        }
        table.printstd();

        Ok(())
    }

    pub fn grouped(grouped: &GroupedTasks) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "#", "ID", "CATEGORY", "NAME", "DONE"]);
        for (date, tasks) in grouped.iter() {
            for task in tasks {
                table.add_row(row![
                    date,
                    task.day_order,
                    task.id.unwrap_or(0),
                    task.category,
                    task.name,
                    if task.complete { "x" } else { "" }
                ]);
            }
        }
        table.printstd();

        Ok(())
    }

    fn task_row(task: &Task) -> prettytable::Row {
        let repeat = match task.repeat_duration {
            0 => task.repeat_type.to_string(),
            duration => format!("{} ({})", task.repeat_type, duration),
        };

        row![
            task.id.unwrap_or(0),
            task.date_key(),
            task.day_order,
            task.category,
            task.name,
            if task.complete { "x" } else { "" },
            task.assigned_time.map(|time| time.format("%H:%M").to_string()).unwrap_or_default(),
            task.priority,
            repeat
        ]
    }
}
