#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use dayplan::libs::clock::FixedClock;
    use dayplan::libs::service::{GroupedTasks, TaskService};
    use dayplan::libs::store::{MemoryStore, TaskStore};
    use dayplan::libs::task::{NewTask, RepeatPattern, Task, TaskDefaults};
    use anyhow::{bail, Result};
    use test_context::{test_context, TestContext};

    struct ServiceTestContext {
        service: TaskService<MemoryStore>,
        completed_at: NaiveTime,
    }

    impl TestContext for ServiceTestContext {
        fn setup() -> Self {
            let completed_at = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
            ServiceTestContext {
                service: TaskService::new(MemoryStore::new()).with_clock(FixedClock(completed_at)),
                completed_at,
            }
        }
    }

    impl ServiceTestContext {
        fn add(&mut self, name: &str, date: NaiveDate) -> Task {
            let result = self.service.add_task(NewTask::new("Work", name, date)).unwrap();
            result.item.unwrap()
        }

        fn stored(&self, id: i64) -> Task {
            self.service.store().get(id).unwrap().unwrap()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Memory store whose reads or writes can be switched to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl TaskStore for FlakyStore {
        fn get(&self, id: i64) -> Result<Option<Task>> {
            if self.fail_reads {
                bail!("database is locked");
            }
            self.inner.get(id)
        }

        fn save(&mut self, task: &Task) -> Result<Task> {
            if self.fail_writes {
                bail!("disk I/O error");
            }
            self.inner.save(task)
        }

        fn delete_by_id(&mut self, id: i64) -> Result<()> {
            self.inner.delete_by_id(id)
        }

        fn find_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
            self.inner.find_by_date(date)
        }

        fn find_all(&self) -> Result<Vec<Task>> {
            self.inner.find_all()
        }
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_add_task_assigns_id_and_defaults(ctx: &mut ServiceTestContext) {
        let result = ctx.service.add_task(NewTask::new("Home", "New Task", date(2023, 10, 26))).unwrap();

        assert_eq!(result.status, "Added");
        let task = result.item.unwrap();
        assert!(task.id.is_some());
        assert_eq!(task.name, "New Task");
        assert_eq!(task.category, "Home");
        assert_eq!(task.day_order, 1);
        assert_eq!(task.repeat_type, RepeatPattern::None);
        assert_eq!(task.repeat_duration, 0);
        assert_eq!(task.priority, 0);
        assert!(!task.complete);
        assert!(!task.long_term);
        assert!(task.assigned_time.is_none());
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_add_task_day_order_counts_same_date(ctx: &mut ServiceTestContext) {
        let first = ctx.add("First", date(2023, 10, 26));
        let other_day = ctx.add("Elsewhere", date(2023, 10, 27));
        let second = ctx.add("Second", date(2023, 10, 26));

        assert_eq!(first.day_order, 1);
        assert_eq!(other_day.day_order, 1);
        assert_eq!(second.day_order, 2);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_add_task_keeps_explicit_values(ctx: &mut ServiceTestContext) {
        let mut new_task = NewTask::new("Health", "Run", date(2023, 10, 26));
        new_task.repeat_type = Some(RepeatPattern::EveryXDays);
        new_task.repeat_duration = Some(2);
        new_task.priority = Some(3);
        new_task.long_term = Some(true);

        let task = ctx.service.add_task(new_task).unwrap().item.unwrap();
        assert_eq!(task.repeat_type, RepeatPattern::EveryXDays);
        assert_eq!(task.repeat_duration, 2);
        assert_eq!(task.priority, 3);
        assert!(task.long_term);
    }

    #[test]
    fn test_add_task_uses_configured_defaults() {
        let defaults = TaskDefaults {
            repeat_type: RepeatPattern::EveryXWeeks,
            repeat_duration: 1,
            priority: 5,
            long_term: true,
        };
        let mut service = TaskService::new(MemoryStore::new()).with_defaults(defaults);

        let task = service.add_task(NewTask::new("Work", "Standup", date(2024, 1, 8))).unwrap().item.unwrap();
        assert_eq!(task.repeat_type, RepeatPattern::EveryXWeeks);
        assert_eq!(task.repeat_duration, 1);
        assert_eq!(task.priority, 5);
        assert!(task.long_term);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_update_task_name(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Original", date(2023, 10, 26)).id.unwrap();

        let result = ctx.service.update_field(id, "taskName", "Updated Task");

        assert_eq!(result.status, "Updated");
        assert_eq!(result.item.unwrap().name, "Updated Task");
        assert_eq!(ctx.stored(id).name, "Updated Task");
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_update_every_field(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();

        let updates = [
            ("taskName", "Renamed"),
            ("category", "Errands"),
            ("taskDate", "2023-11-02"),
            ("dayOrder", "7"),
            ("priority", "-2"),
            ("repeatType", "SPECIFIC_WEEKDAYS"),
            ("repeatDuration", "3"),
            ("assignedTime", "09:15"),
            ("inProgress", "TRUE"),
            ("longTerm", "true"),
            ("timeTaken", "9000000000"),
        ];
        for (field, value) in updates {
            let result = ctx.service.update_field(id, field, value);
            assert_eq!(result.status, "Updated", "field {}", field);
        }

        let task = ctx.stored(id);
        assert_eq!(task.name, "Renamed");
        assert_eq!(task.category, "Errands");
        assert_eq!(task.task_date, date(2023, 11, 2));
        assert_eq!(task.day_order, 7);
        assert_eq!(task.priority, -2);
        assert_eq!(task.repeat_type, RepeatPattern::SpecificWeekdays);
        assert_eq!(task.repeat_duration, 3);
        assert_eq!(task.assigned_time, NaiveTime::from_hms_opt(9, 15, 0));
        assert!(task.in_progress);
        assert!(task.long_term);
        assert_eq!(task.time_taken, Some(9_000_000_000));
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_complete_true_stamps_assigned_time(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();
        assert!(ctx.stored(id).assigned_time.is_none());

        let result = ctx.service.update_field(id, "complete", "true");

        assert_eq!(result.status, "Updated");
        let task = result.item.unwrap();
        assert!(task.complete);
        assert_eq!(task.assigned_time, Some(ctx.completed_at));
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_complete_true_overwrites_previous_time(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();
        ctx.service.update_field(id, "assignedTime", "08:00:00");

        let task = ctx.service.update_field(id, "complete", "True").item.unwrap();
        assert_eq!(task.assigned_time, Some(ctx.completed_at));
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_complete_false_keeps_assigned_time(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();

        let untouched = ctx.service.update_field(id, "complete", "false").item.unwrap();
        assert!(!untouched.complete);
        assert!(untouched.assigned_time.is_none());

        ctx.service.update_field(id, "complete", "true");
        let reopened = ctx.service.update_field(id, "complete", "false").item.unwrap();
        assert!(!reopened.complete);
        assert_eq!(reopened.assigned_time, Some(ctx.completed_at));
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_assigned_time_null_clears(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();
        ctx.service.update_field(id, "complete", "true");

        let task = ctx.service.update_field(id, "assignedTime", "null").item.unwrap();
        assert!(task.assigned_time.is_none());
        assert!(task.complete);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_update_missing_task(ctx: &mut ServiceTestContext) {
        ctx.add("Task", date(2023, 10, 26));
        let writes = ctx.service.store().writes();

        let result = ctx.service.update_field(999, "taskName", "Ghost");

        assert_eq!(result.status, "Error: Item not found");
        assert!(result.item.is_none());
        assert!(result.is_error());
        assert_eq!(ctx.service.store().writes(), writes);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_update_invalid_field(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();
        let writes = ctx.service.store().writes();

        let result = ctx.service.update_field(id, "notAField", "x");

        assert_eq!(result.status, "Error: Invalid field");
        assert!(result.item.is_none());
        assert_eq!(ctx.service.store().writes(), writes);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_field_names_are_case_sensitive(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();

        let result = ctx.service.update_field(id, "TaskName", "Renamed");
        assert_eq!(result.status, "Error: Invalid field");
        assert_eq!(ctx.stored(id).name, "Task");
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_bad_values_leave_task_unchanged(ctx: &mut ServiceTestContext) {
        let before = ctx.add("Task", date(2023, 10, 26));
        let id = before.id.unwrap();
        let writes = ctx.service.store().writes();

        let bad = [
            ("dayOrder", "notAnInt"),
            ("priority", "1.5"),
            ("repeatDuration", ""),
            ("timeTaken", "soon"),
            ("taskDate", "2023-13-40"),
            ("taskDate", "26/10/2023"),
            ("taskDate", "2023-1-5"),
            ("taskDate", " 2023-01-05"),
            ("taskDate", "+2023-01-05"),
            ("taskDate", "2023-01-05 "),
            ("complete", "yes"),
            ("inProgress", "1"),
            ("longTerm", ""),
            ("repeatType", "every_x_days"),
            ("repeatType", "DAILY"),
            ("assignedTime", "25:00"),
            ("assignedTime", "NULL"),
            ("assignedTime", "9:15"),
            ("assignedTime", "09:15:7"),
            ("assignedTime", "09:15:00."),
            ("assignedTime", "09:15.5"),
        ];
        for (field, value) in bad {
            let result = ctx.service.update_field(id, field, value);
            assert!(result.status.starts_with("Error:"), "{} = {:?} gave {}", field, value, result.status);
            assert!(result.item.is_none());
        }

        assert_eq!(ctx.service.store().writes(), writes);
        assert_eq!(ctx.stored(id), before);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_conversion_error_names_field_and_value(ctx: &mut ServiceTestContext) {
        let id = ctx.add("Task", date(2023, 10, 26)).id.unwrap();

        let result = ctx.service.update_field(id, "dayOrder", "notAnInt");
        assert!(result.status.starts_with("Error: "));
        assert!(result.status.contains("dayOrder"));
        assert!(result.status.contains("notAnInt"));
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_delete_returns_complete_flag(ctx: &mut ServiceTestContext) {
        let done = ctx.add("Done", date(2023, 10, 26)).id.unwrap();
        let open = ctx.add("Open", date(2023, 10, 26)).id.unwrap();
        ctx.service.update_field(done, "complete", "true");

        assert!(ctx.service.delete_task(done).unwrap());
        assert!(!ctx.service.delete_task(open).unwrap());
        assert!(ctx.service.list_all().unwrap().is_empty());
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_delete_missing_task(ctx: &mut ServiceTestContext) {
        let writes = ctx.service.store().writes();

        assert!(!ctx.service.delete_task(42).unwrap());
        assert_eq!(ctx.service.store().writes(), writes);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_group_by_date_orders_buckets(ctx: &mut ServiceTestContext) {
        ctx.add("Later", date(2023, 10, 27));
        ctx.add("Earlier", date(2023, 10, 26));

        let grouped = ctx.service.group_by_date().unwrap();

        assert_eq!(grouped.dates(), vec!["2023-10-26", "2023-10-27"]);
        assert_eq!(grouped.get("2023-10-26").unwrap()[0].name, "Earlier");
        assert_eq!(grouped.get("2023-10-27").unwrap()[0].name, "Later");
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_group_by_date_keeps_store_order_in_bucket(ctx: &mut ServiceTestContext) {
        ctx.add("A", date(2024, 2, 1));
        ctx.add("B", date(2023, 12, 31));
        ctx.add("C", date(2024, 2, 1));
        let d_id = ctx.add("D", date(2024, 2, 1)).id.unwrap();
        // Reordering does not re-sort the bucket
        ctx.service.update_field(d_id, "dayOrder", "1");

        let grouped = ctx.service.group_by_date().unwrap();

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped.dates(), vec!["2023-12-31", "2024-02-01"]);
        let names: Vec<&str> = grouped.get("2024-02-01").unwrap().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_group_by_date_empty(ctx: &mut ServiceTestContext) {
        let grouped = ctx.service.group_by_date().unwrap();
        assert!(grouped.is_empty());
        assert_eq!(serde_json::to_string(&grouped).unwrap(), r#"{"itemsByDate":{}}"#);
    }

    #[test]
    fn test_merge_bucket_keeps_first_seen() {
        let day = date(2023, 10, 26);
        let mut grouped = GroupedTasks::from_tasks(vec![Task::new(day, 1, "Work", "Kept")]);

        grouped.merge_bucket("2023-10-26".to_string(), vec![Task::new(day, 1, "Work", "Dropped")]);
        grouped.merge_bucket("2023-10-25".to_string(), vec![Task::new(date(2023, 10, 25), 1, "Work", "New")]);

        assert_eq!(grouped.dates(), vec!["2023-10-25", "2023-10-26"]);
        let kept = grouped.get("2023-10-26").unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Kept");
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_created_task_reads_back_equal(ctx: &mut ServiceTestContext) {
        let mut new_task = NewTask::new("Home", "Water plants", date(2023, 10, 26));
        new_task.priority = Some(2);
        let created = ctx.service.add_task(new_task).unwrap().item.unwrap();

        let all = ctx.service.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);

        let mut expected = Task::new(date(2023, 10, 26), 1, "Home", "Water plants");
        expected.priority = 2;
        expected.id = all[0].id;
        assert_eq!(all[0], expected);
    }

    #[test]
    fn test_update_reports_failing_read() {
        let mut service = TaskService::new(FlakyStore::default());
        let id = service.add_task(NewTask::new("Work", "Task", date(2023, 10, 26))).unwrap().item.unwrap().id.unwrap();
        service.store_mut().fail_reads = true;

        let result = service.update_field(id, "taskName", "Renamed");

        assert_eq!(result.status, "Error: database is locked");
        assert!(result.item.is_none());
        assert!(result.is_error());
    }

    #[test]
    fn test_update_reports_failing_write() {
        let mut service = TaskService::new(FlakyStore::default());
        let id = service.add_task(NewTask::new("Work", "Task", date(2023, 10, 26))).unwrap().item.unwrap().id.unwrap();
        service.store_mut().fail_writes = true;

        let result = service.update_field(id, "taskName", "Renamed");

        assert!(result.status.starts_with("Error: "));
        assert!(result.status.contains("disk I/O error"));
        assert!(result.item.is_none());
        assert_eq!(service.store().inner.get(id).unwrap().unwrap().name, "Task");
    }

    #[test_context(ServiceTestContext)]
    #[test]
    fn test_reads_only_need_shared_access(ctx: &mut ServiceTestContext) {
        ctx.add("Task", date(2023, 10, 26));

        let service: &TaskService<MemoryStore> = &ctx.service;

        assert_eq!(service.list_all().unwrap().len(), 1);
        assert_eq!(service.group_by_date().unwrap().dates(), vec!["2023-10-26"]);
    }
}
