#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskAdded(String),          // task name
    TaskFieldUpdated(i64, String), // id, field
    TaskDeletedWasComplete(i64),
    TaskNotDeletedOrIncomplete(i64),
    TaskOperationFailed(String), // status
    NoTasksFound,
    TasksHeader,
    TasksByDateHeader,

    // === SCRATCHPAD MESSAGES ===
    ScratchpadSaved,
    ScratchpadEmpty,
    ScratchpadLastModified(String), // timestamp

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigParseError,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    NothingToRollback,
    RollingBack(u32, u32),  // from, to
    RollbackCompleted(u32), // version
}
