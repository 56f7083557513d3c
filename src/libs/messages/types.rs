#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    PromptSelectModules,
    ConfigModuleUser,
    ConfigModuleBilling,
    ConfigModuleExport,
    PromptUserName,
    PromptRoundingEnabled,
    PromptEnforceMinimum,
    PromptExportDir,
    UserNotConfigured,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === CLIENT MESSAGES ===
    ClientCreated(String),
    ClientRenamed(String),
    ClientDeleted(String),
    ClientNotFound(i64),
    ClientHasEntries(String),
    ClientsNotFound,
    ClientsTitle,
    ConfirmDeleteClient(String),

    // === PRODUCT MESSAGES ===
    ProductCreated(String),
    ProductUpdated(String),
    ProductDeleted(String),
    ProductNotFound(i64),
    ProductsNotFound,
    ProductsTitle,
    ConfirmDeleteProduct(String),

    // === TIME ENTRY MESSAGES ===
    EntryCreated(i64),
    EntryUpdated(i64),
    EntryDeleted(i64),
    EntryNotFound(i64),
    EntriesNotFound(String),
    InvalidTimeOfDay(String),
    SpanSanityWarning(String),
    ConfirmDeleteEntry(i64),

    // === TIMER MESSAGES ===
    TimerStarted(String),
    TimerPaused(String),
    TimerResumed(String),
    TimerStopped(String, String), // actual, rounded
    TimerAbandoned(String),
    TimerConverted(i64),
    TimerDiscarded,
    NoActiveTimer,
    TimerNotRunning,
    TimerNotPaused,
    PromptSaveEntry,
    PromptBilledDuration,
    WatchHint,

    // === REPORT MESSAGES ===
    ReportTitle(String),
    MonthTitle(String),
    NoEntriesForMonth(String),

    // === EXPORT MESSAGES ===
    ExportingData(String, String), // format, month
    ExportCompleted(String),
}
