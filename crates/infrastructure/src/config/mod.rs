pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader, ConfigSource};
pub use settings::{
    DashboardSettings, FeedbackConfig, LlmSettings, LogSettings, StorageBackendKind,
    StorageSettings, DEFAULT_CSV_PATH, DEFAULT_SQLITE_PATH,
};
