//! Core domain logic for Taskline.
//! This crate is the single source of truth for task-tracking invariants.

pub mod command;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use command::parser::{parse_command, CommandData, CommandKind};
pub use error::{DomainError, FormatError, TasklineError, TasklineResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_time::DateTimeValue;
pub use model::task::{RecordError, SnoozeOutcome, SnoozeUnit, Task, TaskKind};
pub use model::task_list::TaskList;
pub use service::tracker::Tracker;
pub use storage::file_store::{FileTaskStore, TaskStore};
pub use storage::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
