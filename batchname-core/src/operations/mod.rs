//! High-level operations that correspond to CLI commands
//!
//! These modules contain the core logic for each batchname command,
//! separated from CLI concerns like argument parsing and output formatting.

pub mod logs;
pub mod plan;
pub mod presets;
pub mod rename;

pub use logs::logs_operation;
pub use plan::{plan_operation, PlanOperationOptions};
pub use presets::{examples_operation, presets_operation};
pub use rename::{rename_operation, RenameOperationOptions};
