#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod case;
pub mod collect;
pub mod collision;
pub mod config;
pub mod error;
pub mod execute;
pub mod interrupt;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preset;
pub mod preview;
pub mod rollback_log;

pub use case::{convert_case, split_extension, CaseMode};
pub use collect::{collect_files, is_rollback_log_name, CollectOptions};
pub use collision::{detect_collisions, detect_existing_targets, Collision, CollisionKind};
pub use config::Config;
pub use error::BatchError;
pub use execute::{
    execute_plan, execute_plan_with_interrupt, ExecuteOptions, ExecutionReport, FailedRename,
    RenameRecord,
};
pub use operations::{
    examples_operation, logs_operation, plan_operation, presets_operation, rename_operation,
    PlanOperationOptions, RenameOperationOptions,
};
pub use output::{
    EmptyReason, ExamplesResult, LogsResult, OutputFormat, OutputFormatter, PlanResult,
    PresetInfo, PresetsResult, RenameResult, VersionResult,
};
pub use plan::{generate_plan, is_valid_filename, Plan, PlannedRename, SkipReason, Skipped};
pub use preset::{
    build_rule, examples, CompiledRule, Example, Preset, PresetInputs, Rule, RuleError, RuleInput,
};
pub use preview::{render_plan, render_report, Preview};
pub use rollback_log::{format_logs, log_file_name, RollbackLog};
