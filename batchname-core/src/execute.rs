use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::collision::is_same_file;
use crate::error::BatchError;
use crate::interrupt;
use crate::plan::Plan;
use crate::rollback_log::RollbackLog;

/// Options for executing a rename plan
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Write a rollback log when at least one rename succeeded
    pub write_rollback_log: bool,
    /// Where to put the rollback log; defaults to the plan's directory
    pub log_dir: Option<PathBuf>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            write_rollback_log: true,
            log_dir: None,
        }
    }
}

/// A rename that was performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameRecord {
    pub old_name: String,
    pub new_name: String,
    /// Local time of the rename, ISO 8601 without offset
    pub timestamp: String,
}

/// A rename that was attempted and failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRename {
    pub old_name: String,
    pub new_name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub succeeded: Vec<RenameRecord>,
    pub failed: Vec<FailedRename>,
    /// Renames never attempted because the run was interrupted
    pub not_attempted: usize,
    pub interrupted: bool,
    pub rollback_log: Option<PathBuf>,
    pub rollback_log_error: Option<String>,
}

impl ExecutionReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.not_attempted == 0
    }
}

/// Rename the files of `plan` one by one.
///
/// A failing rename is recorded and the run continues with the next file.
/// Plans with collisions are refused outright.
pub fn execute_plan(plan: &Plan, options: &ExecuteOptions) -> Result<ExecutionReport> {
    execute_plan_with_interrupt(plan, options, interrupt::interrupt_flag())
}

/// Like [`execute_plan`], stopping before the next rename once `interrupted` is set.
pub fn execute_plan_with_interrupt(
    plan: &Plan,
    options: &ExecuteOptions,
    interrupted: &AtomicBool,
) -> Result<ExecutionReport> {
    if plan.is_empty() {
        return Err(anyhow!("Nothing to rename: the plan is empty"));
    }
    if plan.has_collisions() {
        return Err(BatchError::Collisions(plan.collisions.len()).into());
    }

    let mut report = ExecutionReport::default();

    for (index, rename) in plan.renames.iter().enumerate() {
        if interrupted.load(Ordering::SeqCst) {
            report.interrupted = true;
            report.not_attempted = plan.renames.len() - index;
            warn!(remaining = report.not_attempted, "interrupted, stopping before the next rename");
            break;
        }

        let target = rename.target_path();

        // Something may have claimed the name since the plan was made
        let result = if target.exists() && !is_same_file(&rename.path, &target) {
            Err(anyhow!("{} already exists", rename.new_name))
        } else {
            fs::rename(&rename.path, &target).map_err(anyhow::Error::from)
        };

        match result {
            Ok(()) => {
                info!(from = %rename.old_name, to = %rename.new_name, "renamed");
                report.succeeded.push(RenameRecord {
                    old_name: rename.old_name.clone(),
                    new_name: rename.new_name.clone(),
                    timestamp: chrono::Local::now()
                        .format("%Y-%m-%dT%H:%M:%S%.6f")
                        .to_string(),
                });
            },
            Err(e) => {
                warn!(file = %rename.old_name, error = %e, "rename failed");
                report.failed.push(FailedRename {
                    old_name: rename.old_name.clone(),
                    new_name: rename.new_name.clone(),
                    error: e.to_string(),
                });
            },
        }
    }

    if options.write_rollback_log && !report.succeeded.is_empty() {
        let log_dir = options.log_dir.as_ref().unwrap_or(&plan.directory);
        match RollbackLog::write(log_dir, &report.succeeded) {
            Ok(log) => report.rollback_log = Some(log.path),
            Err(e) => {
                warn!("Could not save rollback log: {:#}", e);
                report.rollback_log_error = Some(format!("{:#}", e));
            },
        }
    }

    Ok(report)
}
