use crate::output::LogsResult;
use crate::rollback_log::RollbackLog;
use anyhow::Result;
use std::path::Path;

/// Logs operation - lists rollback logs in `dir`, newest first
pub fn logs_operation(dir: &Path, limit: Option<usize>) -> Result<LogsResult> {
    let mut logs = RollbackLog::list(dir)?;
    if let Some(limit) = limit {
        logs.truncate(limit);
    }

    Ok(LogsResult {
        directory: dir.to_path_buf(),
        logs,
    })
}
