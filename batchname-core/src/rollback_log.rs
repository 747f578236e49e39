use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::collect::is_rollback_log_name;
use crate::error::BatchError;
use crate::execute::RenameRecord;

pub const LOG_FILE_PREFIX: &str = ".rename_log_";
pub const LOG_FILE_SUFFIX: &str = ".json";

/// Renames performed by one run, kept next to the files for manual reversal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbackLog {
    pub path: PathBuf,
    pub entries: Vec<RenameRecord>,
}

/// File name of the rollback log for a run at `now`
pub fn log_file_name(now: &DateTime<Local>) -> String {
    format!(
        "{}{}{}",
        LOG_FILE_PREFIX,
        now.format("%Y%m%d_%H%M%S"),
        LOG_FILE_SUFFIX
    )
}

impl RollbackLog {
    /// Write `entries` to a new log file in `dir`.
    ///
    /// An existing log from the same second is never overwritten; a numeric
    /// suffix is added instead.
    pub fn write(dir: &Path, entries: &[RenameRecord]) -> Result<Self> {
        let base = log_file_name(&Local::now());
        let stem = base.trim_end_matches(LOG_FILE_SUFFIX);

        let mut attempt = 0;
        let (path, file) = loop {
            let name = if attempt == 0 {
                base.clone()
            } else {
                format!("{}_{}{}", stem, attempt, LOG_FILE_SUFFIX)
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && attempt < 100 => {
                    attempt += 1;
                },
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create rollback log: {}", path.display())
                    })
                },
            }
        };

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)
            .with_context(|| format!("Failed to write rollback log: {}", path.display()))?;
        writer.flush()?;

        Ok(Self {
            path,
            entries: entries.to_vec(),
        })
    }

    /// Load a rollback log from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open rollback log: {}", path.display()))?;
        let entries = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse rollback log: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// All rollback logs in `dir`, newest first. Unreadable logs are skipped.
    pub fn list(dir: &Path) -> Result<Vec<Self>> {
        if !dir.is_dir() {
            return Err(BatchError::DirectoryNotFound(dir.to_path_buf()).into());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
            .filter_map(std::result::Result::ok)
            .filter(|entry| is_rollback_log_name(&entry.file_name().to_string_lossy()))
            .map(|entry| entry.path())
            .collect();

        // Names embed the timestamp, so name order is time order
        paths.sort();
        paths.reverse();

        let mut logs = Vec::new();
        for path in paths {
            match Self::load(&path) {
                Ok(log) => logs.push(log),
                Err(e) => warn!("Ignoring rollback log {}: {:#}", path.display(), e),
            }
        }
        Ok(logs)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().to_string())
    }
}

/// Format rollback logs for display
pub fn format_logs(logs: &[RollbackLog], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(logs)?);
    }

    use comfy_table::{Cell, Color, Table};

    if logs.is_empty() {
        return Ok("No rollback logs found.".to_string());
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Log").fg(Color::Cyan),
        Cell::new("Files").fg(Color::Cyan),
        Cell::new("First rename").fg(Color::Cyan),
        Cell::new("Time").fg(Color::Cyan),
    ]);

    for log in logs {
        let first = log.entries.first().map_or_else(String::new, |e| {
            format!("{} → {}", e.old_name, e.new_name)
        });
        let time = log
            .entries
            .first()
            .map_or_else(String::new, |e| e.timestamp.clone());
        table.add_row(vec![
            Cell::new(log.file_name()),
            Cell::new(log.entries.len().to_string()).fg(Color::Yellow),
            Cell::new(first),
            Cell::new(time),
        ]);
    }

    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record(old: &str, new: &str) -> RenameRecord {
        RenameRecord {
            old_name: old.to_string(),
            new_name: new.to_string(),
            timestamp: "2024-01-15T10:30:00.000000".to_string(),
        }
    }

    #[test]
    fn test_log_file_name() {
        let now = Local.with_ymd_and_hms(2024, 1, 15, 9, 5, 7).unwrap();
        assert_eq!(log_file_name(&now), ".rename_log_20240115_090507.json");
    }

    #[test]
    fn test_write_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let entries = vec![record("a b.txt", "a_b.txt"), record("c d.txt", "c_d.txt")];

        let log = RollbackLog::write(temp_dir.path(), &entries).unwrap();
        assert!(log.path.exists());
        assert!(is_rollback_log_name(&log.file_name()));

        let loaded = RollbackLog::load(&log.path).unwrap();
        assert_eq!(loaded.entries, entries);
    }

    #[test]
    fn test_written_format_is_plain_array() {
        let temp_dir = TempDir::new().unwrap();
        let log = RollbackLog::write(temp_dir.path(), &[record("a b.txt", "a_b.txt")]).unwrap();

        let content = fs::read_to_string(&log.path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["old_name"], "a b.txt");
        assert_eq!(array[0]["new_name"], "a_b.txt");
        assert_eq!(array[0]["timestamp"], "2024-01-15T10:30:00.000000");
        assert!(content.contains("\n  {\n    \"old_name\""));
    }

    #[test]
    fn test_same_second_does_not_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let first = RollbackLog::write(temp_dir.path(), &[record("a", "b")]).unwrap();
        let second = RollbackLog::write(temp_dir.path(), &[record("c", "d")]).unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(RollbackLog::load(&first.path).unwrap().entries[0].old_name, "a");
        assert_eq!(RollbackLog::load(&second.path).unwrap().entries[0].old_name, "c");
    }

    #[test]
    fn test_list_newest_first_and_skips_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(
            dir.join(".rename_log_20240101_000000.json"),
            serde_json::to_string(&[record("old1", "new1")]).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.join(".rename_log_20240202_000000.json"),
            serde_json::to_string(&[record("old2", "new2")]).unwrap(),
        )
        .unwrap();
        fs::write(dir.join(".rename_log_20240303_000000.json"), "not json").unwrap();
        fs::write(dir.join("unrelated.json"), "[]").unwrap();

        let logs = RollbackLog::list(dir).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].file_name(), ".rename_log_20240202_000000.json");
        assert_eq!(logs[1].file_name(), ".rename_log_20240101_000000.json");
    }

    #[test]
    fn test_list_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = RollbackLog::list(&temp_dir.path().join("gone")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BatchError>(),
            Some(BatchError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_format_logs() {
        let logs = vec![RollbackLog {
            path: PathBuf::from("/photos/.rename_log_20240101_000000.json"),
            entries: vec![record("a b.txt", "a_b.txt")],
        }];

        let table = format_logs(&logs, false).unwrap();
        assert!(table.contains(".rename_log_20240101_000000.json"));
        assert!(table.contains("a b.txt → a_b.txt"));

        let json = format_logs(&logs, true).unwrap();
        assert!(json.contains("\"entries\""));

        assert_eq!(format_logs(&[], false).unwrap(), "No rollback logs found.");
    }
}
