use anyhow::{anyhow, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::BatchError;
use crate::rollback_log::{LOG_FILE_PREFIX, LOG_FILE_SUFFIX};

/// Options controlling which files of the directory are considered
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Only `false` is supported; descending into subdirectories is not implemented
    pub recursive: bool,
    /// Glob patterns matched against the file name; empty means everything
    pub include: Vec<String>,
    /// Glob patterns matched against the file name
    pub exclude: Vec<String>,
    /// Skip dotfiles
    pub skip_hidden: bool,
    /// Skip rollback logs written by earlier runs
    pub skip_rollback_logs: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            include: Vec::new(),
            exclude: Vec::new(),
            skip_hidden: false,
            skip_rollback_logs: true,
        }
    }
}

/// Whether `name` looks like a rollback log written by the executor
pub fn is_rollback_log_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

/// List the regular files directly inside `dir`, sorted by path.
pub fn collect_files(dir: &Path, options: &CollectOptions) -> Result<Vec<PathBuf>> {
    if options.recursive {
        return Err(anyhow!("Recursive collection is not supported"));
    }

    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound(dir.to_path_buf()).into());
    }

    let includes = build_globset(&options.include)?;
    let excludes = build_globset(&options.exclude)?;

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        let path = entry.path();

        // Follows symlinks, so a link to a regular file counts as a file
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();

        if options.skip_rollback_logs && is_rollback_log_name(&name) {
            debug!(file = %name, "skipping rollback log");
            continue;
        }
        if options.skip_hidden && name.starts_with('.') {
            continue;
        }
        if let Some(ref includes) = includes {
            if !includes.is_match(&*name) {
                continue;
            }
        }
        if let Some(ref excludes) = excludes {
            if excludes.is_match(&*name) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "collected files");
    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, BatchError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| BatchError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|source| BatchError::InvalidGlob {
        pattern: patterns.join(", "),
        source,
    })?;
    Ok(Some(set))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    fn setup() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("b file.txt"), "").unwrap();
        fs::write(root.join("a file.jpg"), "").unwrap();
        fs::write(root.join(".hidden"), "").unwrap();
        fs::write(root.join(".rename_log_20240101_120000.json"), "[]").unwrap();
        fs::create_dir(root.join("subdir")).unwrap();
        fs::write(root.join("subdir").join("nested.txt"), "").unwrap();
        temp_dir
    }

    #[test]
    fn test_collects_files_sorted_and_non_recursive() {
        let temp_dir = setup();
        let files = collect_files(temp_dir.path(), &CollectOptions::default()).unwrap();
        assert_eq!(names(&files), vec![".hidden", "a file.jpg", "b file.txt"]);
        assert!(files.iter().all(|f| f.parent() == Some(temp_dir.path())));
    }

    #[test]
    fn test_skip_hidden() {
        let temp_dir = setup();
        let options = CollectOptions {
            skip_hidden: true,
            ..CollectOptions::default()
        };
        let files = collect_files(temp_dir.path(), &options).unwrap();
        assert_eq!(names(&files), vec!["a file.jpg", "b file.txt"]);
    }

    #[test]
    fn test_rollback_logs_can_be_included() {
        let temp_dir = setup();
        let options = CollectOptions {
            skip_rollback_logs: false,
            ..CollectOptions::default()
        };
        let files = collect_files(temp_dir.path(), &options).unwrap();
        assert!(names(&files).contains(&".rename_log_20240101_120000.json".to_string()));
    }

    #[test]
    fn test_include_and_exclude_globs() {
        let temp_dir = setup();
        let options = CollectOptions {
            include: vec!["*.txt".to_string(), "*.jpg".to_string()],
            exclude: vec!["a *".to_string()],
            ..CollectOptions::default()
        };
        let files = collect_files(temp_dir.path(), &options).unwrap();
        assert_eq!(names(&files), vec!["b file.txt"]);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = collect_files(temp_dir.path(), &CollectOptions::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = collect_files(&temp_dir.path().join("nope"), &CollectOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BatchError>(),
            Some(BatchError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_bad_glob_is_typed() {
        let temp_dir = setup();
        let options = CollectOptions {
            include: vec!["[unclosed".to_string()],
            ..CollectOptions::default()
        };
        let err = collect_files(temp_dir.path(), &options).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BatchError>(),
            Some(BatchError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn test_recursive_is_rejected() {
        let temp_dir = setup();
        let options = CollectOptions {
            recursive: true,
            ..CollectOptions::default()
        };
        assert!(collect_files(temp_dir.path(), &options).is_err());
    }

    #[test]
    fn test_rollback_log_name() {
        assert!(is_rollback_log_name(".rename_log_20240101_120000.json"));
        assert!(is_rollback_log_name(".rename_log_20240101_120000_1.json"));
        assert!(!is_rollback_log_name("rename_log.json"));
        assert!(!is_rollback_log_name(".rename_log_20240101_120000.txt"));
    }
}
