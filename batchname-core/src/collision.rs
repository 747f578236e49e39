use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::plan::PlannedRename;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionKind {
    /// Several files would get the same new name
    Duplicate,
    /// The new name is already taken by a file that is not being renamed away first
    ExistingFile,
}

/// A target path that cannot be safely claimed by the planned renames
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub target: PathBuf,
    pub kind: CollisionKind,
    /// Old names of the files that want `target`, in plan order
    pub sources: Vec<String>,
}

impl Collision {
    pub fn target_name(&self) -> String {
        self.target.file_name().map_or_else(
            || self.target.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        )
    }
}

/// Find targets claimed by more than one planned rename.
///
/// Collisions are returned in order of the first rename claiming the target.
pub fn detect_collisions(renames: &[PlannedRename]) -> Vec<Collision> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut claims: HashMap<PathBuf, Vec<String>> = HashMap::new();

    for rename in renames {
        let target = rename.target_path();
        let sources = claims.entry(target.clone()).or_insert_with(|| {
            order.push(target);
            Vec::new()
        });
        sources.push(rename.old_name.clone());
    }

    order
        .into_iter()
        .filter_map(|target| {
            let sources = claims.remove(&target)?;
            (sources.len() > 1).then_some(Collision {
                target,
                kind: CollisionKind::Duplicate,
                sources,
            })
        })
        .collect()
}

/// Find renames whose target already exists on disk as a different file.
///
/// Renaming onto an existing name would replace that file, and a file that is
/// itself renamed later in the batch is still in place when its name is
/// claimed, so swaps and chains are reported here as well. A case-only rename
/// on a case-insensitive filesystem resolves to the source itself and is fine.
pub fn detect_existing_targets(renames: &[PlannedRename]) -> Vec<Collision> {
    renames
        .iter()
        .filter_map(|rename| {
            let target = rename.target_path();
            if fs::symlink_metadata(&target).is_err() || is_same_file(&rename.path, &target) {
                return None;
            }
            Some(Collision {
                target,
                kind: CollisionKind::ExistingFile,
                sources: vec![rename.old_name.clone()],
            })
        })
        .collect()
}

/// Whether two paths name the same directory entry
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::symlink_metadata(a), fs::symlink_metadata(b)) {
        (Ok(ma), Ok(mb)) => same_identity(a, &ma, b, &mb),
        _ => false,
    }
}

#[cfg(unix)]
fn same_identity(_a: &Path, ma: &fs::Metadata, _b: &Path, mb: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    ma.dev() == mb.dev() && ma.ino() == mb.ino()
}

#[cfg(not(unix))]
fn same_identity(a: &Path, _ma: &fs::Metadata, b: &Path, _mb: &fs::Metadata) -> bool {
    // Both exist, so paths differing only in case point at one file here
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rename(dir: &Path, old: &str, new: &str) -> PlannedRename {
        PlannedRename {
            path: dir.join(old),
            old_name: old.to_string(),
            new_name: new.to_string(),
        }
    }

    #[test]
    fn test_no_collisions() {
        let dir = Path::new("/photos");
        let renames = vec![rename(dir, "a 1.jpg", "a_1.jpg"), rename(dir, "b 1.jpg", "b_1.jpg")];
        assert!(detect_collisions(&renames).is_empty());
    }

    #[test]
    fn test_duplicate_targets_grouped_in_order() {
        let dir = Path::new("/photos");
        let renames = vec![
            rename(dir, "img1.jpg", "img.jpg"),
            rename(dir, "a b.txt", "a_b.txt"),
            rename(dir, "img2.jpg", "img.jpg"),
            rename(dir, "a  b.txt", "a_b.txt"),
            rename(dir, "img3.jpg", "img.jpg"),
        ];

        let collisions = detect_collisions(&renames);
        assert_eq!(collisions.len(), 2);

        assert_eq!(collisions[0].target, dir.join("img.jpg"));
        assert_eq!(collisions[0].kind, CollisionKind::Duplicate);
        assert_eq!(collisions[0].sources, vec!["img1.jpg", "img2.jpg", "img3.jpg"]);
        assert_eq!(collisions[0].target_name(), "img.jpg");

        assert_eq!(collisions[1].target, dir.join("a_b.txt"));
        assert_eq!(collisions[1].sources, vec!["a b.txt", "a  b.txt"]);
    }

    #[test]
    fn test_existing_target_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("a b.txt"), "source").unwrap();
        fs::write(dir.join("a_b.txt"), "bystander").unwrap();

        let collisions = detect_existing_targets(&[rename(dir, "a b.txt", "a_b.txt")]);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].kind, CollisionKind::ExistingFile);
        assert_eq!(collisions[0].sources, vec!["a b.txt"]);
    }

    #[test]
    fn test_chain_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("1.txt"), "").unwrap();
        fs::write(dir.join("2.txt"), "").unwrap();

        let renames = vec![rename(dir, "1.txt", "2.txt"), rename(dir, "2.txt", "3.txt")];
        let collisions = detect_existing_targets(&renames);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].target, dir.join("2.txt"));
    }

    #[test]
    fn test_free_target_is_not_reported() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("a b.txt"), "").unwrap();

        assert!(detect_existing_targets(&[rename(dir, "a b.txt", "a_b.txt")]).is_empty());
    }

    #[test]
    fn test_same_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("same.txt");
        fs::write(&file, "").unwrap();
        assert!(is_same_file(&file, &file));
        assert!(!is_same_file(&file, &temp_dir.path().join("missing.txt")));
    }
}
