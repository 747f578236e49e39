use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::collision::{detect_collisions, detect_existing_targets, Collision};
use crate::preset::{CompiledRule, Rule};

/// Characters that are not allowed in file names on Windows
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// One file that will be renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    /// Full path of the file as collected
    pub path: PathBuf,
    pub old_name: String,
    pub new_name: String,
}

impl PlannedRename {
    /// Path the file will have after the rename
    pub fn target_path(&self) -> PathBuf {
        self.path
            .parent()
            .map_or_else(|| PathBuf::from(&self.new_name), |dir| dir.join(&self.new_name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The new name contains `< > : " / \ | ? *`
    IllegalCharacters,
    /// The new name is empty, `.`, `..`, or contains control characters
    InvalidName,
    /// The current name is not valid UTF-8 and cannot be renamed without losing bytes
    NonUtf8Name,
}

/// A file the rule would rename to something unusable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub old_name: String,
    pub new_name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub created_at: String,
    pub directory: PathBuf,
    /// Preset the rule was built from, when there was one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub rule: Rule,
    pub files_scanned: usize,
    pub renames: Vec<PlannedRename>,
    pub skipped: Vec<Skipped>,
    pub collisions: Vec<Collision>,
}

impl Plan {
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Check a proposed name for characters and forms that cannot be used.
pub fn is_valid_filename(name: &str) -> bool {
    validate_filename(name).is_none()
}

fn validate_filename(name: &str) -> Option<SkipReason> {
    if name.contains(ILLEGAL_CHARS) {
        Some(SkipReason::IllegalCharacters)
    } else if name.is_empty() || name == "." || name == ".." || name.chars().any(char::is_control)
    {
        Some(SkipReason::InvalidName)
    } else {
        None
    }
}

/// Apply `rule` to every file and work out what would be renamed.
///
/// Files the rule does not touch, or leaves unchanged, are dropped. Names that
/// fail validation are kept aside in `skipped`. Collisions are computed over
/// the remaining renames.
pub fn generate_plan(
    directory: &Path,
    files: &[PathBuf],
    rule: &Rule,
    compiled: &CompiledRule,
) -> Plan {
    let mut renames = Vec::new();
    let mut skipped = Vec::new();

    for path in files {
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let is_utf8 = file_name.to_str().is_some();
        let old_name = file_name.to_string_lossy().to_string();

        let Some(new_name) = compiled.apply(&old_name) else {
            debug!(file = %old_name, "rule does not match");
            continue;
        };

        if new_name == old_name {
            continue;
        }

        let invalid = if is_utf8 {
            validate_filename(&new_name)
        } else {
            Some(SkipReason::NonUtf8Name)
        };
        if let Some(reason) = invalid {
            warn!(file = %old_name, new_name = %new_name, ?reason, "skipping unusable new name");
            skipped.push(Skipped {
                old_name,
                new_name,
                reason,
            });
            continue;
        }

        debug!(file = %old_name, new_name = %new_name, "planned rename");
        renames.push(PlannedRename {
            path: path.clone(),
            old_name,
            new_name,
        });
    }

    let mut collisions = detect_collisions(&renames);
    for existing in detect_existing_targets(&renames) {
        if !collisions.iter().any(|c| c.target == existing.target) {
            collisions.push(existing);
        }
    }

    Plan {
        id: generate_plan_id(directory, rule),
        created_at: chrono::Local::now().to_rfc3339(),
        directory: directory.to_path_buf(),
        preset: None,
        rule: rule.clone(),
        files_scanned: files.len(),
        renames,
        skipped,
        collisions,
    }
}

fn generate_plan_id(directory: &Path, rule: &Rule) -> String {
    let mut hasher = Sha256::new();
    hasher.update(directory.to_string_lossy().as_bytes());
    hasher.update(format!("{:?}", rule).as_bytes());
    hasher.update(
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .to_string()
            .as_bytes(),
    );
    format!("{:x}", hasher.finalize())[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionKind;
    use crate::preset::{build_rule, Preset, RuleInput};

    fn plan_for(preset: Preset, input: &RuleInput, names: &[&str]) -> Plan {
        let dir = Path::new("/nonexistent/photos");
        let files: Vec<PathBuf> = names.iter().map(|n| dir.join(n)).collect();
        let rule = build_rule(preset, input).unwrap();
        let compiled = rule.compile().unwrap();
        generate_plan(dir, &files, &rule, &compiled)
    }

    #[test]
    fn test_valid_filenames() {
        assert!(is_valid_filename("photo.jpg"));
        assert!(is_valid_filename(".hidden"));
        assert!(is_valid_filename("with space.txt"));
        assert!(!is_valid_filename("a:b.txt"));
        assert!(!is_valid_filename("what?.txt"));
        assert!(!is_valid_filename("dir/file.txt"));
        assert!(!is_valid_filename(""));
        assert!(!is_valid_filename(".."));
        assert!(!is_valid_filename("tab\there"));
    }

    #[test]
    fn test_plan_filters_untouched_and_unchanged() {
        let plan = plan_for(
            Preset::Lowercase,
            &RuleInput::default(),
            &["Photo.JPG", "already.txt", "README"],
        );

        assert_eq!(plan.files_scanned, 3);
        assert_eq!(plan.renames.len(), 2);
        assert_eq!(plan.renames[0].old_name, "Photo.JPG");
        assert_eq!(plan.renames[0].new_name, "photo.JPG");
        assert_eq!(plan.renames[1].new_name, "readme");
        assert!(plan.skipped.is_empty());
        assert!(!plan.has_collisions());
    }

    #[test]
    fn test_plan_skips_illegal_results() {
        let input = RuleInput::new(Some("-".to_string()), Some(":".to_string()));
        let plan = plan_for(Preset::ReplaceText, &input, &["a-b.txt", "plain.txt"]);

        assert!(plan.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].old_name, "a-b.txt");
        assert_eq!(plan.skipped[0].new_name, "a:b.txt");
        assert_eq!(plan.skipped[0].reason, SkipReason::IllegalCharacters);
    }

    #[test]
    fn test_plan_skips_empty_result() {
        let plan = plan_for(Preset::NumbersOnly, &RuleInput::default(), &["notes.txt", "v2.txt"]);

        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].old_name, "notes.txt");
        assert_eq!(plan.skipped[0].reason, SkipReason::InvalidName);
        assert_eq!(plan.renames.len(), 1);
        assert_eq!(plan.renames[0].new_name, "2");
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new("/nonexistent/menus");
        let files = vec![
            dir.join(OsStr::from_bytes(b"caf\xe9 menu.txt")),
            dir.join(OsStr::from_bytes(b"caf\xe9.txt")),
            dir.join("lunch menu.txt"),
        ];
        let rule = build_rule(Preset::SpacesToUnderscores, &RuleInput::default()).unwrap();
        let compiled = rule.compile().unwrap();
        let plan = generate_plan(dir, &files, &rule, &compiled);

        assert_eq!(plan.renames.len(), 1);
        assert_eq!(plan.renames[0].new_name, "lunch_menu.txt");
        // The untouched non-UTF-8 name is not reported at all
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].reason, SkipReason::NonUtf8Name);
        assert_eq!(plan.skipped[0].old_name, "caf\u{FFFD} menu.txt");
    }

    #[test]
    fn test_plan_detects_collisions() {
        let plan = plan_for(
            Preset::RemoveNumbers,
            &RuleInput::default(),
            &["img1.jpg", "img2.jpg", "other.jpg"],
        );

        assert_eq!(plan.renames.len(), 2);
        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(plan.collisions[0].kind, CollisionKind::Duplicate);
        assert_eq!(plan.collisions[0].target_name(), "img.jpg");
        assert_eq!(plan.collisions[0].sources, vec!["img1.jpg", "img2.jpg"]);
    }

    #[test]
    fn test_target_path() {
        let rename = PlannedRename {
            path: PathBuf::from("/photos/a b.jpg"),
            old_name: "a b.jpg".to_string(),
            new_name: "a_b.jpg".to_string(),
        };
        assert_eq!(rename.target_path(), PathBuf::from("/photos/a_b.jpg"));
    }

    #[test]
    fn test_plan_ids_are_short_hex() {
        let plan = plan_for(Preset::Uppercase, &RuleInput::default(), &["a.txt"]);
        assert_eq!(plan.id.len(), 16);
        assert!(plan.id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
