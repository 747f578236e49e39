use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

use crate::execute::ExecutionReport;
use crate::plan::Plan;
use crate::preset::{Example, Preset, PresetInputs};
use crate::rollback_log::{format_logs, RollbackLog};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Why a plan came out empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// The directory has no regular files
    NoFiles,
    /// A spaces preset was chosen but no name contains a space
    NoSpaces,
    /// The rule did not change any name
    NoMatches,
}

impl EmptyReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoFiles => "This folder doesn't contain any files that can be renamed.",
            Self::NoSpaces => "None of the filenames contain any spaces.",
            Self::NoMatches => "None of the files in this folder match your chosen option.",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::NoFiles => "Choose a different folder and try again.",
            Self::NoSpaces => {
                "There's nothing to replace. Try choosing a different option or selecting another folder."
            },
            Self::NoMatches => {
                "Try adjusting your renaming option or the text you entered, then preview again."
            },
        }
    }
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub plan_id: String,
    pub directory: PathBuf,
    pub preset: String,
    pub rule: String,
    pub files_scanned: usize,
    pub renames: usize,
    pub skipped: usize,
    pub collisions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<EmptyReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
}

/// Result of a rename operation
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub plan_id: String,
    pub preset: String,
    pub renamed: usize,
    pub failed: usize,
    pub not_attempted: usize,
    pub interrupted: bool,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_log: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ExecutionReport>,
}

/// Result of listing rollback logs
#[derive(Debug, Serialize, Deserialize)]
pub struct LogsResult {
    pub directory: PathBuf,
    pub logs: Vec<RollbackLog>,
}

#[derive(Debug, Serialize)]
pub struct PresetInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub inputs: PresetInputs,
}

impl From<Preset> for PresetInfo {
    fn from(preset: Preset) -> Self {
        Self {
            name: preset.name(),
            label: preset.label(),
            description: preset.description(),
            inputs: preset.inputs(),
        }
    }
}

/// Result of listing presets
#[derive(Debug, Serialize)]
pub struct PresetsResult {
    pub presets: Vec<PresetInfo>,
}

/// Result of listing regex examples
#[derive(Debug, Serialize)]
pub struct ExamplesResult {
    pub examples: Vec<Example>,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "preview",
            "plan_id": self.plan_id,
            "directory": self.directory,
            "preset": self.preset,
            "rule": self.rule,
            "summary": {
                "files_scanned": self.files_scanned,
                "renames": self.renames,
                "skipped": self.skipped,
                "collisions": self.collisions,
            },
            "empty_reason": self.empty_reason,
            "message": self.empty_reason.map(EmptyReason::message),
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if let Some(reason) = self.empty_reason {
            writeln!(output, "ℹ️ {}", reason.message()).unwrap();
            writeln!(output, "{}", reason.hint()).unwrap();
            return output;
        }

        writeln!(output, "✓ Found {} file(s)", self.files_scanned).unwrap();
        write!(output, "{} file(s) would be renamed", self.renames).unwrap();
        if self.skipped > 0 {
            write!(output, ", {} skipped", self.skipped).unwrap();
        }
        writeln!(output).unwrap();

        if self.collisions > 0 {
            writeln!(
                output,
                "✗ {} collision(s) detected; nothing can be renamed",
                self.collisions
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.failed == 0 && !self.interrupted,
            "operation": "rename",
            "plan_id": self.plan_id,
            "preset": self.preset,
            "dry_run": self.dry_run,
            "summary": {
                "renamed": self.renamed,
                "failed": self.failed,
                "not_attempted": self.not_attempted,
            },
            "interrupted": self.interrupted,
            "rollback_log": self.rollback_log,
            "report": self.report,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.dry_run {
            return "Dry run: no files were renamed.\n".to_string();
        }

        let mut output = format!("✓ Renamed {} file(s)\n", self.renamed);
        if self.failed > 0 {
            writeln!(output, "✗ {} file(s) could not be renamed", self.failed).unwrap();
        }
        if self.interrupted {
            writeln!(output, "Interrupted with {} file(s) left", self.not_attempted).unwrap();
        }
        if let Some(ref log) = self.rollback_log {
            writeln!(output, "Rollback log: {}", log.display()).unwrap();
        }
        output
    }
}

impl OutputFormatter for LogsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "directory": self.directory,
            "logs": self.logs,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format_logs(&self.logs, false).unwrap_or_default()
    }
}

impl OutputFormatter for PresetsResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({ "presets": self.presets })).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let width = self.presets.iter().map(|p| p.name.len()).max().unwrap_or(0);
        let mut output = String::new();
        for preset in &self.presets {
            let needs = match preset.inputs {
                PresetInputs::None => "",
                PresetInputs::Text => " (--text)",
                PresetInputs::TextAndReplacement => " (--text, --with)",
                PresetInputs::PatternAndReplacement => " (--pattern, --replacement)",
            };
            writeln!(
                output,
                "  {:width$}  {}{}",
                preset.name,
                preset.description,
                needs,
                width = width
            )
            .unwrap();
        }
        output
    }
}

impl OutputFormatter for ExamplesResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({ "examples": self.examples })).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::from("Regex examples for the custom preset:\n");
        for (i, example) in self.examples.iter().enumerate() {
            writeln!(output).unwrap();
            writeln!(output, "{}. {}", i + 1, example.title).unwrap();
            writeln!(output, "   Pattern:     {}", example.pattern).unwrap();
            writeln!(output, "   Replacement: {}", example.replacement).unwrap();
            writeln!(output, "   {} → {}", example.before, example.after).unwrap();
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
