use crate::collect::{collect_files, CollectOptions};
use crate::output::{EmptyReason, PlanResult};
use crate::plan::{generate_plan, Plan};
use crate::preset::{build_rule, Preset, RuleInput};
use crate::preview::{render_plan, Preview};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct PlanOperationOptions {
    pub collect: CollectOptions,
    /// Preview format to render; `None` renders nothing
    pub preview: Option<Preview>,
    pub use_color: Option<bool>,
}

/// Collect the directory, build the rule and work out the renames.
///
/// The second value explains an empty plan.
pub(crate) fn build_plan(
    dir: &Path,
    preset: Preset,
    input: &RuleInput,
    collect: &CollectOptions,
) -> Result<(Plan, Option<EmptyReason>)> {
    let rule = build_rule(preset, input)?;
    let compiled = rule.compile()?;
    let files = collect_files(dir, collect)
        .with_context(|| format!("Failed to collect files in {}", dir.display()))?;

    let mut plan = generate_plan(dir, &files, &rule, &compiled);
    plan.preset = Some(preset.name().to_string());
    debug!(
        preset = %preset,
        rule = %rule,
        renames = plan.renames.len(),
        collisions = plan.collisions.len(),
        "plan generated"
    );

    let empty_reason = if files.is_empty() {
        Some(EmptyReason::NoFiles)
    } else if !plan.is_empty() {
        None
    } else if preset.targets_spaces()
        && !files.iter().any(|f| {
            f.file_name()
                .is_some_and(|n| n.to_string_lossy().contains(char::is_whitespace))
        })
    {
        Some(EmptyReason::NoSpaces)
    } else {
        Some(EmptyReason::NoMatches)
    };

    Ok((plan, empty_reason))
}

pub(crate) fn plan_result(plan: Plan, empty_reason: Option<EmptyReason>) -> PlanResult {
    PlanResult {
        plan_id: plan.id.clone(),
        directory: plan.directory.clone(),
        preset: plan.preset.clone().unwrap_or_default(),
        rule: plan.rule.to_string(),
        files_scanned: plan.files_scanned,
        renames: plan.renames.len(),
        skipped: plan.skipped.len(),
        collisions: plan.collisions.len(),
        empty_reason,
        plan: Some(plan),
    }
}

/// Preview operation - returns structured data and the rendered preview
pub fn plan_operation(
    dir: &Path,
    preset: Preset,
    input: &RuleInput,
    options: &PlanOperationOptions,
) -> Result<(PlanResult, Option<String>)> {
    let (plan, empty_reason) = build_plan(dir, preset, input, &options.collect)?;

    let preview = match options.preview {
        Some(Preview::None) | None => None,
        Some(_) if empty_reason.is_some() => None,
        Some(format) => {
            let use_color = if format == Preview::Json {
                Some(false)
            } else {
                options.use_color
            };
            Some(render_plan(&plan, format, use_color))
        },
    };

    Ok((plan_result(plan, empty_reason), preview))
}
