use crate::collect::CollectOptions;
use crate::error::BatchError;
use crate::execute::{execute_plan, ExecuteOptions};
use crate::interrupt::ConfirmationPromptGuard;
use crate::output::RenameResult;
use crate::plan::Plan;
use crate::preset::{Preset, RuleInput};
use crate::preview::{render_plan, render_report, Preview};
use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write as IoWrite};
use std::path::Path;

use super::plan::build_plan;

#[derive(Debug, Clone)]
pub struct RenameOperationOptions {
    pub collect: CollectOptions,
    pub preview: Option<Preview>,
    pub use_color: Option<bool>,
    pub dry_run: bool,
    pub auto_approve: bool,
    pub write_rollback_log: bool,
}

impl Default for RenameOperationOptions {
    fn default() -> Self {
        Self {
            collect: CollectOptions::default(),
            preview: Some(Preview::Summary),
            use_color: None,
            dry_run: false,
            auto_approve: false,
            write_rollback_log: true,
        }
    }
}

fn unchanged_result(plan: &Plan, dry_run: bool) -> RenameResult {
    RenameResult {
        plan_id: plan.id.clone(),
        preset: plan.preset.clone().unwrap_or_default(),
        renamed: 0,
        failed: 0,
        not_attempted: 0,
        interrupted: false,
        dry_run,
        rollback_log: None,
        report: None,
    }
}

/// Rename operation - previews, confirms and renames in one go
pub fn rename_operation(
    dir: &Path,
    preset: Preset,
    input: &RuleInput,
    options: &RenameOperationOptions,
) -> Result<(RenameResult, Option<String>)> {
    let (plan, empty_reason) = build_plan(dir, preset, input, &options.collect)?;

    if let Some(reason) = empty_reason {
        return Ok((
            unchanged_result(&plan, options.dry_run),
            Some(format!("ℹ️ {}\n{}", reason.message(), reason.hint())),
        ));
    }

    let preview = match options.preview {
        Some(Preview::None) | None => None,
        Some(format) => Some(render_plan(&plan, format, options.use_color)),
    };

    if plan.has_collisions() {
        if let Some(ref preview) = preview {
            println!("{}", preview);
        }
        return Err(BatchError::Collisions(plan.collisions.len()).into());
    }

    if options.dry_run {
        return Ok((unchanged_result(&plan, true), preview));
    }

    if !options.auto_approve && !io::stdin().is_terminal() {
        return Err(BatchError::NonInteractive.into());
    }

    if !options.auto_approve {
        if let Some(ref preview) = preview {
            println!("{}", preview);
        }
        if !get_user_confirmation(plan.renames.len())? {
            return Ok((unchanged_result(&plan, false), Some("Aborted.".to_string())));
        }
    }

    eprintln!("Renaming files...");
    let report = execute_plan(
        &plan,
        &ExecuteOptions {
            write_rollback_log: options.write_rollback_log,
            log_dir: None,
        },
    )?;

    let rendered = render_report(&report, options.use_color);
    // Previews are printed before the prompt; with --yes they go out with the report
    let output = match preview {
        Some(preview) if options.auto_approve => format!("{}\n{}", preview, rendered),
        _ => rendered,
    };

    let result = RenameResult {
        plan_id: plan.id.clone(),
        preset: plan.preset.clone().unwrap_or_default(),
        renamed: report.succeeded.len(),
        failed: report.failed.len(),
        not_attempted: report.not_attempted,
        interrupted: report.interrupted,
        dry_run: false,
        rollback_log: report.rollback_log.clone(),
        report: Some(report),
    };

    Ok((result, Some(output)))
}

fn get_user_confirmation(count: usize) -> Result<bool> {
    let _guard = ConfirmationPromptGuard::activate();
    // stderr, so the prompt never mixes with JSON on stdout
    confirm(count, &mut io::stdin().lock(), &mut io::stderr())
}

fn confirm(count: usize, input: &mut impl BufRead, prompt: &mut impl IoWrite) -> Result<bool> {
    write!(prompt, "Rename {} file(s)? [y/N]: ", count).context("Failed to write prompt")?;
    prompt.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read user input")?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}
