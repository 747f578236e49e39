use anyhow::Result;
use batchname_core::{plan_operation, OutputFormatter, PlanOperationOptions, Preset, RuleInput};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_preview(
    dir: &Path,
    preset: Preset,
    input: &RuleInput,
    options: &PlanOperationOptions,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let (result, preview) = plan_operation(dir, preset, input, options)?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                if let Some(preview) = preview {
                    println!("{}", preview.trim_end());
                    println!();
                }
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
