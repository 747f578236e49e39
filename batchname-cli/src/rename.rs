use anyhow::Result;
use batchname_core::{rename_operation, OutputFormatter, Preset, RenameOperationOptions, RuleInput};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_rename(
    dir: &Path,
    preset: Preset,
    input: &RuleInput,
    options: &RenameOperationOptions,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let (result, text) = rename_operation(dir, preset, input, options)?;

    match output {
        OutputFormat::Json => {
            println!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                if let Some(text) = text {
                    println!("{}", text.trim_end());
                }
                if result.dry_run {
                    print!("{}", result.format_summary());
                }
            }
        },
    }

    Ok(())
}
