use anyhow::Result;
use batchname_core::{examples_operation, presets_operation, OutputFormatter};

use crate::OutputFormat;

pub fn handle_presets(output: OutputFormat) -> Result<()> {
    let result = presets_operation();
    print!("{}", result.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}

pub fn handle_examples(output: OutputFormat) -> Result<()> {
    let result = examples_operation();
    print!("{}", result.format(output.into()));
    if output == OutputFormat::Json {
        println!();
    }
    Ok(())
}
