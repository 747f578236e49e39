use anyhow::Result;
use batchname_core::{logs_operation, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_logs(dir: &Path, limit: Option<usize>, output: OutputFormat) -> Result<()> {
    let result = logs_operation(dir, limit)?;
    println!("{}", result.format(output.into()).trim_end());
    Ok(())
}
