mod json;
mod summary;
mod table;

pub use json::render_json;
pub use summary::{render_report_text, render_summary};
pub use table::render_table;

use crate::execute::ExecutionReport;
use crate::plan::Plan;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    Json,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the specified format
pub fn render_plan(plan: &Plan, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(plan, use_color),
        Preview::Summary => render_summary(plan, use_color),
        Preview::Json => render_json(plan),
        Preview::None => String::new(),
    }
}

/// Render the outcome of an executed plan
pub fn render_report(report: &ExecutionReport, use_color: Option<bool>) -> String {
    render_report_text(report, should_use_color(use_color))
}
