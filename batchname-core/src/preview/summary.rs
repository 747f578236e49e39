use crate::collision::CollisionKind;
use crate::execute::ExecutionReport;
use crate::plan::{Plan, SkipReason};
use nu_ansi_term::{Color, Style};
use std::fmt::Write;

fn paint(use_color: bool, style: Style, text: &str) -> String {
    if use_color {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn banner(output: &mut String, title: &str, use_color: bool) {
    let rule = "=".repeat(60);
    let style = Color::Cyan.bold();
    writeln!(output, "{}", paint(use_color, style, &rule)).unwrap();
    writeln!(output, "{}", paint(use_color, style, title)).unwrap();
    writeln!(output, "{}", paint(use_color, style, &rule)).unwrap();
    writeln!(output).unwrap();
}

/// Render the plan as the classic text preview: a banner, then one
/// `old → new` line per file. Collisions replace the listing.
pub fn render_summary(plan: &Plan, use_color: bool) -> String {
    let mut output = String::new();
    let warn = Color::Yellow.normal();
    let error = Color::Red.normal();

    for skipped in &plan.skipped {
        let why = match skipped.reason {
            SkipReason::IllegalCharacters => "new name contains illegal characters",
            SkipReason::InvalidName => "new name is not a usable file name",
            SkipReason::NonUtf8Name => "current name is not valid UTF-8",
        };
        let line = format!("⚠️  Skipping {}: {}", skipped.old_name, why);
        writeln!(output, "{}", paint(use_color, warn, &line)).unwrap();
    }
    if !plan.skipped.is_empty() {
        writeln!(output).unwrap();
    }

    if plan.has_collisions() {
        let heading = if plan
            .collisions
            .iter()
            .any(|c| c.kind == CollisionKind::Duplicate)
        {
            "⚠️ Some files would end up with the same name."
        } else {
            "⚠️ Some new names are already taken by other files."
        };
        writeln!(output, "{}", paint(use_color, error.bold(), heading)).unwrap();
        writeln!(
            output,
            "{}",
            paint(use_color, error, "To keep your files safe, the renaming has been stopped.")
        )
        .unwrap();
        writeln!(output).unwrap();

        for collision in &plan.collisions {
            let title = match collision.kind {
                CollisionKind::Duplicate => {
                    format!("These files would all become: {}", collision.target_name())
                },
                CollisionKind::ExistingFile => format!(
                    "A file named {} already exists and would be replaced by:",
                    collision.target_name()
                ),
            };
            writeln!(output, "{}", paint(use_color, error, &title)).unwrap();
            for source in &collision.sources {
                writeln!(output, "{}", paint(use_color, error, &format!("  - {}", source)))
                    .unwrap();
            }
            writeln!(output).unwrap();
        }

        writeln!(
            output,
            "Please adjust your renaming option or text and try the preview again."
        )
        .unwrap();
        return output;
    }

    banner(
        &mut output,
        &format!("PREVIEW: {} file(s) will be renamed", plan.renames.len()),
        use_color,
    );

    for rename in &plan.renames {
        let arrow = paint(use_color, Color::White.normal(), "→");
        let new_name = paint(use_color, Color::Green.normal(), &rename.new_name);
        writeln!(output, "  {:40} {} {}", rename.old_name, arrow, new_name).unwrap();
    }

    output
}

/// Render per-file results and the closing summary of a run
pub fn render_report_text(report: &ExecutionReport, use_color: bool) -> String {
    let mut output = String::new();
    let success = Color::Green.normal();
    let error = Color::Red.normal();
    let warn = Color::Yellow.normal();

    banner(&mut output, "RENAMING FILES...", use_color);

    for record in &report.succeeded {
        let line = format!("✓ {} → {}", record.old_name, record.new_name);
        writeln!(output, "{}", paint(use_color, success, &line)).unwrap();
    }
    for failure in &report.failed {
        let line = format!("✗ {}: {}", failure.old_name, failure.error);
        writeln!(output, "{}", paint(use_color, error, &line)).unwrap();
    }
    writeln!(output).unwrap();

    if report.interrupted {
        let line = format!(
            "Interrupted: {} file(s) were left unchanged.",
            report.not_attempted
        );
        writeln!(output, "{}", paint(use_color, warn, &line)).unwrap();
    }

    if report.failed.is_empty() && !report.interrupted {
        writeln!(
            output,
            "{}",
            paint(use_color, success.bold(), "🎉 All files were renamed successfully.")
        )
        .unwrap();
    } else if !report.failed.is_empty() {
        writeln!(
            output,
            "{}",
            paint(use_color, warn, "⚠️ Some files could not be renamed.")
        )
        .unwrap();
        writeln!(output, "{} file(s) updated successfully.", report.succeeded.len()).unwrap();
        let line = format!("{} file(s) could not be changed.", report.failed.len());
        writeln!(output, "{}", paint(use_color, error, &line)).unwrap();
    }

    if let Some(path) = &report.rollback_log {
        writeln!(output, "📝 Rollback log saved: {}", path.display()).unwrap();
    }
    if let Some(e) = &report.rollback_log_error {
        let line = format!("⚠️  Could not save rollback log: {}", e);
        writeln!(output, "{}", paint(use_color, warn, &line)).unwrap();
    }

    output
}
