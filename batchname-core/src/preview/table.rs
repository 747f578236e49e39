use crate::collision::CollisionKind;
use crate::plan::Plan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render plan as a table of old and new names
pub fn render_table(plan: &Plan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Old name").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Old name", "New name", "Status"]);
    }

    for rename in &plan.renames {
        let collision = plan
            .collisions
            .iter()
            .find(|c| c.sources.contains(&rename.old_name) && c.target == rename.target_path());
        let status = match collision.map(|c| c.kind) {
            Some(CollisionKind::Duplicate) => "duplicate",
            Some(CollisionKind::ExistingFile) => "exists",
            None => "ok",
        };
        let new_name = format!("→ {}", rename.new_name);

        if use_color {
            let status_color = if collision.is_some() {
                Color::Red
            } else {
                Color::Green
            };
            table.add_row(vec![
                Cell::new(&rename.old_name),
                Cell::new(new_name).fg(Color::Magenta),
                Cell::new(status).fg(status_color),
            ]);
        } else {
            table.add_row(vec![rename.old_name.as_str(), new_name.as_str(), status]);
        }
    }

    for skipped in &plan.skipped {
        let new_name = format!("→ {}", skipped.new_name);
        if use_color {
            table.add_row(vec![
                Cell::new(&skipped.old_name),
                Cell::new(new_name).fg(Color::DarkGrey),
                Cell::new("skipped").fg(Color::Yellow),
            ]);
        } else {
            table.add_row(vec![skipped.old_name.as_str(), new_name.as_str(), "skipped"]);
        }
    }

    let totals = format!("{} of {} files", plan.renames.len(), plan.files_scanned);
    let conflicts = format!("{} collisions", plan.collisions.len());
    if use_color {
        table.add_row(vec![
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
            Cell::new("─────────").fg(Color::DarkGrey),
        ]);
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(totals).fg(Color::White),
            Cell::new(conflicts).fg(Color::Yellow),
        ]);
    } else {
        table.add_row(vec!["─────────", "─────────", "─────────"]);
        table.add_row(vec!["TOTALS", totals.as_str(), conflicts.as_str()]);
    }

    table.to_string()
}
