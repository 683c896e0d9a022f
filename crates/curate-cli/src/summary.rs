use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::CurateReport;

/// Print the per-file summary table for a `run` or `check` invocation.
pub fn print_summary(report: &CurateReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Type"),
        header_cell("Rows"),
        header_cell("Removed"),
        header_cell("Status"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);

    for outcome in &report.outcomes {
        let file_type = outcome
            .file_type
            .map_or_else(|| "-".to_string(), |t| t.to_string());
        let result = if outcome.success {
            Cell::new("OK").fg(Color::Green)
        } else {
            Cell::new("FAILED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            Cell::new(outcome.path.display()),
            Cell::new(file_type),
            Cell::new(outcome.rows_in),
            Cell::new(outcome.rows_removed),
            Cell::new(&outcome.status),
            result,
        ]);
    }
    println!("{table}");

    for outcome in &report.outcomes {
        if let Some(backup) = &outcome.backup {
            println!("backup: {}", backup.display());
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
