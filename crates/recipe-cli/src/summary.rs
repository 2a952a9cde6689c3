use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::types::GridSummary;

pub fn print_summary(summary: &GridSummary) {
    println!("Recipe: {}", summary.source.display());

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Grid rows/cols"),
        Cell::new(summary.rows_cols),
    ]);
    table.add_row(vec![
        Cell::new("Cell pitch (dm)"),
        Cell::new(summary.cell_size_dm),
    ]);
    table.add_row(vec![
        Cell::new("Display extent (dm)"),
        Cell::new(summary.extent_dm),
    ]);
    table.add_row(vec![Cell::new("Cells in file"), Cell::new(summary.cell_count)]);
    table.add_row(vec![
        Cell::new("Included cells"),
        Cell::new(summary.included_count),
    ]);
    println!("{table}");

    let mut points = Table::new();
    apply_table_style(&mut points);
    points.set_header(vec![
        header_cell("Point"),
        header_cell("East (dm)"),
        header_cell("North (dm)"),
    ]);
    align_column(&mut points, 1, CellAlignment::Right);
    align_column(&mut points, 2, CellAlignment::Right);
    for i in 0..4 {
        points.add_row(vec![
            Cell::new(i + 1),
            Cell::new(summary.ref_east[i]),
            Cell::new(summary.ref_north[i]),
        ]);
    }
    println!("{points}");
}

fn apply_table_style(table: &mut Table) {
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
