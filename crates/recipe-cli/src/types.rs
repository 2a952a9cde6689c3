use std::path::PathBuf;

use serde::Serialize;

use recipe_grid::GridView;

/// Flattened view summary handed to the table and JSON printers.
#[derive(Debug, Serialize)]
pub struct GridSummary {
    pub source: PathBuf,
    pub rows_cols: i64,
    pub cell_size_dm: f64,
    pub extent_dm: f64,
    pub cell_count: usize,
    pub included_count: usize,
    pub ref_east: [f64; 4],
    pub ref_north: [f64; 4],
}

impl GridSummary {
    pub fn from_view(view: &GridView) -> Self {
        Self {
            source: view.source_path.clone(),
            rows_cols: view.config.rows_cols,
            cell_size_dm: view.config.cell_size_dm,
            extent_dm: view.config.extent_dm,
            cell_count: view.cells.len(),
            included_count: view.included_count(),
            ref_east: view.config.ref_points.east,
            ref_north: view.config.ref_points.north,
        }
    }
}
