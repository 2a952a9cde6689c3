//! The validated bundle a presentation layer consumes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use recipe_model::{CellCoord, CellProperties, Value, prop};
use recipe_parse::ParsedRecipe;

use crate::project::{collect_cells, collect_scalars};
use crate::validate::{
    RefPoints, ValidateError, require_int, require_numeric, require_ref_points,
    validate_included_centers,
};

/// Display extent scalar, in decimeters.
const EXTENT_KEYS: &[&str] = &["IO.GPS.Vis.Square_Width_Scale_dm"];
const ROWS_COLS_KEY: &str = "IO.GPS.Cfg.Num_Grid_Rows_Cols";
/// The first spelling is a legacy typo (embedded space) seen in old
/// exports, kept for tolerance even though current files cannot produce it.
const CELL_SIZE_KEYS: &[&str] = &[
    "IO.GPS. Cfg.Grid_Cell_Size_dm",
    "IO.GPS.Cfg.Grid_Cell_Size_dm",
];

/// Grid geometry resolved from the scalar configuration keys.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Side of the displayed square, dm.
    pub extent_dm: f64,
    /// Row and column count (the grid is square).
    pub rows_cols: i64,
    /// Cell pitch, dm.
    pub cell_size_dm: f64,
    pub ref_points: RefPoints,
}

impl GridConfig {
    /// Resolve the required scalars, failing fast on the first gap.
    pub fn resolve(values: &BTreeMap<String, Value>) -> Result<Self, ValidateError> {
        let extent_dm = require_numeric(values, EXTENT_KEYS, "display square width (dm)")?;
        let rows_cols = require_int(values, ROWS_COLS_KEY, "grid row/column count")?;
        let cell_size_dm = require_numeric(values, CELL_SIZE_KEYS, "grid cell pitch (dm)")?;
        if rows_cols <= 0 {
            return Err(ValidateError::NonPositive(ROWS_COLS_KEY.to_string()));
        }
        if cell_size_dm <= 0.0 {
            return Err(ValidateError::NonPositive(
                "IO.GPS.Cfg.Grid_Cell_Size_dm".to_string(),
            ));
        }
        let ref_points = require_ref_points(values)?;
        Ok(Self {
            extent_dm,
            rows_cols,
            cell_size_dm,
            ref_points,
        })
    }
}

/// Everything the viewer/editor boundary needs from one loaded recipe:
/// resolved configuration, projected cells, the verbatim lines, and the
/// key→line index for edit callbacks.
#[derive(Debug, Clone)]
pub struct GridView {
    pub config: GridConfig,
    pub scalars: BTreeMap<String, Value>,
    pub cells: BTreeMap<CellCoord, CellProperties>,
    pub lines: Vec<String>,
    pub key_lines: BTreeMap<String, usize>,
    pub source_path: PathBuf,
}

impl GridView {
    /// Project and validate a parsed recipe. Fails without side effects on
    /// any missing precondition.
    pub fn from_recipe(recipe: &ParsedRecipe, source_path: &Path) -> Result<Self, ValidateError> {
        let config = GridConfig::resolve(&recipe.values)?;
        let cells = collect_cells(&recipe.values);
        validate_included_centers(&cells)?;
        debug!(
            cells = cells.len(),
            rows_cols = config.rows_cols,
            "grid view validated"
        );
        Ok(Self {
            config,
            scalars: collect_scalars(&recipe.values),
            cells,
            lines: recipe.lines.clone(),
            key_lines: recipe.key_lines.clone(),
            source_path: source_path.to_path_buf(),
        })
    }

    /// Cells whose `Included` property is TRUE.
    pub fn included_count(&self) -> usize {
        self.cells
            .values()
            .filter(|props| props.get(prop::INCLUDED).and_then(Value::as_bool) == Some(true))
            .count()
    }

    pub fn properties_at(&self, coord: CellCoord) -> Option<&CellProperties> {
        self.cells.get(&coord)
    }
}
