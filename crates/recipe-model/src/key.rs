//! Typed view over the flat dotted-bracket key namespace.
//!
//! Recipe keys are flat strings; the only structured family is the grid
//! cell pattern `GVL.GPS_Grid_data[x][y].Property`. Classifying keys once
//! up front beats re-matching the pattern at every consumption site.

use std::sync::LazyLock;

use regex::Regex;

use crate::cell::CellCoord;

/// Namespace token under which grid cells live.
pub const GRID_ROOT: &str = "GVL.GPS_Grid_data";

static CELL_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^GVL\.GPS_Grid_data\[(\d+)\]\[(\d+)\]\.([A-Za-z_]\w*)$")
        .expect("invalid cell key regex")
});

/// Cell property names observed in the format.
///
/// The grammar is an open set of identifiers; these constants cover the
/// properties the tooling reads or writes by name.
pub mod prop {
    pub const INCLUDED: &str = "Included";
    pub const FIRST_DEPTH: &str = "First_Depth_Read_cm";
    pub const LAST_DEPTH: &str = "Last_Depth_Read_cm";
    pub const TARGET_DEPTH: &str = "Target_Depth_cm";
    pub const CENTER_EAST: &str = "Center_Relative_East_dm";
    pub const CENTER_NORTH: &str = "Center_Relative_North_dm";
    pub const EDGES_CROSSED: &str = "Edges_Crossed";
    pub const ERROR: &str = "Error";
    /// Present in exported files; a display-layer toggle, never staged.
    pub const PATH_INDEX: &str = "Path_Index";
}

/// Classification of one recipe key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyKind {
    /// Any key outside the grid namespace (configuration, status, ...).
    Scalar,
    /// A per-cell property key under [`GRID_ROOT`].
    Cell { coord: CellCoord, property: String },
}

impl KeyKind {
    /// Classify a key. Keys that merely resemble the grid pattern (wrong
    /// root, missing index, trailing text) classify as `Scalar`.
    pub fn parse(key: &str) -> KeyKind {
        let Some(caps) = CELL_KEY_REGEX.captures(key) else {
            return KeyKind::Scalar;
        };
        // Indices over u32 are not real cell addresses; treat as scalar.
        let (Ok(x), Ok(y)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) else {
            return KeyKind::Scalar;
        };
        KeyKind::Cell {
            coord: CellCoord::new(x, y),
            property: caps[3].to_string(),
        }
    }
}

/// Canonical key for one cell property, the exact spelling the parser
/// records in the key→line index.
pub fn cell_key(coord: CellCoord, property: &str) -> String {
    format!("{GRID_ROOT}[{}][{}].{property}", coord.x, coord.y)
}
