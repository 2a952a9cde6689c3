//! Grid cell addressing.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Zero-based (column, row) address of one grid cell.
///
/// Indices are independent and only by convention within the configured
/// grid size; nothing here enforces an upper bound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub x: u32,
    pub y: u32,
}

impl CellCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.x, self.y)
    }
}

/// Properties present in the source file for one cell.
///
/// Absence of a property is semantically distinct from a false/zero value:
/// a property missing here was never assigned in the file and must stay
/// missing through imports and exports.
pub type CellProperties = BTreeMap<String, Value>;
