//! Projection of the flat key namespace into grid cells and scalars.

use std::collections::BTreeMap;

use recipe_model::{CellCoord, CellProperties, KeyKind, Value};

/// Fold every grid-cell key into a sparse coordinate → properties map.
///
/// Pure and order-independent: duplicate keys were already resolved by the
/// parser's last-write-wins rule.
pub fn collect_cells(values: &BTreeMap<String, Value>) -> BTreeMap<CellCoord, CellProperties> {
    let mut cells: BTreeMap<CellCoord, CellProperties> = BTreeMap::new();
    for (key, value) in values {
        if let KeyKind::Cell { coord, property } = KeyKind::parse(key) {
            cells.entry(coord).or_default().insert(property, value.clone());
        }
    }
    cells
}

/// Every key outside the grid namespace, unchanged.
pub fn collect_scalars(values: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    values
        .iter()
        .filter(|(key, _)| matches!(KeyKind::parse(key), KeyKind::Scalar))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
