//! Required-field validation.
//!
//! All checks are fail-fast preconditions for rendering or exporting a
//! grid. A failed check aborts the operation with a descriptive message;
//! the recipe file itself is never mutated by validation.

use std::collections::BTreeMap;

use thiserror::Error;

use recipe_model::{CellCoord, CellProperties, Value, prop};

/// How many offending coordinates a centers failure lists before
/// collapsing the rest into a count.
const MAX_LISTED_CELLS: usize = 20;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("missing or invalid numeric variable for {purpose}; searched: {}", .searched.join(", "))]
    MissingNumeric {
        purpose: String,
        searched: Vec<String>,
    },
    #[error("missing or invalid integer variable for {purpose} ({key})")]
    MissingInteger { purpose: String, key: String },
    #[error("reference points 1..4 incomplete or non-numeric; missing:{}", format_bullets(.missing))]
    MissingRefPoints { missing: Vec<String> },
    #[error("cells with Included=TRUE but missing numeric centers:{}{}", format_cells(.coords), format_remainder(.remainder))]
    MissingCenters {
        coords: Vec<CellCoord>,
        remainder: usize,
    },
    #[error("{0} must be > 0")]
    NonPositive(String),
}

fn format_bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\n  - {item}"))
        .collect::<String>()
}

fn format_cells(coords: &[CellCoord]) -> String {
    coords
        .iter()
        .map(|coord| format!("\n  - Grid_data{coord}"))
        .collect::<String>()
}

fn format_remainder(remainder: &usize) -> String {
    if *remainder == 0 {
        String::new()
    } else {
        format!("\n  (+ {remainder} more)")
    }
}

/// Four (east, north) reference point pairs, indexed 1..=4 in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefPoints {
    pub east: [f64; 4],
    pub north: [f64; 4],
}

/// Resolve a numeric scalar through a list of acceptable key spellings.
///
/// The variant list tolerates historical typos and renames in exported
/// files; the first spelling that resolves to a numeric value wins.
pub fn require_numeric(
    values: &BTreeMap<String, Value>,
    variants: &[&str],
    purpose: &str,
) -> Result<f64, ValidateError> {
    for key in variants {
        if let Some(number) = values.get(*key).and_then(Value::as_f64) {
            return Ok(number);
        }
    }
    Err(ValidateError::MissingNumeric {
        purpose: purpose.to_string(),
        searched: variants.iter().map(|key| (*key).to_string()).collect(),
    })
}

/// Resolve an integer scalar: an `Int`, or a `Float` with zero fraction.
pub fn require_int(
    values: &BTreeMap<String, Value>,
    key: &str,
    purpose: &str,
) -> Result<i64, ValidateError> {
    values
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| ValidateError::MissingInteger {
            purpose: purpose.to_string(),
            key: key.to_string(),
        })
}

/// Resolve the four UTM reference point pairs, failing with every missing
/// pair listed.
pub fn require_ref_points(values: &BTreeMap<String, Value>) -> Result<RefPoints, ValidateError> {
    let mut east = [0.0; 4];
    let mut north = [0.0; 4];
    let mut missing = Vec::new();
    for i in 1..=4usize {
        let east_key = format!("IO.GPS.Cfg.stRef_Points.UTM_East[{i}]");
        let north_key = format!("IO.GPS.Cfg.stRef_Points.UTM_North[{i}]");
        match (
            values.get(&east_key).and_then(Value::as_f64),
            values.get(&north_key).and_then(Value::as_f64),
        ) {
            (Some(e), Some(n)) => {
                east[i - 1] = e;
                north[i - 1] = n;
            }
            _ => missing.push(format!("{east_key} / {north_key}")),
        }
    }
    if missing.is_empty() {
        Ok(RefPoints { east, north })
    } else {
        Err(ValidateError::MissingRefPoints { missing })
    }
}

/// Every cell marked `Included=TRUE` must carry numeric center coordinates.
///
/// Cells whose `Included` is absent or FALSE are not checked; absence of a
/// property is legitimate and means "not renderable", not "invalid".
pub fn validate_included_centers(
    cells: &BTreeMap<CellCoord, CellProperties>,
) -> Result<(), ValidateError> {
    let mut offending: Vec<CellCoord> = cells
        .iter()
        .filter(|(_, props)| {
            props.get(prop::INCLUDED).and_then(Value::as_bool) == Some(true)
                && !(has_numeric(props, prop::CENTER_EAST) && has_numeric(props, prop::CENTER_NORTH))
        })
        .map(|(coord, _)| *coord)
        .collect();
    if offending.is_empty() {
        return Ok(());
    }
    let remainder = offending.len().saturating_sub(MAX_LISTED_CELLS);
    offending.truncate(MAX_LISTED_CELLS);
    Err(ValidateError::MissingCenters {
        coords: offending,
        remainder,
    })
}

fn has_numeric(props: &CellProperties, property: &str) -> bool {
    props.get(property).is_some_and(Value::is_numeric)
}
