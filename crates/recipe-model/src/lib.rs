//! Shared types for the grid recipe format.
//!
//! The recipe format is a flat list of `key := value` assignment lines.
//! This crate holds the pieces every other crate needs: the literal codec
//! ([`Value`]), the typed key grammar ([`KeyKind`]), and grid cell
//! addressing ([`CellCoord`], [`CellProperties`]).

pub mod cell;
pub mod error;
pub mod key;
pub mod value;

pub use cell::{CellCoord, CellProperties};
pub use error::{RecipeError, Result};
pub use key::{GRID_ROOT, KeyKind, cell_key, prop};
pub use value::Value;
