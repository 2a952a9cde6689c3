//! Grid projection and validation.
//!
//! Projects the flat decoded key/value map into a sparse (x, y) → cell
//! properties mapping, and gates rendering/export on the few required
//! fields: grid geometry scalars, the four reference points, and centers
//! for every included cell.

pub mod project;
pub mod validate;
pub mod view;

pub use project::{collect_cells, collect_scalars};
pub use validate::{
    RefPoints, ValidateError, require_int, require_numeric, require_ref_points,
    validate_included_centers,
};
pub use view::{GridConfig, GridView};
