//! The I/O-namespace loader for the two-file merge scenario.
//!
//! Deployments keep the grid itself (`GPS_Grid.txtrecipe`) and the I/O
//! configuration (`IO.txtrecipe`) in separate files; an import can merge
//! the configuration namespace from the second file over the first.

use std::collections::BTreeMap;
use std::path::Path;

use recipe_model::{Result, Value};

use crate::parser::parse_recipe;

/// Configuration/status namespaces carried into the staging `cfg` table.
pub const IO_PREFIXES: [&str; 3] = ["IO.GPS.Cfg.", "IO.GPS.Vis.", "IO.GPS.Sts."];

/// Load only the `IO.GPS.(Cfg|Vis|Sts).*` scalars from an I/O recipe file.
pub fn load_io_recipe(path: &Path) -> Result<BTreeMap<String, Value>> {
    let recipe = parse_recipe(path)?;
    Ok(recipe.scalars_with_prefixes(&IO_PREFIXES))
}
