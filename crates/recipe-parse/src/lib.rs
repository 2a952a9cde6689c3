//! Line-indexed parsing of recipe files.
//!
//! The parser is deliberately tolerant: lines that do not look like
//! `key := value` assignments are kept verbatim and simply contribute
//! nothing to the decoded maps, so an untouched file always round-trips
//! byte-for-byte through the exporter.

pub mod parser;
pub mod recipe;

pub use parser::{ParsedRecipe, parse_recipe, parse_recipe_text};
pub use recipe::{IO_PREFIXES, load_io_recipe};
