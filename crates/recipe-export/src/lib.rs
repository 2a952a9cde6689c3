//! Byte-faithful export of edited recipes.
//!
//! The exporter never regenerates a file from the decoded model. It
//! rewrites the value segment of exactly the lines being edited and emits
//! every other line untouched, so the output stays diffable against the
//! source.

pub mod edit;
pub mod patch;
pub mod write;

pub use edit::{EditSession, edited_sibling};
pub use patch::{apply_edits, patch_line};
pub use write::{ExportError, write_lines_atomic};
