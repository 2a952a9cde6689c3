//! Durable staging store for batch recipe edits.
//!
//! The store mirrors one parsed recipe into SQLite: per-cell rows, the
//! configuration scalars, and the verbatim line image plus key→line index
//! needed to export a byte-faithful file later. Bulk mutations
//! (reset-included, set-target) run decoupled from any live file handle
//! and replay through the line patcher on export.

pub mod error;
pub mod store;

pub use error::{StagingError, Result};
pub use store::{CellSelection, StagedCell, StagingStore};
