//! Interactive single-key edits.
//!
//! The viewer/editor boundary calls back with `(key, new number)` requests.
//! Each accepted edit goes through the same line patcher as batch export
//! and immediately re-emits the full line sequence to a sibling
//! `<stem>_edited<ext>` file, so the on-disk copy always reflects the last
//! edit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use recipe_model::Value;

use crate::patch::patch_line;
use crate::write::{Result, write_lines_atomic};

/// Sibling output path for interactive edits: same directory, `_edited`
/// appended to the file stem.
pub fn edited_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match path.extension() {
        Some(ext) => path.with_file_name(format!("{stem}_edited.{}", ext.to_string_lossy())),
        None => path.with_file_name(format!("{stem}_edited")),
    }
}

/// One live edit session over a loaded recipe.
pub struct EditSession {
    lines: Vec<String>,
    values: BTreeMap<String, Value>,
    key_lines: BTreeMap<String, usize>,
    source_path: PathBuf,
}

impl EditSession {
    pub fn new(
        lines: Vec<String>,
        values: BTreeMap<String, Value>,
        key_lines: BTreeMap<String, usize>,
        source_path: PathBuf,
    ) -> Self {
        Self {
            lines,
            values,
            key_lines,
            source_path,
        }
    }

    /// Set a numeric value for one key and persist the edited copy.
    ///
    /// Returns `Ok(None)` when the key has no line in the source file, or
    /// when its index entry does not resolve to a line: such a field is
    /// not editable and nothing is written. Otherwise the line is patched
    /// (integer-style formatting, so `42.0` lands as `42`), the in-memory
    /// value follows, and the full sequence is written atomically to the
    /// `_edited` sibling.
    pub fn set_value(&mut self, key: &str, number: f64) -> Result<Option<PathBuf>> {
        let Some(&idx) = self.key_lines.get(key) else {
            return Ok(None);
        };
        let literal = Value::Float(number).encode(true);
        let Some(line) = self.lines.get_mut(idx) else {
            return Ok(None);
        };
        *line = patch_line(line, &literal);
        self.values.insert(key.to_string(), Value::decode(&literal));
        let out_path = edited_sibling(&self.source_path);
        write_lines_atomic(&out_path, &self.lines)?;
        info!(key, value = %literal, path = %out_path.display(), "applied edit");
        Ok(Some(out_path))
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
