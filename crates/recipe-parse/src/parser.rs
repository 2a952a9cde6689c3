//! The line-indexed recipe parser.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use recipe_model::{Result, Value};

/// Assignment grammar, applied to the trimmed line. The key charset is
/// exactly letters, digits, underscore, dot, and square brackets.
static ASSIGN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_.\[\]]+)\s*:=\s*(.+?)\s*$").expect("invalid assignment regex")
});

/// One fully parsed recipe file.
///
/// `lines` holds every physical line verbatim, terminators included.
/// `values` and `key_lines` cover only the lines that matched the
/// assignment grammar; for duplicated keys the last assignment wins in
/// both maps, with no diagnostic.
#[derive(Debug, Clone)]
pub struct ParsedRecipe {
    pub lines: Vec<String>,
    pub values: BTreeMap<String, Value>,
    pub key_lines: BTreeMap<String, usize>,
}

impl ParsedRecipe {
    /// Subset of decoded values whose keys start with any given prefix.
    pub fn scalars_with_prefixes(&self, prefixes: &[&str]) -> BTreeMap<String, Value> {
        self.values
            .iter()
            .filter(|(key, _)| prefixes.iter().any(|prefix| key.starts_with(prefix)))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Parse a recipe file from disk.
///
/// Invalid UTF-8 byte sequences are dropped rather than raising; the only
/// failure mode is an unreadable file. Schema-level problems are deferred
/// to the validator.
pub fn parse_recipe(path: &Path) -> Result<ParsedRecipe> {
    let bytes = fs::read(path)?;
    let text = decode_ignoring_invalid(&bytes);
    let recipe = parse_recipe_text(&text);
    debug!(
        path = %path.display(),
        lines = recipe.lines.len(),
        keys = recipe.values.len(),
        "parsed recipe"
    );
    Ok(recipe)
}

/// Parse recipe text already held in memory.
pub fn parse_recipe_text(text: &str) -> ParsedRecipe {
    let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    let mut values = BTreeMap::new();
    let mut key_lines = BTreeMap::new();
    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
            continue;
        }
        let Some(caps) = ASSIGN_REGEX.captures(line) else {
            // Malformed lines stay in `lines` untouched and unmapped.
            continue;
        };
        let key = caps[1].to_string();
        values.insert(key.clone(), Value::decode(&caps[2]));
        key_lines.insert(key, idx);
    }
    ParsedRecipe {
        lines,
        values,
        key_lines,
    }
}

/// Decode bytes to text, dropping invalid UTF-8 sequences.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{decode_ignoring_invalid, parse_recipe_text};
    use recipe_model::Value;

    #[test]
    fn invalid_bytes_are_dropped_not_replaced() {
        let decoded = decode_ignoring_invalid(b"A:=1\xFF\xFE\nB:=2\n");
        assert_eq!(decoded, "A:=1\nB:=2\n");
    }

    #[test]
    fn last_assignment_wins_in_both_maps() {
        let recipe = parse_recipe_text("K:=1\nK:=2\n");
        assert_eq!(recipe.values["K"], Value::Int(2));
        assert_eq!(recipe.key_lines["K"], 1);
        assert_eq!(recipe.lines.len(), 2);
    }

    #[test]
    fn final_line_without_terminator_is_kept() {
        let recipe = parse_recipe_text("A:=1\nB:=2");
        assert_eq!(recipe.lines, vec!["A:=1\n".to_string(), "B:=2".to_string()]);
        assert_eq!(recipe.key_lines["B"], 1);
    }
}
