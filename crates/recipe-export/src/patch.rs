//! Single-line value patching.

use std::collections::BTreeMap;

/// Replace the value segment of one assignment line.
///
/// The key, the `:=` delimiter, and any whitespace after it are kept
/// byte-identical. A trailing `//` comment is preserved with one space
/// before it, along with the original terminator; without a comment the
/// remainder becomes the literal plus a single `\n` (this path normalizes
/// the terminator). Lines without `:=` pass through unchanged; such lines
/// are unreachable through the key→line index.
pub fn patch_line(original: &str, literal: &str) -> String {
    let Some(assign_pos) = original.find(":=") else {
        return original.to_string();
    };
    let after = &original[assign_pos + 2..];
    let value_offset = after.len() - after.trim_start_matches([' ', '\t']).len();
    let head_end = assign_pos + 2 + value_offset;
    let head = &original[..head_end];
    let tail = &original[head_end..];
    match tail.find("//") {
        Some(pos) => {
            let comment = &tail[pos..];
            let terminator = if tail.ends_with('\n') { "" } else { "\n" };
            format!("{head}{literal} {comment}{terminator}")
        }
        None => format!("{head}{literal}\n"),
    }
}

/// Apply (key, literal) edits to the line image through the key index.
///
/// Keys without an index entry are skipped silently: the field was never
/// present in the source, so there is nothing to patch.
pub fn apply_edits(
    lines: &mut [String],
    key_lines: &BTreeMap<String, usize>,
    edits: &[(String, String)],
) {
    for (key, literal) in edits {
        let Some(&idx) = key_lines.get(key) else {
            continue;
        };
        if let Some(line) = lines.get_mut(idx) {
            *line = patch_line(line, literal);
        }
    }
}
