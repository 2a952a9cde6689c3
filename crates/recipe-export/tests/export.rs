//! Patch locality and edit session behavior on real files.

use std::fs;

use recipe_export::{EditSession, apply_edits, patch_line, write_lines_atomic};
use recipe_model::Value;
use tempfile::tempdir;

const SOURCE: &str = "\
// header comment\n\
IO.GPS.Cfg.Num_Grid_Rows_Cols:=2\n\
GVL.GPS_Grid_data[2][3].Target_Depth_cm:=10 // cm, operator set\n\
GVL.GPS_Grid_data[2][3].Included:=TRUE\n";

fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

#[test]
fn patching_one_line_leaves_every_other_byte_alone() {
    let mut lines = split_lines(SOURCE);
    let key_lines = std::collections::BTreeMap::from([(
        "GVL.GPS_Grid_data[2][3].Target_Depth_cm".to_string(),
        2usize,
    )]);
    apply_edits(
        &mut lines,
        &key_lines,
        &[(
            "GVL.GPS_Grid_data[2][3].Target_Depth_cm".to_string(),
            Value::Float(42.0).encode(true),
        )],
    );

    assert_eq!(
        lines[2],
        "GVL.GPS_Grid_data[2][3].Target_Depth_cm:=42 // cm, operator set\n"
    );
    let original = split_lines(SOURCE);
    for idx in [0usize, 1, 3] {
        assert_eq!(lines[idx], original[idx]);
    }
}

#[test]
fn zero_edits_round_trip_byte_for_byte() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("copy.txtrecipe");
    let lines = split_lines(SOURCE);
    write_lines_atomic(&out, &lines).expect("write");
    assert_eq!(fs::read_to_string(&out).expect("read back"), SOURCE);
    // No stray temp file left behind.
    assert_eq!(fs::read_dir(dir.path()).expect("list").count(), 1);
}

#[test]
fn atomic_write_replaces_existing_content() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("out.txtrecipe");
    fs::write(&out, "stale content\n").expect("seed");
    write_lines_atomic(&out, &split_lines(SOURCE)).expect("write");
    assert_eq!(fs::read_to_string(&out).expect("read back"), SOURCE);
}

#[test]
fn edit_session_writes_sibling_file_via_patcher() {
    let dir = tempdir().expect("tempdir");
    let source_path = dir.path().join("GPS_Grid.txtrecipe");
    fs::write(&source_path, SOURCE).expect("seed source");

    let key = "GVL.GPS_Grid_data[2][3].Target_Depth_cm";
    let lines = split_lines(SOURCE);
    let values = std::collections::BTreeMap::from([(key.to_string(), Value::Int(10))]);
    let key_lines = std::collections::BTreeMap::from([(key.to_string(), 2usize)]);

    let mut session = EditSession::new(lines, values, key_lines, source_path.clone());
    let out_path = session
        .set_value(key, 42.0)
        .expect("edit persists")
        .expect("key is editable");

    assert_eq!(out_path, dir.path().join("GPS_Grid_edited.txtrecipe"));
    let written = fs::read_to_string(&out_path).expect("read edited copy");
    assert!(written.contains("Target_Depth_cm:=42 // cm, operator set\n"));
    // Source file untouched.
    assert_eq!(fs::read_to_string(&source_path).expect("source"), SOURCE);
    // In-memory value follows the edit, re-decoded as an integer.
    assert_eq!(session.value(key), Some(&Value::Int(42)));
}

#[test]
fn edit_session_reports_uneditable_keys() {
    let mut session = EditSession::new(
        split_lines(SOURCE),
        std::collections::BTreeMap::new(),
        std::collections::BTreeMap::new(),
        std::path::PathBuf::from("GPS_Grid.txtrecipe"),
    );
    let outcome = session
        .set_value("GVL.GPS_Grid_data[9][9].Target_Depth_cm", 5.0)
        .expect("no io attempted");
    assert_eq!(outcome, None);
    assert_eq!(session.lines().concat(), SOURCE);
}

#[test]
fn edit_session_ignores_index_entries_past_the_line_image() {
    let key = "GVL.GPS_Grid_data[2][3].Target_Depth_cm";
    // Index claims a line the image does not have.
    let key_lines = std::collections::BTreeMap::from([(key.to_string(), 99usize)]);
    let mut session = EditSession::new(
        split_lines(SOURCE),
        std::collections::BTreeMap::new(),
        key_lines,
        std::path::PathBuf::from("GPS_Grid.txtrecipe"),
    );
    let outcome = session.set_value(key, 5.0).expect("no io attempted");
    assert_eq!(outcome, None);
    assert_eq!(session.lines().concat(), SOURCE);
}

#[test]
fn patch_normalizes_terminator_only_without_comment() {
    assert_eq!(patch_line("A.B:=1\r\n", "2"), "A.B:=2\n");
    assert_eq!(patch_line("A.B:=1 // note\r\n", "2"), "A.B:=2 // note\r\n");
}
