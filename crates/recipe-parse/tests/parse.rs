//! Integration tests for recipe file parsing.

use std::fs;
use std::io::Write;

use recipe_model::Value;
use recipe_parse::{load_io_recipe, parse_recipe};
use tempfile::tempdir;

const SAMPLE: &str = "\
// GPS grid recipe, exported 2024-11-02\n\
# legacy marker\n\
\n\
IO.GPS.Cfg.Num_Grid_Rows_Cols:=2\n\
IO.GPS.Cfg.Grid_Cell_Size_dm := 10 // dm per cell\n\
GVL.GPS_Grid_data[0][0].Included:=TRUE\n\
GVL.GPS_Grid_data[0][0].Target_Depth_cm:=282 // set by HMI\n\
this line is not an assignment\n\
GVL.GPS_Grid_data[0][0].Target_Depth_cm:=300\n";

#[test]
fn parses_assignments_and_skips_comments() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("GPS_Grid.txtrecipe");
    fs::write(&path, SAMPLE).expect("write sample");

    let recipe = parse_recipe(&path).expect("parse");
    assert_eq!(recipe.lines.len(), 9);
    assert_eq!(
        recipe.values["IO.GPS.Cfg.Num_Grid_Rows_Cols"],
        Value::Int(2)
    );
    // Whitespace around := and an inline comment are both tolerated.
    assert_eq!(recipe.values["IO.GPS.Cfg.Grid_Cell_Size_dm"], Value::Int(10));
    // Comment and blank lines contribute nothing.
    assert!(!recipe.values.keys().any(|k| k.starts_with("//")));
    // The malformed line is retained verbatim but unmapped.
    assert_eq!(recipe.lines[7], "this line is not an assignment\n");
    assert_eq!(recipe.values.len(), 4);
}

#[test]
fn duplicate_key_resolves_to_last_line() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dup.txtrecipe");
    fs::write(&path, SAMPLE).expect("write sample");

    let recipe = parse_recipe(&path).expect("parse");
    let key = "GVL.GPS_Grid_data[0][0].Target_Depth_cm";
    assert_eq!(recipe.values[key], Value::Int(300));
    assert_eq!(recipe.key_lines[key], 8);
}

#[test]
fn raw_lines_reassemble_the_original_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("GPS_Grid.txtrecipe");
    fs::write(&path, SAMPLE).expect("write sample");

    let recipe = parse_recipe(&path).expect("parse");
    let rebuilt: String = recipe.lines.concat();
    assert_eq!(rebuilt, SAMPLE);
}

#[test]
fn crlf_terminators_are_preserved_in_lines() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("crlf.txtrecipe");
    let mut file = fs::File::create(&path).expect("create");
    file.write_all(b"A.Key:=1\r\nB.Key:=2\r\n").expect("write");
    drop(file);

    let recipe = parse_recipe(&path).expect("parse");
    assert_eq!(recipe.lines[0], "A.Key:=1\r\n");
    assert_eq!(recipe.values["A.Key"], Value::Int(1));
}

#[test]
fn io_loader_filters_to_io_namespaces() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("IO.txtrecipe");
    fs::write(
        &path,
        "IO.GPS.Cfg.stRef_Points.UTM_East[1]:=100.5\n\
         IO.GPS.Sts.Ready:=TRUE\n\
         GVL.Machine.Mode:=3\n",
    )
    .expect("write io file");

    let io = load_io_recipe(&path).expect("load");
    assert_eq!(io.len(), 2);
    assert_eq!(
        io["IO.GPS.Cfg.stRef_Points.UTM_East[1]"],
        Value::Float(100.5)
    );
    assert!(!io.contains_key("GVL.Machine.Mode"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = parse_recipe(&dir.path().join("absent.txtrecipe")).unwrap_err();
    assert!(err.to_string().contains("io error"));
}
