//! Staging store end-to-end behavior.

use std::fs;

use recipe_model::CellCoord;
use recipe_parse::parse_recipe_text;
use recipe_staging::{CellSelection, StagingStore};
use tempfile::tempdir;

const GRID_FILE: &str = "\
// exported grid\n\
IO.GPS.Cfg.Num_Grid_Rows_Cols:=8\n\
GVL.GPS_Grid_data[0][0].Included:=TRUE\n\
GVL.GPS_Grid_data[0][0].Target_Depth_cm:=10 // cm\n\
GVL.GPS_Grid_data[0][0].Center_Relative_East_dm:=5\n\
GVL.GPS_Grid_data[2][3].Target_Depth_cm:=10 // keep comment\n\
GVL.GPS_Grid_data[5][5].First_Depth_Read_cm:=33.5\n";

fn imported_store() -> StagingStore {
    let mut store = StagingStore::open_in_memory().expect("open");
    store.init().expect("init");
    store
        .import(&parse_recipe_text(GRID_FILE), None)
        .expect("import");
    store
}

#[test]
fn init_is_idempotent() {
    let store = imported_store();
    store.init().expect("re-init against populated store");
    assert_eq!(store.cell_count().expect("count"), 3);
}

#[test]
fn import_coerces_included_to_tri_state() {
    let store = imported_store();
    let with_flag = store
        .cell(CellCoord::new(0, 0))
        .expect("query")
        .expect("row exists");
    assert_eq!(with_flag.included, Some(true));
    assert_eq!(with_flag.target_depth, Some(10.0));
    assert_eq!(with_flag.center_east, Some(5.0));

    let without_flag = store
        .cell(CellCoord::new(5, 5))
        .expect("query")
        .expect("row exists");
    assert_eq!(without_flag.included, None);
    assert_eq!(without_flag.first_depth, Some(33.5));
    assert_eq!(without_flag.error, None);
}

#[test]
fn scenario_b_rect_sweep_preserves_unset_included() {
    let mut store = imported_store();
    // Rectangle covers (0,0) (included=true) and misses nothing it
    // shouldn't: (5,5) has no Included in the source at all.
    let updated = store
        .reset_included(&CellSelection::Rect {
            x0: 0,
            x1: 6,
            y0: 0,
            y1: 6,
        })
        .expect("sweep");
    assert_eq!(updated, 1);

    let swept = store.cell(CellCoord::new(0, 0)).expect("query").expect("row");
    assert_eq!(swept.included, Some(false));
    let untouched = store.cell(CellCoord::new(5, 5)).expect("query").expect("row");
    assert_eq!(untouched.included, None);
}

#[test]
fn reset_included_by_coordinate_list() {
    let mut store = imported_store();
    let updated = store
        .reset_included(&CellSelection::Coords(vec![
            CellCoord::new(0, 0),
            CellCoord::new(5, 5),  // included unset: must stay unset
            CellCoord::new(9, 9),  // no such row
        ]))
        .expect("reset");
    assert_eq!(updated, 1);
    assert_eq!(
        store.cell(CellCoord::new(5, 5)).expect("query").expect("row").included,
        None
    );
}

#[test]
fn scenario_c_set_target_exports_integer_literal() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("edited.txtrecipe");

    let mut store = imported_store();
    let updated = store
        .set_target(&[CellCoord::new(2, 3)], 42.0)
        .expect("set target");
    assert_eq!(updated, 1);
    store.export(&out).expect("export");

    let exported = fs::read_to_string(&out).expect("read export");
    let lines: Vec<&str> = exported.split_inclusive('\n').collect();
    // The targeted line carries the new integer literal and its comment.
    assert_eq!(
        lines[5],
        "GVL.GPS_Grid_data[2][3].Target_Depth_cm:=42 // keep comment\n"
    );
    // Untouched lines are byte-identical, including the other cell's
    // target line (its staged value 10.0 re-renders as 10).
    assert_eq!(lines[0], "// exported grid\n");
    assert_eq!(lines[1], "IO.GPS.Cfg.Num_Grid_Rows_Cols:=8\n");
    assert_eq!(lines[4], "GVL.GPS_Grid_data[0][0].Center_Relative_East_dm:=5\n");
    assert_eq!(lines[6], "GVL.GPS_Grid_data[5][5].First_Depth_Read_cm:=33.5\n");
}

#[test]
fn export_with_no_mutations_round_trips_recognized_lines() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("copy.txtrecipe");

    let store = imported_store();
    store.export(&out).expect("export");

    // Included and Target rows re-render to the literals already present,
    // and every other line was never touched, so the file matches.
    assert_eq!(fs::read_to_string(&out).expect("read"), GRID_FILE);
}

#[test]
fn export_is_repeatable_and_reflects_later_mutations() {
    let dir = tempdir().expect("tempdir");
    let first = dir.path().join("first.txtrecipe");
    let second = dir.path().join("second.txtrecipe");

    let mut store = imported_store();
    store.export(&first).expect("first export");
    store
        .reset_included(&CellSelection::Coords(vec![CellCoord::new(0, 0)]))
        .expect("reset");
    store.export(&second).expect("second export");

    assert!(fs::read_to_string(&first)
        .expect("first")
        .contains("GVL.GPS_Grid_data[0][0].Included:=TRUE\n"));
    assert!(fs::read_to_string(&second)
        .expect("second")
        .contains("GVL.GPS_Grid_data[0][0].Included:=FALSE\n"));
}

#[test]
fn io_merge_supplements_cfg_table() {
    let io_text = "IO.GPS.Cfg.Grid_Cell_Size_dm:=10\nIO.GPS.Vis.Square_Width_Scale_dm:=20\n";
    let io = parse_recipe_text(io_text);
    let io_scalars = io.scalars_with_prefixes(&recipe_parse::IO_PREFIXES);

    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("workspace.sqlite");
    let mut store = StagingStore::open(&db_path).expect("open file-backed store");
    store.init().expect("init");
    store
        .import(&parse_recipe_text(GRID_FILE), Some(&io_scalars))
        .expect("import with merge");

    // Reopen to prove durability.
    drop(store);
    let store = StagingStore::open(&db_path).expect("reopen");
    assert_eq!(store.cell_count().expect("count"), 3);
}
