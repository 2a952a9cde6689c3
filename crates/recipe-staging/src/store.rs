//! The SQLite staging store.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use recipe_export::{patch_line, write_lines_atomic};
use recipe_grid::collect_cells;
use recipe_model::{CellCoord, Value, cell_key, prop};
use recipe_parse::{IO_PREFIXES, ParsedRecipe};

use crate::error::Result;

/// Which cells a bulk operation targets.
#[derive(Debug, Clone)]
pub enum CellSelection {
    /// An explicit coordinate list.
    Coords(Vec<CellCoord>),
    /// An inclusive index rectangle: x in [x0, x1], y in [y0, y1].
    Rect { x0: u32, x1: u32, y0: u32, y1: u32 },
}

/// One staged grid cell row. `included` and `error` are tri-state: a
/// `None` means the property was never assigned in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedCell {
    pub coord: CellCoord,
    pub included: Option<bool>,
    pub first_depth: Option<f64>,
    pub last_depth: Option<f64>,
    pub target_depth: Option<f64>,
    pub center_east: Option<f64>,
    pub center_north: Option<f64>,
    pub edges_crossed: Option<i64>,
    pub error: Option<bool>,
}

/// A staging store bound to one SQLite database.
///
/// Lifecycle: open → `init` → `import` → any number of bulk mutations →
/// `export`, repeatable; export recomputes from current staged state and
/// never consumes the store. There is no truncation path.
pub struct StagingStore {
    conn: Connection,
}

impl StagingStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the schema. Idempotent: safe to call against an existing
    /// store.
    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS grid_cells(
               x INTEGER NOT NULL,
               y INTEGER NOT NULL,
               included INTEGER,
               first_depth_cm REAL,
               last_depth_cm REAL,
               target_depth_cm REAL,
               center_east_dm REAL,
               center_north_dm REAL,
               edges_crossed INTEGER,
               error INTEGER,
               PRIMARY KEY(x, y)
             );
             CREATE TABLE IF NOT EXISTS cfg(
               key TEXT PRIMARY KEY,
               value TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS lines(
               idx INTEGER PRIMARY KEY,
               content TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS keys_map(
               key TEXT PRIMARY KEY,
               line_idx INTEGER NOT NULL
             );",
        )?;
        debug!("staging schema ready");
        Ok(())
    }

    /// Mirror a parsed grid recipe into the store, optionally merging the
    /// configuration namespace from a separate I/O recipe.
    ///
    /// One transaction: a failure partway leaves the store unchanged.
    pub fn import(
        &mut self,
        grid: &ParsedRecipe,
        io_scalars: Option<&BTreeMap<String, Value>>,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut cfg_stmt =
                tx.prepare("INSERT OR REPLACE INTO cfg(key, value) VALUES (?1, ?2)")?;
            for (key, value) in grid.scalars_with_prefixes(&IO_PREFIXES) {
                cfg_stmt.execute(params![key, value.encode(false)])?;
            }
            if let Some(io) = io_scalars {
                for (key, value) in io {
                    cfg_stmt.execute(params![key, value.encode(false)])?;
                }
            }

            let mut line_stmt =
                tx.prepare("INSERT OR REPLACE INTO lines(idx, content) VALUES (?1, ?2)")?;
            for (idx, content) in grid.lines.iter().enumerate() {
                line_stmt.execute(params![idx as i64, content])?;
            }

            let mut key_stmt =
                tx.prepare("INSERT OR REPLACE INTO keys_map(key, line_idx) VALUES (?1, ?2)")?;
            for (key, line_idx) in &grid.key_lines {
                key_stmt.execute(params![key, *line_idx as i64])?;
            }

            let cells = collect_cells(&grid.values);
            let mut cell_stmt = tx.prepare(
                "INSERT OR REPLACE INTO grid_cells(
                   x, y, included, first_depth_cm, last_depth_cm, target_depth_cm,
                   center_east_dm, center_north_dm, edges_crossed, error
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (coord, props) in &cells {
                cell_stmt.execute(params![
                    coord.x as i64,
                    coord.y as i64,
                    tri_state(props.get(prop::INCLUDED)),
                    numeric(props.get(prop::FIRST_DEPTH)),
                    numeric(props.get(prop::LAST_DEPTH)),
                    numeric(props.get(prop::TARGET_DEPTH)),
                    numeric(props.get(prop::CENTER_EAST)),
                    numeric(props.get(prop::CENTER_NORTH)),
                    props.get(prop::EDGES_CROSSED).and_then(Value::as_i64),
                    tri_state(props.get(prop::ERROR)),
                ])?;
            }
            info!(
                cells = cells.len(),
                lines = grid.lines.len(),
                "imported recipe into staging store"
            );
        }
        tx.commit()?;
        Ok(())
    }

    /// Clear the `Included` flag for the selected cells.
    ///
    /// Only rows whose `included` is already known (TRUE or FALSE) are
    /// touched; the operation never fabricates the field for a cell that
    /// never had one. Returns the number of updated rows.
    pub fn reset_included(&mut self, selection: &CellSelection) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let updated = match selection {
            CellSelection::Coords(coords) => {
                let mut stmt = tx.prepare(
                    "UPDATE grid_cells SET included = 0
                     WHERE x = ?1 AND y = ?2 AND included IS NOT NULL",
                )?;
                let mut updated = 0usize;
                for coord in coords {
                    updated += stmt.execute(params![coord.x as i64, coord.y as i64])?;
                }
                updated
            }
            CellSelection::Rect { x0, x1, y0, y1 } => tx.execute(
                "UPDATE grid_cells SET included = 0
                 WHERE x BETWEEN ?1 AND ?2 AND y BETWEEN ?3 AND ?4
                   AND included IS NOT NULL",
                params![*x0 as i64, *x1 as i64, *y0 as i64, *y1 as i64],
            )?,
        };
        tx.commit()?;
        info!(updated, "reset included flags");
        Ok(updated)
    }

    /// Assign one numeric target depth to every listed cell.
    ///
    /// Unlike `reset_included` this does not require a prior value; any
    /// existing row gets the field. Returns the number of updated rows.
    pub fn set_target(&mut self, coords: &[CellCoord], value: f64) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut updated = 0usize;
        {
            let mut stmt =
                tx.prepare("UPDATE grid_cells SET target_depth_cm = ?1 WHERE x = ?2 AND y = ?3")?;
            for coord in coords {
                updated += stmt.execute(params![value, coord.x as i64, coord.y as i64])?;
            }
        }
        tx.commit()?;
        info!(updated, value, "set target depth");
        Ok(updated)
    }

    /// Replay staged edits over the stored line image and write the result.
    ///
    /// Every row with a known `included` patches its `Included` line; every
    /// row with a target depth patches its `Target_Depth_cm` line with
    /// integer-style formatting. Keys absent from the stored index are
    /// skipped: the field never existed in the source file. All other
    /// lines are emitted byte-identical.
    pub fn export(&self, out_path: &Path) -> Result<()> {
        let mut lines = self.stored_lines()?;

        let mut included_stmt = self.conn.prepare(
            "SELECT x, y, included FROM grid_cells
             WHERE included IS NOT NULL ORDER BY x, y",
        )?;
        let included_rows = included_stmt.query_map([], |row| {
            Ok((
                CellCoord::new(row.get::<_, i64>(0)? as u32, row.get::<_, i64>(1)? as u32),
                row.get::<_, i64>(2)? != 0,
            ))
        })?;
        for row in included_rows {
            let (coord, included) = row?;
            let literal = Value::Bool(included).encode(false);
            self.patch_key(&mut lines, &cell_key(coord, prop::INCLUDED), &literal)?;
        }

        let mut target_stmt = self.conn.prepare(
            "SELECT x, y, target_depth_cm FROM grid_cells
             WHERE target_depth_cm IS NOT NULL ORDER BY x, y",
        )?;
        let target_rows = target_stmt.query_map([], |row| {
            Ok((
                CellCoord::new(row.get::<_, i64>(0)? as u32, row.get::<_, i64>(1)? as u32),
                row.get::<_, f64>(2)?,
            ))
        })?;
        for row in target_rows {
            let (coord, target) = row?;
            let literal = Value::Float(target).encode(true);
            self.patch_key(&mut lines, &cell_key(coord, prop::TARGET_DEPTH), &literal)?;
        }

        write_lines_atomic(out_path, &lines)?;
        info!(path = %out_path.display(), "exported recipe from staging store");
        Ok(())
    }

    /// Read back one staged cell row, mainly for summaries and tests.
    pub fn cell(&self, coord: CellCoord) -> Result<Option<StagedCell>> {
        let row = self
            .conn
            .query_row(
                "SELECT included, first_depth_cm, last_depth_cm, target_depth_cm,
                        center_east_dm, center_north_dm, edges_crossed, error
                 FROM grid_cells WHERE x = ?1 AND y = ?2",
                params![coord.x as i64, coord.y as i64],
                |row| {
                    Ok(StagedCell {
                        coord,
                        included: row.get::<_, Option<i64>>(0)?.map(|v| v != 0),
                        first_depth: row.get(1)?,
                        last_depth: row.get(2)?,
                        target_depth: row.get(3)?,
                        center_east: row.get(4)?,
                        center_north: row.get(5)?,
                        edges_crossed: row.get(6)?,
                        error: row.get::<_, Option<i64>>(7)?.map(|v| v != 0),
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn cell_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM grid_cells", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn stored_lines(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT content FROM lines ORDER BY idx")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut lines = Vec::new();
        for row in rows {
            lines.push(row?);
        }
        Ok(lines)
    }

    fn patch_key(&self, lines: &mut [String], key: &str, literal: &str) -> Result<()> {
        let line_idx: Option<i64> = self
            .conn
            .query_row(
                "SELECT line_idx FROM keys_map WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(idx) = line_idx
            && let Some(line) = lines.get_mut(idx as usize)
        {
            *line = patch_line(line, literal);
        }
        Ok(())
    }
}

fn tri_state(value: Option<&Value>) -> Option<i64> {
    value
        .and_then(Value::as_bool)
        .map(|flag| if flag { 1 } else { 0 })
}

fn numeric(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}
