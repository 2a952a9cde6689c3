//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use recipe_grid::GridView;
use recipe_model::CellCoord;
use recipe_parse::{load_io_recipe, parse_recipe};
use recipe_staging::{CellSelection, StagingStore};

use crate::cli::{ExportArgs, ImportArgs, ResetIncludedArgs, SetTargetArgs, ViewArgs};
use crate::types::GridSummary;

/// Recipe file extensions seen in the field; `.txrtrecipe` is a historical
/// misspelling some exports carry.
const RECIPE_EXTENSIONS: &[&str] = &["txtrecipe", "txrtrecipe"];
const PREFERRED_NAME: &str = "GPS_Grid.txtrecipe";

pub fn run_view(args: &ViewArgs) -> Result<GridSummary> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => auto_pick_file(Path::new("."))?,
    };
    info!(path = %path.display(), "loading recipe");
    let recipe = parse_recipe(&path)?;
    let view = GridView::from_recipe(&recipe, &path)
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(GridSummary::from_view(&view))
}

pub fn run_import(args: &ImportArgs) -> Result<()> {
    let grid = parse_recipe(&args.path)
        .with_context(|| format!("read recipe {}", args.path.display()))?;
    let io_scalars = match &args.io {
        Some(io_path) => Some(
            load_io_recipe(io_path)
                .with_context(|| format!("read io recipe {}", io_path.display()))?,
        ),
        None => None,
    };
    let mut store = open_store(&args.db)?;
    store.init().context("initialize staging schema")?;
    store
        .import(&grid, io_scalars.as_ref())
        .context("import recipe into staging store")?;
    println!(
        "Imported {} into {}",
        args.path.display(),
        args.db.display()
    );
    Ok(())
}

pub fn run_reset_included(args: &ResetIncludedArgs) -> Result<()> {
    let selection = match (&args.coords, &args.rect) {
        (Some(coords), None) => CellSelection::Coords(parse_coords(coords)?),
        (None, Some(rect)) => {
            // clap guarantees exactly four values.
            CellSelection::Rect {
                x0: rect[0],
                x1: rect[1],
                y0: rect[2],
                y1: rect[3],
            }
        }
        (Some(_), Some(_)) => bail!("--coords and --rect are mutually exclusive"),
        (None, None) => bail!("specify --coords or --rect"),
    };
    let mut store = open_store(&args.db)?;
    let updated = store
        .reset_included(&selection)
        .context("reset included flags")?;
    println!("Reset Included on {updated} cell(s)");
    Ok(())
}

pub fn run_set_target(args: &SetTargetArgs) -> Result<()> {
    let coords = parse_coords(&args.coords)?;
    let mut store = open_store(&args.db)?;
    let updated = store
        .set_target(&coords, args.value)
        .context("set target depth")?;
    println!("Set Target_Depth_cm={} on {updated} cell(s)", args.value);
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let store = open_store(&args.db)?;
    store
        .export(&args.out)
        .with_context(|| format!("export to {}", args.out.display()))?;
    println!("Exported {}", args.out.display());
    Ok(())
}

fn open_store(db: &Path) -> Result<StagingStore> {
    StagingStore::open(db).with_context(|| format!("open staging database {}", db.display()))
}

/// Pick a recipe file from `dir`: the preferred name when present,
/// otherwise the first file with a recipe extension (sorted by name).
pub fn auto_pick_file(dir: &Path) -> Result<PathBuf> {
    let preferred = dir.join(PREFERRED_NAME);
    if preferred.exists() {
        return Ok(preferred);
    }
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| RECIPE_EXTENSIONS.contains(&ext))
        })
        .collect();
    candidates.sort();
    candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no .txtrecipe file found in {}", dir.display()))
}

/// Parse a "x,y;x,y;..." coordinate list. Empty chunks are skipped so
/// trailing separators are harmless.
pub fn parse_coords(list: &str) -> Result<Vec<CellCoord>> {
    let mut coords = Vec::new();
    for chunk in list.split(';') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        let (x_text, y_text) = chunk
            .split_once(',')
            .with_context(|| format!("expected \"x,y\" in coordinate list, got {chunk:?}"))?;
        let x = x_text
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid x index {:?}", x_text.trim()))?;
        let y = y_text
            .trim()
            .parse::<u32>()
            .with_context(|| format!("invalid y index {:?}", y_text.trim()))?;
        coords.push(CellCoord::new(x, y));
    }
    if coords.is_empty() {
        bail!("coordinate list is empty");
    }
    Ok(coords)
}
