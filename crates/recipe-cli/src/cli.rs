//! CLI argument definitions for the grid recipe tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gridrecipe",
    version,
    about = "Grid recipe editor - view and batch-edit PLC grid recipe files",
    long_about = "View and edit PLC-style grid recipe files (.txtrecipe).\n\n\
                  Edits are byte-faithful: only the value segment of touched\n\
                  lines changes, comments and untouched lines stay identical.\n\
                  Batch edits stage into a SQLite workspace and re-export."
)]
pub struct Cli {
    /// Subcommand to run; without one the viewer summary runs.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a recipe file, validate it, and print the grid summary.
    View(ViewArgs),

    /// Import a recipe file into the SQLite staging workspace.
    Import(ImportArgs),

    /// Set Included=FALSE on cells that already carry the flag.
    ResetIncluded(ResetIncludedArgs),

    /// Set Target_Depth_cm for a list of cell coordinates.
    SetTarget(SetTargetArgs),

    /// Export a recipe file faithful to the original with staged edits.
    Export(ExportArgs),
}

#[derive(Parser, Default)]
pub struct ViewArgs {
    /// Recipe file (.txtrecipe / .txrtrecipe); auto-picked from the
    /// current directory when omitted.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Print the summary as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Recipe file to import.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Staging database path.
    #[arg(long = "db", value_name = "DB", default_value = "workspace.sqlite")]
    pub db: PathBuf,

    /// Optional I/O recipe whose IO.GPS.* namespace merges into the
    /// configuration table.
    #[arg(long = "io", value_name = "PATH")]
    pub io: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ResetIncludedArgs {
    /// Staging database path.
    #[arg(long = "db", value_name = "DB", default_value = "workspace.sqlite")]
    pub db: PathBuf,

    /// Coordinate list "x,y;x,y;...".
    #[arg(long = "coords", value_name = "LIST")]
    pub coords: Option<String>,

    /// Inclusive index rectangle.
    #[arg(long = "rect", num_args = 4, value_names = ["X0", "X1", "Y0", "Y1"])]
    pub rect: Option<Vec<u32>>,
}

#[derive(Parser)]
pub struct SetTargetArgs {
    /// Staging database path.
    #[arg(long = "db", value_name = "DB", default_value = "workspace.sqlite")]
    pub db: PathBuf,

    /// Coordinate list "x,y;x,y;...".
    #[arg(long = "coords", value_name = "LIST", required = true)]
    pub coords: String,

    /// Target depth in cm.
    #[arg(long = "value", required = true)]
    pub value: f64,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Staging database path.
    #[arg(long = "db", value_name = "DB", default_value = "workspace.sqlite")]
    pub db: PathBuf,

    /// Output recipe path.
    #[arg(long = "out", value_name = "PATH", default_value = "edited.txtrecipe")]
    pub out: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
