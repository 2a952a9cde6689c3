//! Grid recipe editor CLI.

use clap::{ColorChoice, Parser};
use recipe_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ViewArgs};
use crate::commands::{run_export, run_import, run_reset_included, run_set_target, run_view};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    // Without a subcommand the viewer summary runs on an auto-picked file.
    let command = cli.command.unwrap_or(Command::View(ViewArgs::default()));
    let exit_code = match command {
        Command::View(args) => match run_view(&args) {
            Ok(summary) => {
                if args.json {
                    match serde_json::to_string_pretty(&summary) {
                        Ok(json) => println!("{json}"),
                        Err(error) => {
                            eprintln!("error: {error}");
                            std::process::exit(1);
                        }
                    }
                } else {
                    print_summary(&summary);
                }
                0
            }
            Err(error) => report(&error),
        },
        Command::Import(args) => run_import(&args).map_or_else(|e| report(&e), |()| 0),
        Command::ResetIncluded(args) => {
            run_reset_included(&args).map_or_else(|e| report(&e), |()| 0)
        }
        Command::SetTarget(args) => run_set_target(&args).map_or_else(|e| report(&e), |()| 0),
        Command::Export(args) => run_export(&args).map_or_else(|e| report(&e), |()| 0),
    };
    std::process::exit(exit_code);
}

fn report(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
