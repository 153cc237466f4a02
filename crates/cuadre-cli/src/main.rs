//! Billing report generator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use cuadre_cli::commands::{OutputSettings, run_columns, run_fortnightly, run_monthly};
use cuadre_cli::logging::{LogConfig, LogFormat, init_logging};
use cuadre_cli::source::JsonFileSource;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArgs};
use crate::summary::{print_columns, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Monthly(args) => {
            let source = JsonFileSource::new(&args.input.catalog, &args.input.visits);
            run_monthly(
                &source,
                args.year,
                args.month,
                args.label.as_deref(),
                &settings(&args.output),
            )
            .map(|result| print_summary(&result))
        }
        Command::Fortnightly(args) => {
            let source = JsonFileSource::new(&args.input.catalog, &args.input.visits);
            run_fortnightly(
                &source,
                args.year,
                args.month,
                args.half,
                &settings(&args.output),
            )
            .map(|result| print_summary(&result))
        }
        Command::Columns(args) => {
            run_columns(&JsonFileSource::catalog_only(&args.catalog))
                .map(|schema| print_columns(&schema))
        }
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(report) => {
            eprintln!("error: {report:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn settings(args: &OutputArgs) -> OutputSettings {
    OutputSettings {
        output_dir: args.output_dir.clone(),
        title: args.title.clone(),
        min_totals_row: args.min_totals_row,
        dry_run: args.dry_run,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
