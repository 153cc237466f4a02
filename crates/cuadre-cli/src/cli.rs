//! CLI argument definitions for the billing report generator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cuadre",
    version,
    about = "Billing report generator - Render visit billing records into spreadsheet reports",
    long_about = "Render diagnostic-center visit billing records into multi-sheet XLSX reports.\n\n\
                  The monthly report has one sheet per day; the fortnightly\n\
                  reconciliation has one sheet per attending doctor."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Allow patient names in trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the monthly report (one sheet per day).
    Monthly(MonthlyArgs),

    /// Generate the fortnightly reconciliation (one sheet per doctor).
    Fortnightly(FortnightlyArgs),

    /// Print the dynamic study columns derived from a catalog.
    Columns(ColumnsArgs),
}

/// Data files standing in for the billing database.
#[derive(Args)]
pub struct InputArgs {
    /// JSON array of study catalog entries.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,

    /// JSON array of visit records.
    #[arg(long = "visits", value_name = "FILE")]
    pub visits: PathBuf,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Output directory for the workbook (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Title printed at the top of every sheet.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Row below which the totals block is never placed.
    #[arg(long = "min-totals-row", value_name = "ROW")]
    pub min_totals_row: Option<u32>,

    /// Build the report and print the summary without writing a file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct MonthlyArgs {
    #[arg(long = "year")]
    pub year: i32,

    #[arg(long = "month", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Leading component of the file name.
    #[arg(long = "label")]
    pub label: Option<String>,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct FortnightlyArgs {
    #[arg(long = "year")]
    pub year: i32,

    #[arg(long = "month", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Fortnight: 1 (days 1-15) or 2 (day 16 to month end).
    #[arg(long = "half", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub half: u8,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// JSON array of study catalog entries.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: PathBuf,
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
