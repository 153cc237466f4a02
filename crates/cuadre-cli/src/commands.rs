use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cuadre_model::{FortnightHalf, ReportOptions, ReportPeriod};
use cuadre_report::{
    ColumnSchema, ReportWorkbook, fortnightly_report, load_column_schema, monthly_report,
};
use cuadre_xlsx::write_workbook;

use crate::source::JsonFileSource;
use crate::types::RunResult;

/// Flag values shared by both report commands.
#[derive(Debug, Clone, Default)]
pub struct OutputSettings {
    pub output_dir: Option<PathBuf>,
    pub title: Option<String>,
    pub min_totals_row: Option<u32>,
    pub dry_run: bool,
}

impl OutputSettings {
    fn options(&self, label: Option<&str>) -> ReportOptions {
        let mut options = ReportOptions::default();
        if let Some(label) = label {
            options = options.with_report_label(label);
        }
        if let Some(title) = &self.title {
            options = options.with_center_title(title.as_str());
        }
        if let Some(row) = self.min_totals_row {
            options = options.with_min_totals_row(row);
        }
        options
    }

    fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(Path::new("."))
    }
}

pub fn run_monthly(
    source: &JsonFileSource,
    year: i32,
    month: u32,
    label: Option<&str>,
    settings: &OutputSettings,
) -> Result<RunResult> {
    let period = ReportPeriod::month(year, month).context("monthly period")?;
    let options = settings.options(label);
    let workbook =
        monthly_report(source, &period, &options).context("build monthly report")?;
    finish(workbook, &options, settings)
}

pub fn run_fortnightly(
    source: &JsonFileSource,
    year: i32,
    month: u32,
    half: u8,
    settings: &OutputSettings,
) -> Result<RunResult> {
    let half = FortnightHalf::from_number(half)
        .with_context(|| format!("fortnight must be 1 or 2, got {half}"))?;
    let period = ReportPeriod::fortnight(year, month, half).context("fortnightly period")?;
    let options = settings.options(None);
    let workbook = fortnightly_report(source, &period).context("build fortnightly report")?;
    finish(workbook, &options, settings)
}

/// Resolve the dynamic study columns for a catalog.
pub fn run_columns(source: &JsonFileSource) -> Result<ColumnSchema> {
    load_column_schema(source).context("load study catalog")
}

fn finish(
    workbook: ReportWorkbook,
    options: &ReportOptions,
    settings: &OutputSettings,
) -> Result<RunResult> {
    let span = info_span!("export", file_name = %workbook.file_name);
    let _guard = span.enter();
    if settings.dry_run {
        info!(sheets = workbook.sheets.len(), "dry run, workbook not written");
        return Ok(RunResult {
            workbook,
            output: None,
        });
    }
    let path = write_workbook(&workbook, options, settings.output_dir())
        .with_context(|| format!("write {}", workbook.file_name))?;
    Ok(RunResult {
        workbook,
        output: Some(path),
    })
}
