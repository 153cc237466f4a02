use std::path::PathBuf;

use cuadre_report::ReportWorkbook;

/// Outcome of one report command.
#[derive(Debug)]
pub struct RunResult {
    pub workbook: ReportWorkbook,
    /// Where the workbook was written; `None` on a dry run.
    pub output: Option<PathBuf>,
}
