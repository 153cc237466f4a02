//! Report assembly: from source data to a complete in-memory workbook.
//!
//! Every sheet is computed before anything is handed to an output
//! collaborator, so a failure never leaves a partial workbook behind.

use tracing::{debug, info, info_span};

use cuadre_model::{
    FortnightHalf, PeriodSpan, ReportError, ReportOptions, ReportPeriod, Result, VisitRecord,
};

use crate::aggregate::{ReportUnit, group_by_day, group_by_doctor};
use crate::naming::{
    day_sheet_name, doctor_sheet_name, fortnightly_file_name, monthly_file_name,
    unique_sheet_names,
};
use crate::row::{FormattedRow, format_row};
use crate::schema::{ColumnSchema, load_column_schema};
use crate::source::ReportSource;
use crate::totals::PaymentTotals;

/// One report unit, fully formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSheet {
    pub name: String,
    /// Label printed under the center title.
    pub title: String,
    pub rows: Vec<FormattedRow>,
    pub totals: PaymentTotals,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWorkbook {
    pub file_name: String,
    pub schema: ColumnSchema,
    pub sheets: Vec<ReportSheet>,
    /// Totals over every sheet of the workbook.
    pub totals: PaymentTotals,
}

impl ReportWorkbook {
    pub fn visit_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.rows.len()).sum()
    }
}

/// Monthly report: one sheet per day.
///
/// # Errors
///
/// Fails if `period` is not a whole month, if the catalog cannot be fetched
/// (checked first), if the visits cannot be fetched, or if an amount sum
/// overflows.
pub fn monthly_report<S: ReportSource + ?Sized>(
    source: &S,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<ReportWorkbook> {
    if period.span() != PeriodSpan::Month {
        return Err(invalid_span(period, "monthly report needs a whole month"));
    }
    let span = info_span!(
        "report",
        kind = "monthly",
        month = period.month_name(),
        year = period.year()
    );
    let _guard = span.enter();

    let schema = load_column_schema(source)?;
    let visits = source.fetch_visits(period)?;
    let units = group_by_day(&visits, period);
    let file_name = monthly_file_name(&options.report_label, period);
    let workbook = assemble(file_name, schema, &units, |day| {
        (
            day_sheet_name(*day),
            format!("REPORTE DEL {}", day.format("%d/%m/%Y")),
        )
    })?;
    log_workbook(&workbook, &visits);
    Ok(workbook)
}

/// Fortnightly reconciliation: one sheet per attending doctor.
///
/// # Errors
///
/// Fails if `period` is not a fortnight, on catalog/visit fetch failure, or
/// if an amount sum overflows.
pub fn fortnightly_report<S: ReportSource + ?Sized>(
    source: &S,
    period: &ReportPeriod,
) -> Result<ReportWorkbook> {
    let half = match period.span() {
        PeriodSpan::Fortnight(half) => half,
        PeriodSpan::Month => {
            return Err(invalid_span(period, "fortnightly report needs a fortnight"));
        }
    };
    let span = info_span!(
        "report",
        kind = "fortnightly",
        half = half.number(),
        month = period.month_name(),
        year = period.year()
    );
    let _guard = span.enter();

    let schema = load_column_schema(source)?;
    let visits = source.fetch_visits(period)?;
    let units = group_by_doctor(&visits, period);
    let file_name = fortnightly_file_name(period, half);
    let workbook = assemble(file_name, schema, &units, |doctor| {
        (
            doctor_sheet_name(doctor),
            fortnight_title(doctor, period, half),
        )
    })?;
    log_workbook(&workbook, &visits);
    Ok(workbook)
}

fn fortnight_title(doctor: &str, period: &ReportPeriod, half: FortnightHalf) -> String {
    format!(
        "{doctor} - CUADRE {}Q {} {}",
        half.number(),
        period.month_name(),
        period.year()
    )
    .trim_start_matches(" - ")
    .to_string()
}

fn assemble<K, F>(
    file_name: String,
    schema: ColumnSchema,
    units: &[ReportUnit<'_, K>],
    label: F,
) -> Result<ReportWorkbook>
where
    F: Fn(&K) -> (String, String),
{
    let mut names = Vec::with_capacity(units.len());
    let mut sheets = Vec::with_capacity(units.len());
    let mut grand = PaymentTotals::default();
    for unit in units {
        let (name, title) = label(&unit.key);
        let rows = unit
            .visits
            .iter()
            .map(|visit| format_row(visit, &schema))
            .collect::<Result<Vec<FormattedRow>>>()?;
        let totals = PaymentTotals::from_visits(unit.visits.iter().copied())?;
        grand.merge(&totals)?;
        debug!(sheet = %name, visits = rows.len(), total = %totals.generated, "sheet formatted");
        names.push(name);
        sheets.push(ReportSheet {
            name: String::new(),
            title,
            rows,
            totals,
        });
    }
    for (sheet, name) in sheets.iter_mut().zip(unique_sheet_names(names)) {
        sheet.name = name;
    }
    Ok(ReportWorkbook {
        file_name,
        schema,
        sheets,
        totals: grand,
    })
}

fn log_workbook(workbook: &ReportWorkbook, visits: &[VisitRecord]) {
    info!(
        file_name = %workbook.file_name,
        sheets = workbook.sheets.len(),
        columns = workbook.schema.len(),
        fetched_visits = visits.len(),
        reported_visits = workbook.visit_count(),
        "workbook assembled"
    );
}

fn invalid_span(period: &ReportPeriod, reason: &'static str) -> ReportError {
    ReportError::InvalidPeriod {
        year: period.year(),
        month: period.month_number(),
        reason,
    }
}
