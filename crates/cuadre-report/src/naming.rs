//! Sheet and file naming contracts.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use cuadre_model::{FortnightHalf, ReportPeriod};

/// Characters a spreadsheet refuses in sheet names.
pub const FORBIDDEN_SHEET_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

pub const DOCTOR_SHEET_NAME_LEN: usize = 30;

/// Hard limit of sheet name length in a workbook.
pub const MAX_SHEET_NAME_LEN: usize = 31;

pub const UNNAMED_SHEET: &str = "SIN NOMBRE";

/// `DDMMYY`, zero padded.
pub fn day_sheet_name(date: NaiveDate) -> String {
    date.format("%d%m%y").to_string()
}

/// First 30 characters of the doctor's name, forbidden characters removed.
pub fn doctor_sheet_name(doctor: &str) -> String {
    doctor
        .chars()
        .take(DOCTOR_SHEET_NAME_LEN)
        .filter(|ch| !FORBIDDEN_SHEET_CHARS.contains(ch))
        .collect()
}

/// Make every name non-empty and unique, preserving order.
///
/// A repeated name gets a `~N` suffix, shortening the base so the result
/// still fits the sheet name limit. Comparison ignores case, as spreadsheet
/// applications do.
pub fn unique_sheet_names(names: Vec<String>) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    names
        .into_iter()
        .map(|name| {
            let base = if name.trim().is_empty() {
                UNNAMED_SHEET.to_string()
            } else {
                name
            };
            let mut candidate = base.clone();
            let mut counter = 2usize;
            while used.contains(&candidate.to_uppercase()) {
                let suffix = format!("~{counter}");
                let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
                candidate = base.chars().take(keep).collect::<String>() + &suffix;
                counter += 1;
            }
            used.insert(candidate.to_uppercase());
            candidate
        })
        .collect()
}

/// `<LABEL>_<MONTH>_<YEAR>.xlsx`
pub fn monthly_file_name(report_label: &str, period: &ReportPeriod) -> String {
    format!(
        "{report_label}_{}_{}.xlsx",
        period.month_name(),
        period.year()
    )
}

/// `Cuadre_Quincenal_<1|2>Q_<MONTH>_<YEAR>.xlsx`
pub fn fortnightly_file_name(period: &ReportPeriod, half: FortnightHalf) -> String {
    format!(
        "Cuadre_Quincenal_{}Q_{}_{}.xlsx",
        half.number(),
        period.month_name(),
        period.year()
    )
}
