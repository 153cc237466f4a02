//! Formatting of one visit into a classified report row.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use cuadre_model::{CategoryKind, PatientAge, PaymentKind, Result, VisitRecord};

use crate::cell::{Cell, CellStyle, CellValue};
use crate::rules::{attribute_doctor, category_code, payment_label};
use crate::schema::ColumnSchema;

/// Suffix appended to the study description of a non-business-day visit.
pub const NON_BUSINESS_DAY_MARKER: &str = " INHABIL";

/// Fixed leading columns: header label and column width.
pub const FIXED_COLUMNS: [(&str, f64); 8] = [
    ("FECHA", 12.0),
    ("FACTURA", 12.0),
    ("PACIENTE", 32.0),
    ("EDAD", 10.0),
    ("ESTUDIO", 40.0),
    ("MÉDICO", 30.0),
    ("FORMA DE PAGO", 18.0),
    ("TIPO", 6.0),
];

/// Derived columns appended after the dynamic study columns.
pub const TRAILING_COLUMNS: [&str; 2] = ["PRECIO SOCIAL", "ESTADO DE CUENTA"];

pub const AMOUNT_COLUMN_WIDTH: f64 = 14.0;

pub const COL_DOCTOR: u16 = 5;
pub const COL_PAYMENT: u16 = 6;

/// Total number of columns for a schema.
pub fn column_count(schema: &ColumnSchema) -> usize {
    FIXED_COLUMNS.len() + schema.len() + TRAILING_COLUMNS.len()
}

/// Header labels in column order.
pub fn header_labels(schema: &ColumnSchema) -> Vec<&str> {
    FIXED_COLUMNS
        .iter()
        .map(|(label, _)| *label)
        .chain(schema.labels())
        .chain(TRAILING_COLUMNS)
        .collect()
}

/// One visit, classified and ready to be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRow {
    pub date: String,
    pub invoice: String,
    pub patient: String,
    pub age: String,
    pub study: String,
    /// Visit fell on a Saturday or Sunday.
    pub non_business_day: bool,
    pub doctor: String,
    pub payment: String,
    pub category_code: &'static str,
    /// One entry per schema column, in schema order.
    pub study_amounts: Vec<Option<Decimal>>,
    pub social_price: Option<Decimal>,
    pub account_balance: Option<Decimal>,
    pub total: Decimal,
}

impl FormattedRow {
    /// Cells in column order, matching [`header_labels`].
    pub fn cells(&self) -> Vec<Cell> {
        let study_style = if self.non_business_day {
            CellStyle::Flagged
        } else {
            CellStyle::Text
        };
        let mut cells = Vec::with_capacity(FIXED_COLUMNS.len() + self.study_amounts.len() + 2);
        cells.push(Cell::text(&self.date));
        cells.push(Cell::text(&self.invoice));
        cells.push(Cell::text(&self.patient));
        cells.push(Cell::text(&self.age));
        cells.push(Cell::new(CellValue::text(&self.study), study_style));
        cells.push(Cell::text(&self.doctor));
        cells.push(Cell::text(&self.payment));
        cells.push(Cell::text(self.category_code));
        cells.extend(self.study_amounts.iter().map(|amount| Cell::amount(*amount)));
        cells.push(Cell::amount(self.social_price));
        cells.push(Cell::amount(self.account_balance));
        cells
    }
}

pub fn is_non_business_day(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Upper-cased sub-study names joined with `", "`, flagged on weekends.
pub fn study_description(visit: &VisitRecord) -> String {
    let names: Vec<&str> = visit
        .line_items
        .iter()
        .map(|item| item.sub_study_name.as_deref().unwrap_or_default())
        .collect();
    let mut description = names.join(", ").to_uppercase();
    if is_non_business_day(visit.date) {
        description.push_str(NON_BUSINESS_DAY_MARKER);
    }
    description
}

pub fn format_age(age: PatientAge) -> String {
    match age {
        PatientAge::Explicit { value, unit } => format!("{value} {unit}"),
        PatientAge::Years(years) => format!("{years} años"),
    }
}

/// Classify one visit against the schema.
///
/// # Errors
///
/// [`cuadre_model::ReportError::AmountOverflow`] if a price sum overflows.
pub fn format_row(visit: &VisitRecord, schema: &ColumnSchema) -> Result<FormattedRow> {
    let total = visit.total()?;
    let study_amounts = schema
        .entries()
        .iter()
        .map(|entry| visit.total_for_study(entry.id))
        .collect::<Result<Vec<_>>>()?;
    Ok(FormattedRow {
        date: visit.date.format("%d/%m/%Y").to_string(),
        invoice: visit
            .invoice_number
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_uppercase(),
        patient: visit.patient.name.trim().to_uppercase(),
        age: format_age(visit.patient.age),
        study: study_description(visit),
        non_business_day: is_non_business_day(visit.date),
        doctor: attribute_doctor(visit),
        payment: payment_label(&visit.payment_method),
        category_code: category_code(&visit.billing_category),
        study_amounts,
        social_price: visit
            .billing_category
            .is(CategoryKind::Social)
            .then_some(total),
        account_balance: visit
            .payment_method
            .is(PaymentKind::AccountStatement)
            .then_some(total),
        total,
    })
}
