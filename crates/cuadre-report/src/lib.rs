//! Billing report synthesis.
//!
//! Turns visit billing records and the study catalog into report sheets:
//!
//! - **Column schema**: dynamic study columns derived from the catalog
//! - **Aggregation**: visits grouped per calendar day or per doctor
//! - **Rows**: each visit classified under the center's business rules
//! - **Totals**: payment-method buckets plus the grand total
//! - **Sheets**: a format-independent layout written through [`SheetSink`]

mod aggregate;
mod cell;
mod naming;
mod row;
mod rules;
mod schema;
mod sheet;
mod source;
mod totals;
mod workbook;

pub use aggregate::{ReportUnit, doctor_group_name, group_by_day, group_by_doctor};
pub use cell::{Cell, CellStyle, CellValue};
pub use naming::{
    day_sheet_name, doctor_sheet_name, fortnightly_file_name, monthly_file_name,
    unique_sheet_names,
};
pub use row::{
    FIXED_COLUMNS, FormattedRow, NON_BUSINESS_DAY_MARKER, TRAILING_COLUMNS, column_count,
    format_age, format_row, header_labels, is_non_business_day, study_description,
};
pub use rules::{
    DOCTOR_ATTRIBUTION, DoctorSource, PaymentBucket, attribute_doctor, category_code,
    payment_bucket, payment_label,
};
pub use schema::{ColumnSchema, build_column_schema, load_column_schema};
pub use sheet::{
    CellRange, FIRST_DATA_ROW, HEADER_ROW, MemorySheet, SheetSink, TOTALS_LABEL_COL,
    TOTALS_VALUE_COL, emit_sheet, totals_start_row,
};
pub use source::{ReportSource, StaticSource};
pub use totals::{PaymentTotals, TOTAL_GENERATED_LABEL};
pub use workbook::{ReportSheet, ReportWorkbook, fortnightly_report, monthly_report};
