//! Integration tests for XLSX export.

use std::str::FromStr;

use rust_decimal::Decimal;

use cuadre_model::{
    FortnightHalf, LineItem, Patient, PatientAge, PaymentMethod, ReportOptions, ReportPeriod,
    StudyCatalogEntry, VisitRecord,
};
use cuadre_report::{
    PaymentTotals, ReportSheet, ReportWorkbook, StaticSource, build_column_schema,
    fortnightly_report, monthly_report,
};
use cuadre_xlsx::{ExportError, render_workbook, write_workbook};

fn weekend_visit() -> VisitRecord {
    VisitRecord {
        date: "2024-03-02".parse().unwrap(),
        patient: Patient {
            name: "Rosa Diaz".to_string(),
            age: PatientAge::Years(63),
        },
        attending_doctor: Some("Dr. Mena".to_string()),
        recommended_doctor: None,
        no_doctor_info: false,
        invoice_number: None,
        billing_category: "social".into(),
        payment_method: PaymentMethod::from("account_statement"),
        line_items: vec![LineItem {
            sub_study_name: Some("Eco pelvica".to_string()),
            study_id: 1,
            price: Decimal::from_str("85.25").unwrap(),
        }],
    }
}

#[test]
fn writes_complete_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let source = StaticSource::new(
        vec![StudyCatalogEntry::new(1, "ECOGRAFIA")],
        vec![weekend_visit()],
    );
    let period = ReportPeriod::month(2024, 3).unwrap();
    let options = ReportOptions::default().with_report_label("Ventas");
    let report = monthly_report(&source, &period, &options).unwrap();

    let path = write_workbook(&report, &options, &dir.path().join("out")).unwrap();

    assert_eq!(path.file_name().unwrap(), "Ventas_MARZO_2024.xlsx");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx is a zip container");
}

#[test]
fn empty_month_still_renders_every_day() {
    let source = StaticSource::new(vec![StudyCatalogEntry::new(1, "ECOGRAFIA")], Vec::new());
    let period = ReportPeriod::month(2023, 4).unwrap();
    let options = ReportOptions::default();
    let report = monthly_report(&source, &period, &options).unwrap();
    assert_eq!(report.sheets.len(), 30);
    let bytes = render_workbook(&report, &options).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn rejected_sheet_name_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let report = ReportWorkbook {
        file_name: "Roto.xlsx".to_string(),
        schema: build_column_schema(&[]),
        sheets: vec![ReportSheet {
            name: "'DR. MENA'".to_string(),
            title: "DR. MENA".to_string(),
            rows: Vec::new(),
            totals: PaymentTotals::default(),
        }],
        totals: PaymentTotals::default(),
    };

    let error = write_workbook(&report, &ReportOptions::default(), dir.path()).unwrap_err();

    assert!(matches!(error, ExportError::Writer(_)));
    assert!(!dir.path().join("Roto.xlsx").exists());
}

#[test]
fn empty_fortnight_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let source = StaticSource::new(
        vec![StudyCatalogEntry::new(1, "ECOGRAFIA")],
        vec![weekend_visit()],
    );
    let period = ReportPeriod::fortnight(2024, 3, FortnightHalf::Second).unwrap();
    let report = fortnightly_report(&source, &period).unwrap();
    assert!(report.sheets.is_empty());

    let error = write_workbook(&report, &ReportOptions::default(), dir.path()).unwrap_err();

    assert!(matches!(error, ExportError::EmptyWorkbook { .. }));
    assert!(!dir.path().join(&report.file_name).exists());
}
