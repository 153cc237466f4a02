//! Integration tests for report assembly and sheet layout.

use std::str::FromStr;

use rust_decimal::Decimal;

use cuadre_model::{
    FortnightHalf, LineItem, Patient, PatientAge, PaymentMethod, ReportError, ReportOptions,
    ReportPeriod, Result, StudyCatalogEntry, VisitRecord,
};
use cuadre_report::{
    CellStyle, FIRST_DATA_ROW, HEADER_ROW, MemorySheet, ReportSource, StaticSource,
    TOTALS_LABEL_COL, TOTALS_VALUE_COL, build_column_schema, emit_sheet, fortnightly_report,
    header_labels, monthly_report,
};

fn amount(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn test_catalog() -> Vec<StudyCatalogEntry> {
    vec![
        StudyCatalogEntry::new(2, "RAYOS X"),
        StudyCatalogEntry::new(3, "PAP/LABS"),
        StudyCatalogEntry::new(1, "ECOGRAFIA"),
        StudyCatalogEntry::new(4, "LABORATORIO"),
        StudyCatalogEntry::new(5, "papanicolaou"),
    ]
}

fn test_visit(
    date: &str,
    payment: &str,
    category: &str,
    items: &[(i64, &str, &str)],
) -> VisitRecord {
    VisitRecord {
        date: date.parse().unwrap(),
        patient: Patient {
            name: "Juan Perez".to_string(),
            age: PatientAge::Years(52),
        },
        attending_doctor: Some("Dra. Gomez".to_string()),
        recommended_doctor: None,
        no_doctor_info: false,
        invoice_number: Some("f-001".to_string()),
        billing_category: category.into(),
        payment_method: PaymentMethod::from(payment),
        line_items: items
            .iter()
            .map(|(study_id, name, price)| LineItem {
                sub_study_name: Some((*name).to_string()),
                study_id: *study_id,
                price: amount(price),
            })
            .collect(),
    }
}

fn february_visits() -> Vec<VisitRecord> {
    vec![
        test_visit(
            "2024-02-12",
            "cash",
            "normal",
            &[(1, "Eco abdominal", "150.00"), (1, "Eco renal", "50.00")],
        ),
        test_visit("2024-02-10", "transfer", "social", &[(2, "Rx torax", "40.00")]),
        test_visit(
            "2024-02-12",
            "card",
            "special",
            &[(4, "Hemograma", "30.00"), (3, "Pap", "20.00")],
        ),
    ]
}

struct BrokenCatalog;

impl ReportSource for BrokenCatalog {
    fn fetch_catalog(&self) -> Result<Vec<StudyCatalogEntry>> {
        Err(ReportError::RecordsUnavailable("connection refused".to_string()))
    }

    fn fetch_visits(&self, _period: &ReportPeriod) -> Result<Vec<VisitRecord>> {
        panic!("visits must not be fetched when the catalog is unavailable");
    }
}

#[test]
fn header_row_contract() {
    let schema = build_column_schema(&test_catalog());
    insta::assert_snapshot!(
        header_labels(&schema).join(" | "),
        @"FECHA | FACTURA | PACIENTE | EDAD | ESTUDIO | MÉDICO | FORMA DE PAGO | TIPO | ECOGRAFIA | LABORATORIO | RAYOS X | PRECIO SOCIAL | ESTADO DE CUENTA"
    );
}

#[test]
fn catalog_failure_aborts_report() {
    let period = ReportPeriod::month(2024, 2).unwrap();
    let error = monthly_report(&BrokenCatalog, &period, &ReportOptions::default()).unwrap_err();
    match error {
        ReportError::CatalogUnavailable(message) => {
            assert!(message.contains("connection refused"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn monthly_report_groups_by_day() {
    let source = StaticSource::new(test_catalog(), february_visits());
    let period = ReportPeriod::month(2024, 2).unwrap();
    let workbook = monthly_report(&source, &period, &ReportOptions::default()).unwrap();

    insta::assert_snapshot!(&workbook.file_name, @"Reporte_Mensual_FEBRERO_2024.xlsx");
    let names: Vec<&str> = workbook.sheets.iter().map(|sheet| sheet.name.as_str()).collect();
    assert_eq!(names, vec!["100224", "120224"]);
    assert_eq!(workbook.sheets[0].title, "REPORTE DEL 10/02/2024");
    assert_eq!(workbook.visit_count(), 3);

    let day12 = &workbook.sheets[1];
    assert_eq!(day12.totals.cash, amount("200.00"));
    assert_eq!(day12.totals.card, amount("50.00"));
    assert_eq!(day12.totals.generated, amount("250.00"));

    let grand = &workbook.totals;
    assert_eq!(grand.deposited, amount("40.00"));
    assert_eq!(grand.generated, amount("290.00"));
}

#[test]
fn card_special_visit_row() {
    let schema = build_column_schema(&test_catalog());
    let visits = february_visits();
    let row = cuadre_report::format_row(&visits[2], &schema).unwrap();
    assert_eq!(row.category_code, "PE");
    assert_eq!(row.payment, "TARJETA");
    assert_eq!(row.social_price, None);
    assert_eq!(row.account_balance, None);
    // ECOGRAFIA, LABORATORIO, RAYOS X; the reserved PAP/LABS item has no column.
    assert_eq!(row.study_amounts, vec![None, Some(amount("30.00")), None]);
    assert_eq!(row.study, "HEMOGRAMA, PAP");
    assert_eq!(row.doctor, "DRA. GOMEZ");
    assert_eq!(row.invoice, "F-001");
}

#[test]
fn emitted_sheet_layout() {
    let source = StaticSource::new(test_catalog(), february_visits());
    let period = ReportPeriod::month(2024, 2).unwrap();
    let options = ReportOptions::default().with_center_title("CENTRO DE PRUEBA");
    let workbook = monthly_report(&source, &period, &options).unwrap();

    let mut sheet = MemorySheet::new();
    emit_sheet(&workbook.sheets[0], &workbook.schema, &options, &mut sheet).unwrap();

    assert_eq!(sheet.text(0, 0), Some("CENTRO DE PRUEBA"));
    assert_eq!(sheet.text(1, 0), Some("REPORTE DEL 10/02/2024"));
    assert_eq!(sheet.merges().len(), 2);
    assert_eq!(sheet.merges()[0].last_col, 12);
    assert_eq!(sheet.text(HEADER_ROW, 12), Some("ESTADO DE CUENTA"));
    assert_eq!(sheet.width(2), Some(32.0));
    assert_eq!(sheet.width(9), Some(14.0));

    // Saturday visit: flagged description, social price filled.
    let study = sheet.cell(FIRST_DATA_ROW, 4).unwrap();
    assert_eq!(study.value.as_text(), Some("RX TORAX INHABIL"));
    assert_eq!(study.style, CellStyle::Flagged);
    assert_eq!(sheet.text(FIRST_DATA_ROW, 6), Some("DEPOSITADO"));
    assert_eq!(sheet.text(FIRST_DATA_ROW, 7), Some("H"));
    assert_eq!(sheet.amount(FIRST_DATA_ROW, 10), Some(amount("40.00")));
    assert_eq!(sheet.amount(FIRST_DATA_ROW, 11), Some(amount("40.00")));
    assert!(sheet.cell(FIRST_DATA_ROW, 12).unwrap().value.is_empty());

    let totals = sheet.totals();
    let labels: Vec<&str> = totals.iter().map(|(_, label, _)| *label).collect();
    assert_eq!(
        labels,
        vec!["EFECTIVO", "DEPOSITADO", "TARJETA", "ESTADO DE CUENTA", "TOTAL GENERADO"]
    );
    assert_eq!(totals[0].0, options.min_totals_row);
    assert_eq!(totals[1].2, amount("40.00"));
    assert_eq!(
        sheet.text(options.min_totals_row + 4, TOTALS_LABEL_COL),
        Some("TOTAL GENERADO")
    );
    assert_eq!(
        sheet.amount(options.min_totals_row + 4, TOTALS_VALUE_COL),
        Some(amount("40.00"))
    );
}

#[test]
fn long_sheet_pushes_totals_below_data() {
    let visits: Vec<VisitRecord> = (0..25)
        .map(|_| test_visit("2024-02-13", "cash", "normal", &[(1, "Eco", "10.00")]))
        .collect();
    let source = StaticSource::new(test_catalog(), visits);
    let period = ReportPeriod::month(2024, 2).unwrap();
    let options = ReportOptions::default();
    let workbook = monthly_report(&source, &period, &options).unwrap();
    assert_eq!(workbook.sheets.len(), 1);

    let mut sheet = MemorySheet::new();
    emit_sheet(&workbook.sheets[0], &workbook.schema, &options, &mut sheet).unwrap();
    let last_data_row = FIRST_DATA_ROW + 24;
    assert!(sheet.text(last_data_row, 0).is_some());
    assert!(sheet.row(last_data_row + 1).is_empty());
    assert_eq!(sheet.totals()[0].0, last_data_row + 2);
    assert_eq!(sheet.totals()[4].2, amount("250.00"));
}

#[test]
fn empty_leap_february_yields_29_empty_sheets() {
    let source = StaticSource::new(test_catalog(), Vec::new());
    let period = ReportPeriod::month(2024, 2).unwrap();
    let options = ReportOptions::default();
    let workbook = monthly_report(&source, &period, &options).unwrap();

    assert_eq!(workbook.sheets.len(), 29);
    assert_eq!(workbook.sheets[0].name, "010224");
    assert_eq!(workbook.sheets[28].name, "290224");
    for report_sheet in &workbook.sheets {
        assert!(report_sheet.rows.is_empty());
        let mut sheet = MemorySheet::new();
        emit_sheet(report_sheet, &workbook.schema, &options, &mut sheet).unwrap();
        assert_eq!(sheet.text(HEADER_ROW, 0), Some("FECHA"));
        assert!(sheet.row(FIRST_DATA_ROW).is_empty());
        let totals = sheet.totals();
        assert_eq!(totals.len(), 5);
        assert!(totals.iter().all(|(_, _, value)| value.is_zero()));
    }
}

#[test]
fn overflowing_amounts_fail_the_whole_report() {
    let mut visits = february_visits();
    visits[0].line_items[0].price = Decimal::MAX;
    let source = StaticSource::new(test_catalog(), visits);
    let period = ReportPeriod::month(2024, 2).unwrap();

    let error = monthly_report(&source, &period, &ReportOptions::default()).unwrap_err();

    match error {
        ReportError::AmountOverflow { context } => assert!(context.contains("2024-02-12")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_fortnight_has_no_sheets() {
    let source = StaticSource::new(test_catalog(), february_visits());
    let period = ReportPeriod::fortnight(2024, 2, FortnightHalf::Second).unwrap();

    let workbook = fortnightly_report(&source, &period).unwrap();

    assert!(workbook.sheets.is_empty());
    assert_eq!(workbook.totals, cuadre_report::PaymentTotals::default());
}

#[test]
fn fortnightly_report_groups_by_doctor() {
    let mut visits = february_visits();
    visits[1].attending_doctor = Some("Dr. Ruiz: Cardiologia".to_string());
    visits.push(test_visit("2024-02-20", "cash", "normal", &[(1, "Eco", "99.00")]));
    let source = StaticSource::new(test_catalog(), visits);
    let period = ReportPeriod::fortnight(2024, 2, FortnightHalf::First).unwrap();
    let workbook = fortnightly_report(&source, &period).unwrap();

    insta::assert_snapshot!(&workbook.file_name, @"Cuadre_Quincenal_1Q_FEBRERO_2024.xlsx");
    let names: Vec<&str> = workbook.sheets.iter().map(|sheet| sheet.name.as_str()).collect();
    assert_eq!(names, vec!["DR. RUIZ CARDIOLOGIA", "DRA. GOMEZ"]);
    assert_eq!(workbook.sheets[1].title, "DRA. GOMEZ - CUADRE 1Q FEBRERO 2024");
    // The visit on the 20th belongs to the second fortnight.
    assert_eq!(workbook.visit_count(), 3);
}

#[test]
fn report_kind_must_match_period() {
    let source = StaticSource::new(test_catalog(), Vec::new());
    let month = ReportPeriod::month(2024, 2).unwrap();
    let fortnight = ReportPeriod::fortnight(2024, 2, FortnightHalf::Second).unwrap();
    assert!(matches!(
        fortnightly_report(&source, &month),
        Err(ReportError::InvalidPeriod { .. })
    ));
    assert!(matches!(
        monthly_report(&source, &fortnight, &ReportOptions::default()),
        Err(ReportError::InvalidPeriod { .. })
    ));
}
