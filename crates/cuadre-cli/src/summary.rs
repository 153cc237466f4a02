use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rust_decimal::Decimal;

use cuadre_cli::types::RunResult;
use cuadre_report::{ColumnSchema, PaymentBucket, PaymentTotals, TOTAL_GENERATED_LABEL};

pub fn print_summary(result: &RunResult) {
    let workbook = &result.workbook;
    println!("Workbook: {}", workbook.file_name);
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }

    let mut header = vec![header_cell("Sheet"), header_cell("Visits")];
    header.extend(PaymentBucket::ALL.iter().map(|bucket| header_cell(bucket.label())));
    header.push(header_cell(TOTAL_GENERATED_LABEL));
    let amount_columns = PaymentBucket::ALL.len() + 1;

    let mut table = Table::new();
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 1..=amount_columns + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for sheet in &workbook.sheets {
        let mut row = vec![sheet_cell(&sheet.name), count_cell(sheet.rows.len())];
        row.extend(amount_cells(&sheet.totals, false));
        table.add_row(row);
    }
    let mut total_row = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(workbook.visit_count()).add_attribute(Attribute::Bold),
    ];
    total_row.extend(amount_cells(&workbook.totals, true));
    table.add_row(total_row);
    println!("{table}");
}

pub fn print_columns(schema: &ColumnSchema) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Id"), header_cell("Study")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, entry) in schema.entries().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(entry.id),
            Cell::new(&entry.name),
        ]);
    }
    println!("{table}");
    if schema.is_empty() {
        println!("No study columns: the catalog only holds reserved studies.");
    }
}

fn amount_cells(totals: &PaymentTotals, bold: bool) -> Vec<Cell> {
    let mut cells: Vec<Cell> = PaymentBucket::ALL
        .iter()
        .map(|bucket| amount_cell(totals.bucket(*bucket)))
        .collect();
    cells.push(amount_cell(totals.generated).fg(Color::Green));
    if bold {
        cells = cells
            .into_iter()
            .map(|cell| cell.add_attribute(Attribute::Bold))
            .collect();
    }
    cells
}

fn amount_cell(amount: Decimal) -> Cell {
    if amount.is_zero() {
        dim_cell(format!("{amount:.2}"))
    } else {
        Cell::new(format!("{amount:.2}"))
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn sheet_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
