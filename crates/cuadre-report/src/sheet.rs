//! Layout of one report unit onto a cell grid.
//!
//! The emitter only knows how to place values; the [`SheetSink`] behind it
//! decides how cells are stored or serialized.
//!
//! ```text
//! row 0   CENTER TITLE (merged)
//! row 1   unit label (merged)
//! row 2
//! row 3   FECHA | FACTURA | ... | <study columns> | PRECIO SOCIAL | ESTADO DE CUENTA
//! row 4.. one row per visit
//!         (blank)
//! row T   EFECTIVO          <amount>
//!         DEPOSITADO        <amount>
//!         TARJETA           <amount>
//!         ESTADO DE CUENTA  <amount>
//!         TOTAL GENERADO    <amount>
//! ```

use std::collections::BTreeMap;
use std::convert::Infallible;

use rust_decimal::Decimal;

use cuadre_model::ReportOptions;

use crate::cell::{Cell, CellStyle, CellValue};
use crate::row::{
    AMOUNT_COLUMN_WIDTH, COL_DOCTOR, COL_PAYMENT, FIXED_COLUMNS, column_count, header_labels,
};
use crate::schema::ColumnSchema;
use crate::workbook::ReportSheet;

pub const TITLE_ROW: u32 = 0;
pub const SUBTITLE_ROW: u32 = 1;
pub const HEADER_ROW: u32 = 3;
pub const FIRST_DATA_ROW: u32 = 4;

pub const TOTALS_LABEL_COL: u16 = COL_DOCTOR;
pub const TOTALS_VALUE_COL: u16 = COL_PAYMENT;

/// Inclusive rectangular cell range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn row_span(row: u32, first_col: u16, last_col: u16) -> Self {
        Self {
            first_row: row,
            first_col,
            last_row: row,
            last_col,
        }
    }
}

/// Output collaborator of the emitter.
pub trait SheetSink {
    type Error;

    fn write_cell(&mut self, row: u32, col: u16, cell: &Cell) -> Result<(), Self::Error>;

    /// Merge `range` and place `cell` in it.
    fn merge_range(&mut self, range: CellRange, cell: &Cell) -> Result<(), Self::Error>;

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), Self::Error>;
}

/// First row of the totals block.
///
/// At least one blank row below the last data row (or the header when there
/// is no data), and never above `min_totals_row`.
pub fn totals_start_row(data_rows: usize, min_totals_row: u32) -> u32 {
    let last_data_row = match u32::try_from(data_rows) {
        Ok(0) => HEADER_ROW,
        Ok(count) => FIRST_DATA_ROW.saturating_add(count - 1),
        Err(_) => u32::MAX - 2,
    };
    last_data_row.saturating_add(2).max(min_totals_row)
}

/// Lay out one report sheet.
///
/// # Errors
///
/// Propagates the first error returned by the sink.
pub fn emit_sheet<S: SheetSink>(
    sheet: &ReportSheet,
    schema: &ColumnSchema,
    options: &ReportOptions,
    sink: &mut S,
) -> Result<(), S::Error> {
    let columns = column_count(schema);
    let last_col = to_col(columns.saturating_sub(1));

    for (col, (_, width)) in FIXED_COLUMNS.iter().enumerate() {
        sink.set_column_width(to_col(col), *width)?;
    }
    for col in FIXED_COLUMNS.len()..columns {
        sink.set_column_width(to_col(col), AMOUNT_COLUMN_WIDTH)?;
    }

    sink.merge_range(
        CellRange::row_span(TITLE_ROW, 0, last_col),
        &Cell::new(
            CellValue::text(options.center_title.to_uppercase()),
            CellStyle::Title,
        ),
    )?;
    sink.merge_range(
        CellRange::row_span(SUBTITLE_ROW, 0, last_col),
        &Cell::new(CellValue::text(&sheet.title), CellStyle::Subtitle),
    )?;

    for (col, label) in header_labels(schema).into_iter().enumerate() {
        sink.write_cell(
            HEADER_ROW,
            to_col(col),
            &Cell::new(CellValue::text(label.to_uppercase()), CellStyle::Header),
        )?;
    }

    let mut row_index = FIRST_DATA_ROW;
    for row in &sheet.rows {
        for (col, cell) in row.cells().iter().enumerate() {
            sink.write_cell(row_index, to_col(col), cell)?;
        }
        row_index += 1;
    }

    let start = totals_start_row(sheet.rows.len(), options.min_totals_row);
    for (offset, (label, amount)) in (0u32..).zip(sheet.totals.rows()) {
        sink.write_cell(
            start + offset,
            TOTALS_LABEL_COL,
            &Cell::new(CellValue::text(label), CellStyle::TotalLabel),
        )?;
        sink.write_cell(
            start + offset,
            TOTALS_VALUE_COL,
            &Cell::new(CellValue::Amount(amount), CellStyle::TotalAmount),
        )?;
    }
    Ok(())
}

fn to_col(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

/// Sink that keeps the laid out grid in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    cells: BTreeMap<(u32, u16), Cell>,
    merges: Vec<CellRange>,
    widths: BTreeMap<u16, f64>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    pub fn text(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).and_then(|cell| cell.value.as_text())
    }

    pub fn amount(&self, row: u32, col: u16) -> Option<Decimal> {
        self.cell(row, col).and_then(|cell| cell.value.as_amount())
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: u32) -> Vec<&Cell> {
        self.cells
            .range((row, 0)..=(row, u16::MAX))
            .map(|(_, cell)| cell)
            .collect()
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    pub fn width(&self, col: u16) -> Option<f64> {
        self.widths.get(&col).copied()
    }

    /// Rows whose first cell is a totals label, with their amounts.
    pub fn totals(&self) -> Vec<(u32, &str, Decimal)> {
        self.cells
            .iter()
            .filter(|((_, col), cell)| {
                *col == TOTALS_LABEL_COL && cell.style == CellStyle::TotalLabel
            })
            .filter_map(|((row, _), cell)| {
                let label = cell.value.as_text()?;
                let amount = self.amount(*row, TOTALS_VALUE_COL)?;
                Some((*row, label, amount))
            })
            .collect()
    }
}

impl SheetSink for MemorySheet {
    type Error = Infallible;

    fn write_cell(&mut self, row: u32, col: u16, cell: &Cell) -> Result<(), Self::Error> {
        self.cells.insert((row, col), cell.clone());
        Ok(())
    }

    fn merge_range(&mut self, range: CellRange, cell: &Cell) -> Result<(), Self::Error> {
        self.cells
            .insert((range.first_row, range.first_col), cell.clone());
        self.merges.push(range);
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), Self::Error> {
        self.widths.insert(col, width);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_never_above_floor() {
        assert_eq!(totals_start_row(0, 20), 20);
        assert_eq!(totals_start_row(3, 20), 20);
        assert_eq!(totals_start_row(0, 0), HEADER_ROW + 2);
        assert_eq!(totals_start_row(30, 20), FIRST_DATA_ROW + 29 + 2);
    }
}
