//! Workbook rendering on top of `rust_xlsxwriter`.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::{debug, info};

use cuadre_model::ReportOptions;
use cuadre_report::{Cell, CellRange, CellStyle, CellValue, ReportWorkbook, SheetSink, emit_sheet};

use crate::error::{ExportError, Result};

/// Two-decimal currency display.
pub const CURRENCY_FORMAT: &str = "#,##0.00";

const HEADER_FILL: u32 = 0xD9E1F2;
const TOTALS_FILL: u32 = 0xE2EFDA;

/// One `Format` per cell style.
#[derive(Debug, Clone)]
pub struct SheetFormats {
    title: Format,
    subtitle: Format,
    header: Format,
    text: Format,
    flagged: Format,
    amount: Format,
    total_label: Format,
    total_amount: Format,
}

impl Default for SheetFormats {
    fn default() -> Self {
        let title = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_align(FormatAlign::Center);

        let subtitle = Format::new().set_bold().set_align(FormatAlign::Center);

        let header = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_text_wrap()
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_border(FormatBorder::Thin);

        let text = Format::new().set_border(FormatBorder::Thin);

        let flagged = Format::new()
            .set_font_color(Color::Red)
            .set_border(FormatBorder::Thin);

        let amount = Format::new()
            .set_num_format(CURRENCY_FORMAT)
            .set_border(FormatBorder::Thin);

        let total_label = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(TOTALS_FILL))
            .set_border(FormatBorder::Thin);

        let total_amount = Format::new()
            .set_bold()
            .set_num_format(CURRENCY_FORMAT)
            .set_background_color(Color::RGB(TOTALS_FILL))
            .set_border(FormatBorder::Thin);

        Self {
            title,
            subtitle,
            header,
            text,
            flagged,
            amount,
            total_label,
            total_amount,
        }
    }
}

impl SheetFormats {
    pub fn for_style(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Title => &self.title,
            CellStyle::Subtitle => &self.subtitle,
            CellStyle::Header => &self.header,
            CellStyle::Text => &self.text,
            CellStyle::Flagged => &self.flagged,
            CellStyle::Amount => &self.amount,
            CellStyle::TotalLabel => &self.total_label,
            CellStyle::TotalAmount => &self.total_amount,
        }
    }
}

/// [`SheetSink`] writing straight into a worksheet.
pub struct XlsxSheet<'a> {
    worksheet: &'a mut Worksheet,
    formats: &'a SheetFormats,
}

impl<'a> XlsxSheet<'a> {
    pub fn new(worksheet: &'a mut Worksheet, formats: &'a SheetFormats) -> Self {
        Self { worksheet, formats }
    }
}

impl SheetSink for XlsxSheet<'_> {
    type Error = ExportError;

    fn write_cell(&mut self, row: u32, col: u16, cell: &Cell) -> Result<()> {
        let format = self.formats.for_style(cell.style);
        match &cell.value {
            CellValue::Text(text) => {
                self.worksheet
                    .write_string_with_format(row, col, text, format)?;
            }
            CellValue::Amount(amount) => {
                self.worksheet
                    .write_number_with_format(row, col, to_number(*amount)?, format)?;
            }
            CellValue::Empty => {
                self.worksheet.write_blank(row, col, format)?;
            }
        }
        Ok(())
    }

    fn merge_range(&mut self, range: CellRange, cell: &Cell) -> Result<()> {
        let text = cell.value.as_text().unwrap_or_default();
        self.worksheet.merge_range(
            range.first_row,
            range.first_col,
            range.last_row,
            range.last_col,
            text,
            self.formats.for_style(cell.style),
        )?;
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        self.worksheet.set_column_width(col, width)?;
        Ok(())
    }
}

fn to_number(amount: Decimal) -> Result<f64> {
    amount
        .to_f64()
        .ok_or(ExportError::AmountOutOfRange { amount })
}

/// Render every sheet of `report` and serialize the workbook to bytes.
///
/// # Errors
///
/// Returns [`ExportError::EmptyWorkbook`] when `report` has no sheets,
/// otherwise the first writer error; no partial output is produced.
pub fn render_workbook(report: &ReportWorkbook, options: &ReportOptions) -> Result<Vec<u8>> {
    if report.sheets.is_empty() {
        return Err(ExportError::EmptyWorkbook {
            file_name: report.file_name.clone(),
        });
    }
    let formats = SheetFormats::default();
    let mut workbook = Workbook::new();
    for sheet in &report.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        let mut sink = XlsxSheet::new(worksheet, &formats);
        emit_sheet(sheet, &report.schema, options, &mut sink)?;
        debug!(sheet = %sheet.name, rows = sheet.rows.len(), "sheet rendered");
    }
    Ok(workbook.save_to_buffer()?)
}

/// Render `report` and write it as `<output_dir>/<file name>`.
///
/// The file is only created once the whole workbook rendered successfully.
///
/// # Errors
///
/// Fails on any writer error or if the output directory or file cannot be
/// written.
pub fn write_workbook(
    report: &ReportWorkbook,
    options: &ReportOptions,
    output_dir: &Path,
) -> Result<PathBuf> {
    let bytes = render_workbook(report, options)?;
    fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(&report.file_name);
    fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        sheets = report.sheets.len(),
        bytes = bytes.len(),
        "workbook written"
    );
    Ok(path)
}
