//! Error types for XLSX export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when rendering or saving a workbook.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The XLSX writer rejected a value, a sheet name or the layout.
    #[error("xlsx writer error: {0}")]
    Writer(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report has no sheets; an XLSX file needs at least one.
    #[error("{file_name} has no sheets to write")]
    EmptyWorkbook { file_name: String },

    /// An amount does not fit the spreadsheet's number type.
    #[error("amount {amount} cannot be stored as a spreadsheet number")]
    AmountOutOfRange { amount: rust_decimal::Decimal },
}

pub type Result<T> = std::result::Result<T, ExportError>;
