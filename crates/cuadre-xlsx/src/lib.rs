//! XLSX output for billing report workbooks.
//!
//! Implements the report engine's [`cuadre_report::SheetSink`] on top of
//! `rust_xlsxwriter`:
//!
//! - text cells upper-cased by the engine, written as strings
//! - amounts written as numbers with a two-decimal currency format
//! - non-business-day study descriptions in red
//! - merged, centred title rows
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use cuadre_model::{ReportOptions, ReportPeriod};
//! use cuadre_report::{StaticSource, monthly_report};
//! use cuadre_xlsx::write_workbook;
//!
//! let source = StaticSource::default();
//! let period = ReportPeriod::month(2024, 2).unwrap();
//! let options = ReportOptions::default();
//! let report = monthly_report(&source, &period, &options).unwrap();
//! let path = write_workbook(&report, &options, Path::new("out")).unwrap();
//! println!("{}", path.display());
//! ```

mod error;
mod writer;

pub use error::{ExportError, Result};
pub use writer::{CURRENCY_FORMAT, SheetFormats, XlsxSheet, render_workbook, write_workbook};
