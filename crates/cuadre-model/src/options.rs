//! Configuration options for report generation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_REPORT_LABEL: &str = "Reporte_Mensual";
pub const DEFAULT_CENTER_TITLE: &str = "CENTRO DE DIAGNÓSTICO";

/// Zero-based row below which the totals block is never placed.
///
/// Keeps totals in the same spot on sheets with only a few visits.
pub const DEFAULT_MIN_TOTALS_ROW: u32 = 20;

/// Options controlling report layout and naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Leading component of the monthly report file name.
    pub report_label: String,
    /// Title printed in the first row of every sheet.
    pub center_title: String,
    pub min_totals_row: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            report_label: DEFAULT_REPORT_LABEL.to_string(),
            center_title: DEFAULT_CENTER_TITLE.to_string(),
            min_totals_row: DEFAULT_MIN_TOTALS_ROW,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_report_label(mut self, label: impl Into<String>) -> Self {
        self.report_label = label.into();
        self
    }

    #[must_use]
    pub fn with_center_title(mut self, title: impl Into<String>) -> Self {
        self.center_title = title.into();
        self
    }

    #[must_use]
    pub fn with_min_totals_row(mut self, row: u32) -> Self {
        self.min_totals_row = row;
        self
    }
}
