//! JSON files standing in for the billing database.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use cuadre_model::{ReportError, ReportPeriod, Result, StudyCatalogEntry, VisitRecord};
use cuadre_report::ReportSource;

use crate::logging::redact_value;

/// [`ReportSource`] reading a catalog file and a visits file.
///
/// Files are read on every fetch, like a query against the live database.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    catalog_path: PathBuf,
    visits_path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(catalog_path: impl Into<PathBuf>, visits_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            visits_path: Some(visits_path.into()),
        }
    }

    /// Source without visits, for catalog-only commands.
    pub fn catalog_only(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            visits_path: None,
        }
    }
}

impl ReportSource for JsonFileSource {
    fn fetch_catalog(&self) -> Result<Vec<StudyCatalogEntry>> {
        let entries: Vec<StudyCatalogEntry> =
            read_json(&self.catalog_path).map_err(ReportError::CatalogUnavailable)?;
        debug!(
            path = %self.catalog_path.display(),
            entries = entries.len(),
            "catalog loaded"
        );
        Ok(entries)
    }

    /// Visits dated within `period`, in file order.
    fn fetch_visits(&self, period: &ReportPeriod) -> Result<Vec<VisitRecord>> {
        let Some(path) = &self.visits_path else {
            return Ok(Vec::new());
        };
        let all: Vec<VisitRecord> = read_json(path).map_err(ReportError::RecordsUnavailable)?;
        let total = all.len();
        let visits: Vec<VisitRecord> = all
            .into_iter()
            .filter(|visit| period.contains(visit.date))
            .collect();
        for visit in &visits {
            trace!(
                date = %visit.date,
                patient = redact_value(&visit.patient.name),
                items = visit.line_items.len(),
                "visit fetched"
            );
        }
        debug!(
            path = %path.display(),
            total,
            in_period = visits.len(),
            "visits loaded"
        );
        Ok(visits)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> std::result::Result<T, String> {
    let text =
        fs::read_to_string(path).map_err(|error| format!("{}: {error}", path.display()))?;
    serde_json::from_str(&text).map_err(|error| format!("{}: {error}", path.display()))
}
