//! Dynamic column schema derived from the study catalog.
//!
//! The catalog changes between runs, so the schema is rebuilt for every
//! report and never stored.

use std::collections::BTreeSet;

use tracing::debug;

use cuadre_model::{ReportError, Result, StudyCatalogEntry, StudyId};

use crate::source::ReportSource;

/// Ordered dynamic study columns: header labels and price lookup keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSchema {
    entries: Vec<StudyCatalogEntry>,
}

impl ColumnSchema {
    pub fn entries(&self) -> &[StudyCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Zero-based position of the column for `study_id`, if it has one.
    pub fn position(&self, study_id: StudyId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == study_id)
    }
}

/// Build the column schema from a catalog snapshot.
///
/// Duplicated ids keep their first occurrence, reserved entries are dropped,
/// and columns are sorted by display name (case-insensitive, then by id).
pub fn build_column_schema(catalog: &[StudyCatalogEntry]) -> ColumnSchema {
    let mut seen: BTreeSet<StudyId> = BTreeSet::new();
    let mut entries: Vec<StudyCatalogEntry> = catalog
        .iter()
        .filter(|entry| seen.insert(entry.id))
        .filter(|entry| !entry.reserved)
        .cloned()
        .collect();
    entries.sort_by(|a, b| {
        a.name
            .to_uppercase()
            .cmp(&b.name.to_uppercase())
            .then(a.id.cmp(&b.id))
    });
    debug!(
        catalog_entries = catalog.len(),
        columns = entries.len(),
        "column schema built"
    );
    ColumnSchema { entries }
}

/// Fetch the catalog and build the schema.
///
/// # Errors
///
/// Any failure to fetch the catalog is reported as
/// [`ReportError::CatalogUnavailable`]; the report must not continue.
pub fn load_column_schema<S: ReportSource + ?Sized>(source: &S) -> Result<ColumnSchema> {
    let catalog = source.fetch_catalog().map_err(|error| match error {
        ReportError::CatalogUnavailable(_) => error,
        other => ReportError::CatalogUnavailable(other.to_string()),
    })?;
    Ok(build_column_schema(&catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupes_by_id_keeping_first() {
        let catalog = vec![
            StudyCatalogEntry::new(2, "TOMOGRAFIA"),
            StudyCatalogEntry::new(1, "ECOGRAFIA"),
            StudyCatalogEntry::new(2, "ANGIOTOMOGRAFIA"),
        ];
        let schema = build_column_schema(&catalog);
        let labels: Vec<&str> = schema.labels().collect();
        assert_eq!(labels, vec!["ECOGRAFIA", "TOMOGRAFIA"]);
        assert_eq!(schema.position(2), Some(1));
    }

    #[test]
    fn sorts_case_insensitively() {
        let catalog = vec![
            StudyCatalogEntry::new(1, "rayos x"),
            StudyCatalogEntry::new(2, "DENSITOMETRIA"),
            StudyCatalogEntry::new(3, "Mamografia"),
        ];
        let schema = build_column_schema(&catalog);
        let labels: Vec<&str> = schema.labels().collect();
        assert_eq!(labels, vec!["DENSITOMETRIA", "Mamografia", "rayos x"]);
    }
}
