use cuadre_model::{ReportPeriod, Result, StudyCatalogEntry, VisitRecord};

/// Data-access boundary of the report engine.
///
/// Each call is a single request/response. The engine never retries; a
/// source that wants a retry policy applies it inside these methods.
pub trait ReportSource {
    fn fetch_catalog(&self) -> Result<Vec<StudyCatalogEntry>>;

    /// Visits dated within `period`. Records outside it are tolerated and
    /// discarded by the aggregator.
    fn fetch_visits(&self, period: &ReportPeriod) -> Result<Vec<VisitRecord>>;
}

/// In-memory source over already loaded data.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub catalog: Vec<StudyCatalogEntry>,
    pub visits: Vec<VisitRecord>,
}

impl StaticSource {
    pub fn new(catalog: Vec<StudyCatalogEntry>, visits: Vec<VisitRecord>) -> Self {
        Self { catalog, visits }
    }
}

impl ReportSource for StaticSource {
    fn fetch_catalog(&self) -> Result<Vec<StudyCatalogEntry>> {
        Ok(self.catalog.clone())
    }

    fn fetch_visits(&self, _period: &ReportPeriod) -> Result<Vec<VisitRecord>> {
        Ok(self.visits.clone())
    }
}
