//! Partitioning of visit records into report units.
//!
//! Grouping compares calendar dates directly; there is no timestamp and so
//! no timezone that could shift a visit into a neighbouring day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use cuadre_model::{ReportPeriod, VisitRecord};

use crate::rules::attribute_doctor;

/// One sheet's worth of visits, keyed by day or by doctor. Visits keep their
/// input order.
#[derive(Debug, Clone)]
pub struct ReportUnit<'a, K> {
    pub key: K,
    pub visits: Vec<&'a VisitRecord>,
}

impl<K> ReportUnit<'_, K> {
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// One unit per calendar day that has visits, ascending.
///
/// When no visit falls inside `period`, one empty unit per day of the period
/// is produced instead so the workbook still has a full set of dated sheets.
pub fn group_by_day<'a>(
    records: &'a [VisitRecord],
    period: &ReportPeriod,
) -> Vec<ReportUnit<'a, NaiveDate>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&'a VisitRecord>> = BTreeMap::new();
    for visit in within_period(records, period) {
        groups.entry(visit.date).or_default().push(visit);
    }
    if groups.is_empty() {
        return period
            .days()
            .into_iter()
            .map(|day| ReportUnit {
                key: day,
                visits: Vec::new(),
            })
            .collect();
    }
    groups
        .into_iter()
        .map(|(key, visits)| ReportUnit { key, visits })
        .collect()
}

/// One unit per doctor present in the records, ordered by name.
pub fn group_by_doctor<'a>(
    records: &'a [VisitRecord],
    period: &ReportPeriod,
) -> Vec<ReportUnit<'a, String>> {
    let mut groups: BTreeMap<String, Vec<&'a VisitRecord>> = BTreeMap::new();
    for visit in within_period(records, period) {
        groups.entry(doctor_group_name(visit)).or_default().push(visit);
    }
    groups
        .into_iter()
        .map(|(key, visits)| ReportUnit { key, visits })
        .collect()
}

/// Attending doctor's display name, or the attribution fallback when the
/// visit has none.
pub fn doctor_group_name(visit: &VisitRecord) -> String {
    match visit.attending_doctor.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_uppercase(),
        _ => attribute_doctor(visit),
    }
}

fn within_period<'a>(
    records: &'a [VisitRecord],
    period: &ReportPeriod,
) -> impl Iterator<Item = &'a VisitRecord> {
    let period = *period;
    let discarded = records
        .iter()
        .filter(|visit| !period.contains(visit.date))
        .count();
    if discarded > 0 {
        warn!(
            discarded,
            first_day = %period.first_day(),
            last_day = %period.last_day(),
            "discarding visits outside the report period"
        );
    }
    records
        .iter()
        .filter(move |visit| period.contains(visit.date))
}
