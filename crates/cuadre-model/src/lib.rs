pub mod catalog;
pub mod enums;
pub mod error;
pub mod options;
pub mod period;
pub mod visit;

pub use catalog::{RESERVED_STUDY_NAMES, StudyCatalogEntry, StudyId, is_reserved_study_name};
pub use enums::{AgeUnit, BillingCategory, CategoryKind, PaymentKind, PaymentMethod};
pub use error::{ReportError, Result};
pub use options::ReportOptions;
pub use period::{FortnightHalf, MONTH_NAMES, PeriodSpan, ReportPeriod};
pub use visit::{LineItem, Patient, PatientAge, VisitRecord, checked_sum};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_total_sums_line_items() {
        let visit: VisitRecord = serde_json::from_str(
            r#"{
                "date": "2024-02-10",
                "patient": {"name": "Ana Pérez", "age": 34},
                "payment_method": "card",
                "line_items": [
                    {"sub_study_name": "Rx torax", "study_id": 1, "price": "150.50"},
                    {"study_id": 2, "price": 49.5}
                ]
            }"#,
        )
        .expect("deserialize visit");
        assert_eq!(visit.total().unwrap().to_string(), "200.00");
        assert_eq!(visit.billing_category, BillingCategory::Known(CategoryKind::Normal));
        assert!(visit.total_for_study(3).unwrap().is_none());
    }
}
