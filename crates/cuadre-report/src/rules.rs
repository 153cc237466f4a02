//! Business lookup tables used to classify a visit.
//!
//! Each mapping is a plain table so new categories only need a new entry.
//! `cash_invoiced` and `transfer` both land in the DEPOSITADO bucket: the
//! center reconciles them against the same bank deposits.

use cuadre_model::{BillingCategory, CategoryKind, PaymentKind, PaymentMethod, VisitRecord};

/// Totals bucket a payment method contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentBucket {
    Cash,
    Deposited,
    Card,
    AccountStatement,
}

impl PaymentBucket {
    pub const ALL: [PaymentBucket; 4] = [
        PaymentBucket::Cash,
        PaymentBucket::Deposited,
        PaymentBucket::Card,
        PaymentBucket::AccountStatement,
    ];

    /// Label used both for the row's payment cell and the totals block.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentBucket::Cash => "EFECTIVO",
            PaymentBucket::Deposited => "DEPOSITADO",
            PaymentBucket::Card => "TARJETA",
            PaymentBucket::AccountStatement => "ESTADO DE CUENTA",
        }
    }
}

pub const PAYMENT_BUCKETS: [(PaymentKind, PaymentBucket); 5] = [
    (PaymentKind::Cash, PaymentBucket::Cash),
    (PaymentKind::CashInvoiced, PaymentBucket::Deposited),
    (PaymentKind::Transfer, PaymentBucket::Deposited),
    (PaymentKind::Card, PaymentBucket::Card),
    (PaymentKind::AccountStatement, PaymentBucket::AccountStatement),
];

pub fn payment_bucket(method: &PaymentMethod) -> Option<PaymentBucket> {
    let kind = method.kind()?;
    PAYMENT_BUCKETS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, bucket)| *bucket)
}

/// Payment label for a row; unmapped methods print their raw value.
pub fn payment_label(method: &PaymentMethod) -> String {
    match payment_bucket(method) {
        Some(bucket) => bucket.label().to_string(),
        None => method.raw().to_uppercase(),
    }
}

pub const CATEGORY_CODES: [(CategoryKind, &str); 4] = [
    (CategoryKind::Normal, "P"),
    (CategoryKind::Social, "H"),
    (CategoryKind::Special, "PE"),
    (CategoryKind::Custom, "PP"),
];

pub const DEFAULT_CATEGORY_CODE: &str = "P";

pub fn category_code(category: &BillingCategory) -> &'static str {
    category
        .kind()
        .and_then(|kind| {
            CATEGORY_CODES
                .iter()
                .find(|(candidate, _)| *candidate == kind)
                .map(|(_, code)| *code)
        })
        .unwrap_or(DEFAULT_CATEGORY_CODE)
}

pub const NO_DOCTOR_INFO_LABEL: &str = "SIN INFORMACIÓN";
pub const FALLBACK_DOCTOR_LABEL: &str = "TRATANTE";

/// Where a doctor name can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorSource {
    /// The visit is flagged as having no doctor information.
    NoInformation,
    Attending,
    Recommended,
    Fallback,
}

/// Sources tried in order; the first one that yields a name wins.
pub const DOCTOR_ATTRIBUTION: [DoctorSource; 4] = [
    DoctorSource::NoInformation,
    DoctorSource::Attending,
    DoctorSource::Recommended,
    DoctorSource::Fallback,
];

impl DoctorSource {
    pub fn resolve(self, visit: &VisitRecord) -> Option<&str> {
        match self {
            DoctorSource::NoInformation => visit.no_doctor_info.then_some(NO_DOCTOR_INFO_LABEL),
            DoctorSource::Attending => non_blank(visit.attending_doctor.as_deref()),
            DoctorSource::Recommended => non_blank(visit.recommended_doctor.as_deref()),
            DoctorSource::Fallback => Some(FALLBACK_DOCTOR_LABEL),
        }
    }
}

/// Upper-cased doctor name shown on the row.
pub fn attribute_doctor(visit: &VisitRecord) -> String {
    DOCTOR_ATTRIBUTION
        .iter()
        .find_map(|source| source.resolve(visit))
        .unwrap_or(FALLBACK_DOCTOR_LABEL)
        .to_uppercase()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuadre_model::{Patient, PatientAge};

    fn visit_with(flag: bool, attending: Option<&str>, recommended: Option<&str>) -> VisitRecord {
        VisitRecord {
            date: "2024-03-04".parse().unwrap(),
            patient: Patient {
                name: "PACIENTE".to_string(),
                age: PatientAge::Years(30),
            },
            attending_doctor: attending.map(str::to_string),
            recommended_doctor: recommended.map(str::to_string),
            no_doctor_info: flag,
            invoice_number: None,
            billing_category: BillingCategory::default(),
            payment_method: PaymentMethod::from("cash"),
            line_items: Vec::new(),
        }
    }

    #[test]
    fn doctor_attribution_order() {
        let cases = [
            (true, Some("Dr. A"), Some("Dr. R"), "SIN INFORMACIÓN"),
            (false, Some("Dr. A"), Some("Dr. R"), "DR. A"),
            (false, None, Some("Dr. R"), "DR. R"),
            (false, Some("   "), Some("Dr. R"), "DR. R"),
            (false, None, Some(""), "TRATANTE"),
            (false, None, None, "TRATANTE"),
        ];
        for (flag, attending, recommended, expected) in cases {
            let visit = visit_with(flag, attending, recommended);
            assert_eq!(
                attribute_doctor(&visit),
                expected,
                "flag={flag} attending={attending:?} recommended={recommended:?}"
            );
        }
    }

    #[test]
    fn every_known_method_has_a_bucket() {
        for kind in PaymentKind::ALL {
            assert!(payment_bucket(&PaymentMethod::Known(kind)).is_some(), "{kind}");
        }
    }

    #[test]
    fn deposited_collapses_two_methods() {
        assert_eq!(payment_label(&PaymentKind::CashInvoiced.into()), "DEPOSITADO");
        assert_eq!(payment_label(&PaymentKind::Transfer.into()), "DEPOSITADO");
    }

    #[test]
    fn unknown_method_prints_raw_upper() {
        assert_eq!(payment_label(&PaymentMethod::from("cheque")), "CHEQUE");
        assert_eq!(payment_bucket(&PaymentMethod::from("cheque")), None);
    }

    #[test]
    fn category_codes() {
        assert_eq!(category_code(&CategoryKind::Normal.into()), "P");
        assert_eq!(category_code(&CategoryKind::Social.into()), "H");
        assert_eq!(category_code(&CategoryKind::Special.into()), "PE");
        assert_eq!(category_code(&CategoryKind::Custom.into()), "PP");
        assert_eq!(category_code(&BillingCategory::from("convenio")), "P");
    }
}
