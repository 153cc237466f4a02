use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::StudyId;
use crate::enums::{AgeUnit, BillingCategory, PaymentMethod};
use crate::error::{ReportError, Result};

/// Age of a patient at the time of the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatientAge {
    /// Plain age in years, as most records carry it.
    Years(u32),
    /// Age recorded with an explicit unit (newborns and infants).
    Explicit { value: u32, unit: AgeUnit },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: String,
    pub age: PatientAge,
}

/// One billed sub-study within a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name of the sub-study; `None` when the relation did not resolve.
    #[serde(default)]
    pub sub_study_name: Option<String>,
    pub study_id: StudyId,
    pub price: Decimal,
}

/// One clinical consultation with its billing line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub date: NaiveDate,
    pub patient: Patient,
    #[serde(default)]
    pub attending_doctor: Option<String>,
    #[serde(default)]
    pub recommended_doctor: Option<String>,
    /// Set when the front desk recorded that no doctor information exists.
    #[serde(default)]
    pub no_doctor_info: bool,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub billing_category: BillingCategory,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl VisitRecord {
    /// Sum of every line item price. This is the figure used by all totals.
    ///
    /// # Errors
    ///
    /// [`ReportError::AmountOverflow`] if the sum is not representable.
    pub fn total(&self) -> Result<Decimal> {
        checked_sum(self.line_items.iter().map(|item| item.price))
            .ok_or_else(|| self.overflow())
    }

    /// Sum of line item prices billed against one study, `None` when no item
    /// matches.
    ///
    /// # Errors
    ///
    /// [`ReportError::AmountOverflow`] if the sum is not representable.
    pub fn total_for_study(&self, study_id: StudyId) -> Result<Option<Decimal>> {
        let mut matched = self
            .line_items
            .iter()
            .filter(|item| item.study_id == study_id)
            .peekable();
        if matched.peek().is_none() {
            return Ok(None);
        }
        checked_sum(matched.map(|item| item.price))
            .map(Some)
            .ok_or_else(|| self.overflow())
    }

    fn overflow(&self) -> ReportError {
        let invoice = self.invoice_number.as_deref().unwrap_or("-");
        ReportError::AmountOverflow {
            context: format!("visit of {} (invoice {invoice})", self.date),
        }
    }
}

/// Sum of `amounts`, or `None` if any partial sum overflows.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(amount))
}
