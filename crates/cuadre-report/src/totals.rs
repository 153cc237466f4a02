use rust_decimal::Decimal;
use tracing::warn;

use cuadre_model::{ReportError, Result, VisitRecord, checked_sum};

use crate::rules::{PaymentBucket, payment_bucket};

pub const TOTAL_GENERATED_LABEL: &str = "TOTAL GENERADO";

/// Payment-method totals of one report unit.
///
/// Visits paid with an unmapped method only count towards `generated`, so
/// `generated >= mapped_sum()` always holds, with equality when every visit
/// uses a mapped method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentTotals {
    pub cash: Decimal,
    pub deposited: Decimal,
    pub card: Decimal,
    pub account_statement: Decimal,
    pub generated: Decimal,
}

impl PaymentTotals {
    /// # Errors
    ///
    /// [`ReportError::AmountOverflow`] if a visit total or a bucket leaves
    /// the decimal range.
    pub fn from_visits<'a>(visits: impl IntoIterator<Item = &'a VisitRecord>) -> Result<Self> {
        let mut totals = Self::default();
        for visit in visits {
            totals.add_visit(visit)?;
        }
        Ok(totals)
    }

    /// # Errors
    ///
    /// [`ReportError::AmountOverflow`]; `self` is left unchanged.
    pub fn add_visit(&mut self, visit: &VisitRecord) -> Result<()> {
        let total = visit.total()?;
        let mut next = *self;
        match payment_bucket(&visit.payment_method) {
            Some(bucket) => add_to(next.bucket_mut(bucket), total, bucket.label())?,
            None => warn!(
                method = %visit.payment_method,
                %total,
                "payment method has no totals bucket"
            ),
        }
        add_to(&mut next.generated, total, TOTAL_GENERATED_LABEL)?;
        *self = next;
        Ok(())
    }

    /// Add every aggregate of `other` into `self`.
    ///
    /// # Errors
    ///
    /// [`ReportError::AmountOverflow`]; `self` is left unchanged.
    pub fn merge(&mut self, other: &PaymentTotals) -> Result<()> {
        let mut next = *self;
        for bucket in PaymentBucket::ALL {
            add_to(next.bucket_mut(bucket), other.bucket(bucket), bucket.label())?;
        }
        add_to(&mut next.generated, other.generated, TOTAL_GENERATED_LABEL)?;
        *self = next;
        Ok(())
    }

    pub fn bucket(&self, bucket: PaymentBucket) -> Decimal {
        match bucket {
            PaymentBucket::Cash => self.cash,
            PaymentBucket::Deposited => self.deposited,
            PaymentBucket::Card => self.card,
            PaymentBucket::AccountStatement => self.account_statement,
        }
    }

    fn bucket_mut(&mut self, bucket: PaymentBucket) -> &mut Decimal {
        match bucket {
            PaymentBucket::Cash => &mut self.cash,
            PaymentBucket::Deposited => &mut self.deposited,
            PaymentBucket::Card => &mut self.card,
            PaymentBucket::AccountStatement => &mut self.account_statement,
        }
    }

    /// Sum of the four payment buckets, `None` if it overflows.
    pub fn mapped_sum(&self) -> Option<Decimal> {
        checked_sum(PaymentBucket::ALL.iter().map(|bucket| self.bucket(*bucket)))
    }

    /// Labelled totals in display order.
    pub fn rows(&self) -> [(&'static str, Decimal); 5] {
        [
            (PaymentBucket::Cash.label(), self.cash),
            (PaymentBucket::Deposited.label(), self.deposited),
            (PaymentBucket::Card.label(), self.card),
            (PaymentBucket::AccountStatement.label(), self.account_statement),
            (TOTAL_GENERATED_LABEL, self.generated),
        ]
    }
}

fn add_to(slot: &mut Decimal, amount: Decimal, label: &str) -> Result<()> {
    *slot = slot
        .checked_add(amount)
        .ok_or_else(|| ReportError::AmountOverflow {
            context: format!("{label} total"),
        })?;
    Ok(())
}
