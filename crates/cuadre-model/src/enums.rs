//! Type-safe enumerations for visit billing attributes.
//!
//! Payment methods and billing categories arrive as raw strings from the
//! data layer. Known values parse into a `Copy` kind; anything else is kept
//! verbatim so that formatting can fall back to a documented default instead
//! of failing the report.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the payment methods the billing system knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Cash,
    /// Cash that was later deposited against an invoice.
    CashInvoiced,
    Transfer,
    Card,
    /// Charged to the patient's (or insurer's) running account.
    AccountStatement,
}

impl PaymentKind {
    pub const ALL: [PaymentKind; 5] = [
        PaymentKind::Cash,
        PaymentKind::CashInvoiced,
        PaymentKind::Transfer,
        PaymentKind::Card,
        PaymentKind::AccountStatement,
    ];

    /// Returns the raw code as stored by the billing system.
    pub fn as_code(&self) -> &'static str {
        match self {
            PaymentKind::Cash => "cash",
            PaymentKind::CashInvoiced => "cash_invoiced",
            PaymentKind::Transfer => "transfer",
            PaymentKind::Card => "card",
            PaymentKind::AccountStatement => "account_statement",
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for PaymentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        PaymentKind::ALL
            .into_iter()
            .find(|kind| kind.as_code() == normalized)
            .ok_or_else(|| format!("Unknown payment method: {s}"))
    }
}

/// Payment method of a visit, as recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Known(PaymentKind),
    /// A value the billing system stored that has no mapping.
    Other(String),
}

impl PaymentMethod {
    pub fn kind(&self) -> Option<PaymentKind> {
        match self {
            PaymentMethod::Known(kind) => Some(*kind),
            PaymentMethod::Other(_) => None,
        }
    }

    pub fn is(&self, kind: PaymentKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn raw(&self) -> &str {
        match self {
            PaymentMethod::Known(kind) => kind.as_code(),
            PaymentMethod::Other(raw) => raw,
        }
    }
}

impl From<PaymentKind> for PaymentMethod {
    fn from(kind: PaymentKind) -> Self {
        PaymentMethod::Known(kind)
    }
}

impl From<&str> for PaymentMethod {
    fn from(raw: &str) -> Self {
        match raw.parse::<PaymentKind>() {
            Ok(kind) => PaymentMethod::Known(kind),
            Err(_) => PaymentMethod::Other(raw.to_string()),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        match raw.parse::<PaymentKind>() {
            Ok(kind) => PaymentMethod::Known(kind),
            Err(_) => PaymentMethod::Other(raw),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Known(kind) => kind.as_code().to_string(),
            PaymentMethod::Other(raw) => raw,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

/// How the price of a visit was set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Regular list price.
    Normal,
    /// Reduced social-program price.
    Social,
    Special,
    /// Price negotiated case by case.
    Custom,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 4] = [
        CategoryKind::Normal,
        CategoryKind::Social,
        CategoryKind::Special,
        CategoryKind::Custom,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            CategoryKind::Normal => "normal",
            CategoryKind::Social => "social",
            CategoryKind::Special => "special",
            CategoryKind::Custom => "custom",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        CategoryKind::ALL
            .into_iter()
            .find(|kind| kind.as_code() == normalized)
            .ok_or_else(|| format!("Unknown billing category: {s}"))
    }
}

/// Billing category of a visit, as recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillingCategory {
    Known(CategoryKind),
    Other(String),
}

impl BillingCategory {
    pub fn kind(&self) -> Option<CategoryKind> {
        match self {
            BillingCategory::Known(kind) => Some(*kind),
            BillingCategory::Other(_) => None,
        }
    }

    pub fn is(&self, kind: CategoryKind) -> bool {
        self.kind() == Some(kind)
    }
}

impl Default for BillingCategory {
    fn default() -> Self {
        BillingCategory::Known(CategoryKind::Normal)
    }
}

impl From<CategoryKind> for BillingCategory {
    fn from(kind: CategoryKind) -> Self {
        BillingCategory::Known(kind)
    }
}

impl From<&str> for BillingCategory {
    fn from(raw: &str) -> Self {
        match raw.parse::<CategoryKind>() {
            Ok(kind) => BillingCategory::Known(kind),
            Err(_) => BillingCategory::Other(raw.to_string()),
        }
    }
}

impl From<String> for BillingCategory {
    fn from(raw: String) -> Self {
        match raw.parse::<CategoryKind>() {
            Ok(kind) => BillingCategory::Known(kind),
            Err(_) => BillingCategory::Other(raw),
        }
    }
}

impl From<BillingCategory> for String {
    fn from(category: BillingCategory) -> Self {
        match category {
            BillingCategory::Known(kind) => kind.as_code().to_string(),
            BillingCategory::Other(raw) => raw,
        }
    }
}

/// Unit of an explicitly recorded patient age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeUnit {
    #[serde(alias = "dias", alias = "días", alias = "day")]
    Days,
    #[serde(alias = "meses", alias = "month")]
    Months,
    #[serde(alias = "años", alias = "anos", alias = "year")]
    Years,
}

impl AgeUnit {
    /// Returns the label printed after the age value.
    pub fn label(&self) -> &'static str {
        match self {
            AgeUnit::Days => "días",
            AgeUnit::Months => "meses",
            AgeUnit::Years => "años",
        }
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
