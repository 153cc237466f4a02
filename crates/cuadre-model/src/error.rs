use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The study catalog could not be retrieved; no sheet can be produced.
    #[error("study catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("visit records unavailable: {0}")]
    RecordsUnavailable(String),
    #[error("invalid report period {year}-{month:02}: {reason}")]
    InvalidPeriod {
        year: i32,
        month: u32,
        reason: &'static str,
    },
    /// A sum of prices left the representable decimal range.
    #[error("amount overflow in {context}")]
    AmountOverflow { context: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
