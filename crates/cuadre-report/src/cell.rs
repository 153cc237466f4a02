//! Cell values and display conventions shared by the emitter and its sinks.

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    /// Currency amount, displayed with two decimals.
    Amount(Decimal),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn amount_or_empty(value: Option<Decimal>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Amount)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            CellValue::Amount(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// Display convention of a cell. Sinks decide what each style looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Title,
    Subtitle,
    Header,
    Text,
    /// Text of a visit on a non-business day (rendered in red).
    Flagged,
    Amount,
    TotalLabel,
    TotalAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn new(value: CellValue, style: CellStyle) -> Self {
        Self { value, style }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(CellValue::text(value), CellStyle::Text)
    }

    pub fn amount(value: Option<Decimal>) -> Self {
        Self::new(CellValue::amount_or_empty(value), CellStyle::Amount)
    }
}
