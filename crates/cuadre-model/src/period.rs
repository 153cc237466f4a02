//! Reporting periods.
//!
//! A period is a closed range of calendar dates. Dates are plain
//! `(year, month, day)` values; no time-of-day is ever involved.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Spanish month names as printed in file names and titles.
pub const MONTH_NAMES: [&str; 12] = [
    "ENERO",
    "FEBRERO",
    "MARZO",
    "ABRIL",
    "MAYO",
    "JUNIO",
    "JULIO",
    "AGOSTO",
    "SEPTIEMBRE",
    "OCTUBRE",
    "NOVIEMBRE",
    "DICIEMBRE",
];

/// Last day of the first fortnight.
pub const FIRST_FORTNIGHT_END: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FortnightHalf {
    /// Days 1 to 15.
    First,
    /// Day 16 to the end of the month.
    Second,
}

impl FortnightHalf {
    pub fn number(&self) -> u8 {
        match self {
            FortnightHalf::First => 1,
            FortnightHalf::Second => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(FortnightHalf::First),
            2 => Some(FortnightHalf::Second),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodSpan {
    Month,
    Fortnight(FortnightHalf),
}

/// A validated reporting period within one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReportPeriod {
    span: PeriodSpan,
    first: NaiveDate,
    last: NaiveDate,
}

impl ReportPeriod {
    /// Whole calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let (first, last) = month_bounds(year, month)?;
        Ok(Self {
            span: PeriodSpan::Month,
            first,
            last,
        })
    }

    /// One half of a calendar month.
    pub fn fortnight(year: i32, month: u32, half: FortnightHalf) -> Result<Self> {
        let (month_first, month_last) = month_bounds(year, month)?;
        let split = month_first
            .with_day(FIRST_FORTNIGHT_END)
            .ok_or(ReportError::InvalidPeriod {
                year,
                month,
                reason: "month too short to split",
            })?;
        let (first, last) = match half {
            FortnightHalf::First => (month_first, split),
            FortnightHalf::Second => {
                let start = split.succ_opt().ok_or(ReportError::InvalidPeriod {
                    year,
                    month,
                    reason: "date out of range",
                })?;
                (start, month_last)
            }
        };
        Ok(Self {
            span: PeriodSpan::Fortnight(half),
            first,
            last,
        })
    }

    pub fn span(&self) -> PeriodSpan {
        self.span
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month_number(&self) -> u32 {
        self.first.month()
    }

    /// Spanish upper-case month name, e.g. `FEBRERO`.
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.first.month0() as usize]
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// Every calendar day of the period, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first.iter_days().take_while(|day| *day <= self.last).collect()
    }
}

fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(ReportError::InvalidPeriod {
            year,
            month,
            reason: "month must be between 1 and 12",
        });
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ReportError::InvalidPeriod {
        year,
        month,
        reason: "date out of range",
    })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(ReportError::InvalidPeriod {
            year,
            month,
            reason: "date out of range",
        })?;
    Ok((first, last))
}
