//! Investment term: days, months, or an explicit start/end date range.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum TermSpec {
    Days { days: u32 },
    Months { months: u32 },
    Range { start: NaiveDate, end: NaiveDate },
}

impl TermSpec {
    /// Holding period in calendar days.
    ///
    /// Months are added on the calendar from `start` (31/01 + 1 month = 28/02 or 29/02).
    /// A `Range` ignores `start` and uses its own dates.
    pub fn to_days(&self, start: NaiveDate) -> Result<u32, CalculatorError> {
        match *self {
            TermSpec::Days { days } => Ok(days),
            TermSpec::Months { months } => {
                let end = start
                    .checked_add_months(Months::new(months))
                    .ok_or_else(|| CalculatorError::invalid("term", "is out of range"))?;
                days_between(start, end)
            }
            TermSpec::Range { start, end } => {
                if end <= start {
                    return Err(CalculatorError::invalid(
                        "end date",
                        "must be after the start date",
                    ));
                }
                days_between(start, end)
            }
        }
    }
}

fn days_between(start: NaiveDate, end: NaiveDate) -> Result<u32, CalculatorError> {
    u32::try_from((end - start).num_days())
        .map_err(|_| CalculatorError::invalid("term", "is out of range"))
}

/// Parse a date as YYYY-MM-DD or DD/MM/YYYY
pub fn parse_date(s: &str) -> Result<NaiveDate, CalculatorError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .map_err(|_| {
            CalculatorError::ParseError(format!("Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY", s))
        })
}
