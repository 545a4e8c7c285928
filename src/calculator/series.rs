//! Net value over time, for charting.
//!
//! A [`NetValueSeries`] is a cheap description of the sampling grid. Every call
//! to [`NetValueSeries::iter`] starts a fresh pass, and each point is computed
//! on demand by redeeming the investment at that day.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{compute_net, InvestmentInput};
use crate::error::CalculatorError;

/// Net value if redeemed on `day`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub day: u32,
    pub net_value: Decimal,
}

#[derive(Debug, Clone)]
pub struct NetValueSeries {
    input: InvestmentInput,
    step_days: u32,
}

/// Build the series for `input`, sampled every `step_days` days.
///
/// Days visited: 0, step, 2*step, ... below the term, then the term itself.
pub fn series_over_time(
    input: &InvestmentInput,
    step_days: u32,
) -> Result<NetValueSeries, CalculatorError> {
    input.validate()?;
    if step_days == 0 {
        return Err(CalculatorError::invalid("step", "must be at least one day"));
    }
    Ok(NetValueSeries {
        input: input.clone(),
        step_days,
    })
}

impl NetValueSeries {
    pub fn iter(&self) -> SeriesIter<'_> {
        SeriesIter {
            series: self,
            next_day: Some(0),
        }
    }

    pub fn term_days(&self) -> u32 {
        self.input.term_days
    }

    /// Number of points a full pass yields, day 0 and the term included
    pub fn point_count(&self) -> usize {
        let term = self.input.term_days;
        let below_term = (term - 1) / self.step_days + 1;
        below_term as usize + 1
    }

    fn point_at(&self, day: u32) -> Result<SeriesPoint, CalculatorError> {
        if day == 0 {
            return Ok(SeriesPoint {
                day,
                net_value: self.input.principal,
            });
        }
        let result = compute_net(&self.input.with_term(day))?;
        Ok(SeriesPoint {
            day,
            net_value: result.net_value,
        })
    }
}

impl<'a> IntoIterator for &'a NetValueSeries {
    type Item = Result<SeriesPoint, CalculatorError>;
    type IntoIter = SeriesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SeriesIter<'a> {
    series: &'a NetValueSeries,
    next_day: Option<u32>,
}

impl Iterator for SeriesIter<'_> {
    type Item = Result<SeriesPoint, CalculatorError>;

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.next_day?;
        let term = self.series.input.term_days;

        self.next_day = if day >= term {
            None
        } else {
            Some(day.saturating_add(self.series.step_days).min(term))
        };

        Some(self.series.point_at(day))
    }
}
