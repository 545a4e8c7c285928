use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculator::{compute_net, series_over_time, InvestmentInput, SeriesPoint, YieldResult};
use crate::error::CalculatorError;

/// A labelled simulation: its input and computed result
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub label: String,
    pub input: InvestmentInput,
    pub result: YieldResult,
}

impl Scenario {
    pub fn simulate(label: impl Into<String>, input: InvestmentInput) -> Result<Self, CalculatorError> {
        let result = compute_net(&input)?;
        Ok(Self {
            label: label.into(),
            input,
            result,
        })
    }

    /// Net value sampled every `step_days`, collected for plotting
    pub fn net_series(&self, step_days: u32) -> Result<Vec<SeriesPoint>, CalculatorError> {
        series_over_time(&self.input, step_days)?.iter().collect()
    }
}

/// Two scenarios side by side
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub first: Scenario,
    pub second: Scenario,
}

impl Comparison {
    pub fn new(first: Scenario, second: Scenario) -> Self {
        Self { first, second }
    }

    /// Scenario with the higher annualized net return; ties go to the first.
    ///
    /// Annualized return is the yardstick so different terms compare fairly.
    pub fn best(&self) -> &Scenario {
        if self.second.result.annualized_net_return_pct
            > self.first.result.annualized_net_return_pct
        {
            &self.second
        } else {
            &self.first
        }
    }

    /// Annualized return gap in percentage points (best minus other)
    pub fn advantage_pct(&self) -> Decimal {
        (self.first.result.annualized_net_return_pct
            - self.second.result.annualized_net_return_pct)
            .abs()
    }

    pub fn scenarios(&self) -> [&Scenario; 2] {
        [&self.first, &self.second]
    }
}
