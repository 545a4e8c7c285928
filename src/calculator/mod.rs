// Calculator module - gross accrual, IR/IOF, custody fee and net value for CDB/LCI/LCA

pub mod series;
pub mod tax;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalculatorError;

pub use series::{series_over_time, NetValueSeries, SeriesPoint};
pub use tax::{lookup_income_tax_rate, lookup_iof_rate, TaxBracket};

/// Day-count basis for annual rates
pub const DAYS_PER_YEAR: u32 = 365;

/// Fixed-income instrument kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstrumentKind {
    Cdb,
    Lci,
    Lca,
}

impl InstrumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Cdb => "CDB",
            InstrumentKind::Lci => "LCI",
            InstrumentKind::Lca => "LCA",
        }
    }

    /// LCI and LCA are exempt from IR and IOF for individuals
    pub fn is_tax_exempt(&self) -> bool {
        matches!(self, InstrumentKind::Lci | InstrumentKind::Lca)
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstrumentKind {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CDB" => Ok(InstrumentKind::Cdb),
            "LCI" => Ok(InstrumentKind::Lci),
            "LCA" => Ok(InstrumentKind::Lca),
            other => Err(CalculatorError::ParseError(format!(
                "unknown product '{}' (expected CDB, LCI or LCA)",
                other
            ))),
        }
    }
}

/// How the annual rate of an investment is quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RateSpec {
    /// Fixed annual rate ("pré"), in percent
    Prefixed { annual_pct: Decimal },
    /// Percentage of the CDI ("pós"), e.g. 110% of a 13.75% CDI
    PercentOfCdi {
        pct_of_cdi: Decimal,
        cdi_annual_pct: Decimal,
    },
}

impl RateSpec {
    /// Effective annual rate as a fraction (0.10 = 10% a.a.)
    pub fn effective_annual_rate(&self) -> Decimal {
        let hundred = Decimal::ONE_HUNDRED;
        match *self {
            RateSpec::Prefixed { annual_pct } => annual_pct / hundred,
            RateSpec::PercentOfCdi {
                pct_of_cdi,
                cdi_annual_pct,
            } => (pct_of_cdi / hundred) * (cdi_annual_pct / hundred),
        }
    }

    /// Short label: "Pré" or "Pós"
    pub fn kind_label(&self) -> &'static str {
        match self {
            RateSpec::Prefixed { .. } => "Pré",
            RateSpec::PercentOfCdi { .. } => "Pós",
        }
    }

    /// Rate as quoted by the user: annual % or % of CDI
    pub fn quoted_pct(&self) -> Decimal {
        match *self {
            RateSpec::Prefixed { annual_pct } => annual_pct,
            RateSpec::PercentOfCdi { pct_of_cdi, .. } => pct_of_cdi,
        }
    }

    fn validate(&self) -> Result<(), CalculatorError> {
        match *self {
            RateSpec::Prefixed { annual_pct } if annual_pct < Decimal::ZERO => {
                Err(CalculatorError::invalid("rate", "must not be negative"))
            }
            RateSpec::PercentOfCdi { pct_of_cdi, .. } if pct_of_cdi < Decimal::ZERO => Err(
                CalculatorError::invalid("percent of CDI", "must not be negative"),
            ),
            RateSpec::PercentOfCdi { cdi_annual_pct, .. } if cdi_annual_pct < Decimal::ZERO => {
                Err(CalculatorError::invalid("CDI", "must not be negative"))
            }
            _ => Ok(()),
        }
    }
}

/// Parameters of one simulated investment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentInput {
    pub principal: Decimal,
    pub rate: RateSpec,
    pub term_days: u32,
    pub kind: InstrumentKind,
    /// Annual custody fee in percent, pro-rated over the term
    pub custody_fee_pct: Option<Decimal>,
}

impl InvestmentInput {
    pub fn new(principal: Decimal, rate: RateSpec, term_days: u32, kind: InstrumentKind) -> Self {
        Self {
            principal,
            rate,
            term_days,
            kind,
            custody_fee_pct: None,
        }
    }

    pub fn with_custody_fee(mut self, annual_pct: Decimal) -> Self {
        self.custody_fee_pct = Some(annual_pct);
        self
    }

    /// Same investment redeemed after `days` instead of the full term
    pub fn with_term(&self, days: u32) -> Self {
        Self {
            term_days: days,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<(), CalculatorError> {
        if self.principal <= Decimal::ZERO {
            return Err(CalculatorError::invalid(
                "principal",
                "must be greater than zero",
            ));
        }
        if self.term_days == 0 {
            return Err(CalculatorError::invalid("term", "must be at least one day"));
        }
        self.rate.validate()?;
        if matches!(self.custody_fee_pct, Some(fee) if fee < Decimal::ZERO) {
            return Err(CalculatorError::invalid("custody fee", "must not be negative"));
        }
        Ok(())
    }
}

/// Outcome of a single simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YieldResult {
    pub kind: InstrumentKind,
    pub rate: RateSpec,
    pub term_days: u32,
    pub principal: Decimal,
    pub effective_annual_rate: Decimal,
    pub gross_value: Decimal,
    pub gross_gain: Decimal,
    pub income_tax_rate: Decimal,
    pub income_tax: Decimal,
    pub iof_rate: Decimal,
    pub iof: Decimal,
    pub custody_fee: Decimal,
    pub net_value: Decimal,
    /// Net return over the whole term, in percent
    pub net_return_pct: Decimal,
    /// Net return scaled to a 365-day year, in percent
    pub annualized_net_return_pct: Decimal,
}

impl YieldResult {
    /// IR + IOF
    pub fn total_tax(&self) -> Decimal {
        self.income_tax + self.iof
    }
}

fn overflow() -> CalculatorError {
    CalculatorError::invalid("amount", "is too large to compound over this term")
}

/// (1 + rate)^(days / 365), splitting whole years off so integer terms stay exact.
fn accrual_factor(annual_rate: Decimal, days: u32) -> Result<Decimal, CalculatorError> {
    let base = Decimal::ONE + annual_rate;

    let whole_years = days / DAYS_PER_YEAR;
    let remainder = days % DAYS_PER_YEAR;

    let mut factor = base
        .checked_powu(u64::from(whole_years))
        .ok_or_else(overflow)?;
    if remainder > 0 {
        let fraction = Decimal::from(remainder) / Decimal::from(DAYS_PER_YEAR);
        let partial = base.checked_powd(fraction).ok_or_else(overflow)?;
        factor = factor.checked_mul(partial).ok_or_else(overflow)?;
    }
    Ok(factor)
}

/// Gross value at the end of the term (daily compounding, 365-day basis)
pub fn compute_gross_value(input: &InvestmentInput) -> Result<Decimal, CalculatorError> {
    input.validate()?;
    let factor = accrual_factor(input.rate.effective_annual_rate(), input.term_days)?;
    input.principal.checked_mul(factor).ok_or_else(overflow)
}

/// Custody fee pro-rated over the term, charged on the principal
pub fn compute_custody_fee(input: &InvestmentInput) -> Result<Decimal, CalculatorError> {
    let Some(fee_pct) = input.custody_fee_pct else {
        return Ok(Decimal::ZERO);
    };
    let year_fraction = Decimal::from(input.term_days) / Decimal::from(DAYS_PER_YEAR);
    input
        .principal
        .checked_mul(fee_pct / Decimal::ONE_HUNDRED)
        .and_then(|fee| fee.checked_mul(year_fraction))
        .ok_or_else(overflow)
}

/// Annualize a holding-period return (fraction) over `days`
fn annualize(period_return: Decimal, days: u32) -> Result<Decimal, CalculatorError> {
    let growth = Decimal::ONE + period_return;
    if growth <= Decimal::ZERO {
        return Ok(-Decimal::ONE);
    }
    if days == DAYS_PER_YEAR {
        return Ok(period_return);
    }
    let exponent = Decimal::from(DAYS_PER_YEAR) / Decimal::from(days);
    growth
        .checked_powd(exponent)
        .map(|g| g - Decimal::ONE)
        .ok_or_else(|| CalculatorError::invalid("term", "is too short to annualize this return"))
}

/// Net value after IOF, IR and custody fee.
///
/// IR and IOF are both levied on the gross gain, IR at the bracket in effect at
/// full term. Exempt instruments skip both.
pub fn compute_net(input: &InvestmentInput) -> Result<YieldResult, CalculatorError> {
    let gross_value = compute_gross_value(input)?;
    let gross_gain = gross_value - input.principal;
    let days = input.term_days;

    let iof_rate = tax::iof_rate_for(input.kind, days);
    let iof = gross_gain * iof_rate;

    let income_tax_rate = tax::income_tax_rate_for(input.kind, days);
    let income_tax = gross_gain * income_tax_rate;

    let custody_fee = compute_custody_fee(input)?;
    let net_value = gross_value - iof - income_tax - custody_fee;

    let net_return = net_value / input.principal - Decimal::ONE;
    let annualized = annualize(net_return, days)?;

    Ok(YieldResult {
        kind: input.kind,
        rate: input.rate,
        term_days: days,
        principal: input.principal,
        effective_annual_rate: input.rate.effective_annual_rate(),
        gross_value,
        gross_gain,
        income_tax_rate,
        income_tax,
        iof_rate,
        iof,
        custody_fee,
        net_value,
        net_return_pct: net_return.checked_mul(Decimal::ONE_HUNDRED).ok_or_else(overflow)?,
        annualized_net_return_pct: annualized
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(overflow)?,
    })
}
