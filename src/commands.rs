//! Command model shared by the CLI runner and the dispatcher
//!
//! Clap arguments and `key=value` scenario specs are both reduced to a
//! [`RawScenario`] of strings, then resolved into typed requests here so
//! every entry point validates input the same way.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::PathBuf;

use rendafixa::calculator::{InstrumentKind, InvestmentInput, RateSpec};
use rendafixa::error::CalculatorError;
use rendafixa::term::{parse_date, TermSpec};
use rendafixa::utils::parse_decimal_br;

/// Parsed command ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Simulate {
        scenario: ScenarioRequest,
        output: OutputOptions,
    },
    Compare {
        first: ScenarioRequest,
        second: ScenarioRequest,
        output: OutputOptions,
    },
    Cdi,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub chart: Option<PathBuf>,
    pub export: Option<PathBuf>,
    pub step_days: Option<u32>,
}

/// Rate as requested; the CDI may still need to be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRequest {
    Prefixed {
        annual_pct: Decimal,
    },
    PercentOfCdi {
        pct_of_cdi: Decimal,
        cdi_annual_pct: Option<Decimal>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRequest {
    pub label: String,
    pub principal: Decimal,
    pub kind: InstrumentKind,
    pub rate: RateRequest,
    pub term: TermSpec,
    pub start: NaiveDate,
    pub custody_fee_pct: Option<Decimal>,
}

impl ScenarioRequest {
    /// True when the rate is a percentage of a CDI that was not supplied
    pub fn needs_cdi(&self) -> bool {
        matches!(
            self.rate,
            RateRequest::PercentOfCdi {
                cdi_annual_pct: None,
                ..
            }
        )
    }

    /// Resolve into calculator input, using `fetched_cdi` when no CDI was given
    pub fn to_input(
        &self,
        fetched_cdi: Option<Decimal>,
        default_fee_pct: Option<Decimal>,
    ) -> Result<InvestmentInput, CalculatorError> {
        let rate = match self.rate {
            RateRequest::Prefixed { annual_pct } => RateSpec::Prefixed { annual_pct },
            RateRequest::PercentOfCdi {
                pct_of_cdi,
                cdi_annual_pct,
            } => {
                let cdi = cdi_annual_pct.or(fetched_cdi).ok_or_else(|| {
                    CalculatorError::RateUnavailable(
                        "no CDI rate available; pass --cdi <pct>".to_string(),
                    )
                })?;
                RateSpec::PercentOfCdi {
                    pct_of_cdi,
                    cdi_annual_pct: cdi,
                }
            }
        };

        let term_days = self.term.to_days(self.start)?;
        let input = InvestmentInput {
            principal: self.principal,
            rate,
            term_days,
            kind: self.kind,
            custody_fee_pct: self.custody_fee_pct.or(default_fee_pct),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Error type for command parsing
#[derive(Debug, Clone)]
pub struct CommandParseError {
    pub message: String,
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandParseError {}

impl From<CalculatorError> for CommandParseError {
    fn from(e: CalculatorError) -> Self {
        CommandParseError {
            message: e.to_string(),
        }
    }
}

fn parse_error(message: impl Into<String>) -> CommandParseError {
    CommandParseError {
        message: message.into(),
    }
}

/// Unvalidated scenario fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScenario {
    pub principal: Option<String>,
    pub product: Option<String>,
    pub rate: Option<String>,
    pub pct_cdi: Option<String>,
    pub cdi: Option<String>,
    pub days: Option<String>,
    pub months: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub fee: Option<String>,
}

impl RawScenario {
    /// Parse `key=value` pairs separated by spaces (`product=CDB rate=12,5 days=365`).
    /// A spec without spaces may separate pairs with commas instead
    /// (`product=CDB,rate=12.5,days=365`).
    pub fn parse_spec(spec: &str) -> Result<Self, CommandParseError> {
        let mut raw = RawScenario::default();
        let pairs: Vec<&str> = if spec.contains('=') && spec.split_whitespace().count() > 1 {
            spec.split_whitespace().collect()
        } else {
            spec.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
        };

        for pair in pairs {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| parse_error(format!("expected key=value, got '{}'", pair)))?;
            let value = Some(value.trim().to_string());
            let slot = match key.trim().to_ascii_lowercase().as_str() {
                "principal" | "valor" => &mut raw.principal,
                "product" | "produto" => &mut raw.product,
                "rate" | "taxa" => &mut raw.rate,
                "pct-cdi" | "pct_cdi" => &mut raw.pct_cdi,
                "cdi" => &mut raw.cdi,
                "days" | "dias" => &mut raw.days,
                "months" | "meses" => &mut raw.months,
                "start" | "inicio" => &mut raw.start,
                "end" | "fim" => &mut raw.end,
                "fee" | "custody-fee" | "custodia" => &mut raw.fee,
                other => return Err(parse_error(format!("unknown scenario key '{}'", other))),
            };
            if slot.is_some() {
                return Err(parse_error(format!("duplicate scenario key '{}'", key.trim())));
            }
            *slot = value;
        }
        Ok(raw)
    }

    /// Fill fields left empty from `shared`
    pub fn with_defaults(mut self, shared: &RawScenario) -> Self {
        fn fill(slot: &mut Option<String>, fallback: &Option<String>) {
            if slot.is_none() {
                slot.clone_from(fallback);
            }
        }
        fill(&mut self.principal, &shared.principal);
        fill(&mut self.product, &shared.product);
        fill(&mut self.cdi, &shared.cdi);
        fill(&mut self.start, &shared.start);
        fill(&mut self.fee, &shared.fee);
        self
    }

    pub fn resolve(&self, label: &str, today: NaiveDate) -> Result<ScenarioRequest, CommandParseError> {
        let decimal = |field: &str, value: &Option<String>| -> Result<Option<Decimal>, CommandParseError> {
            value
                .as_deref()
                .map(|v| parse_decimal_br(v).map_err(|e| parse_error(format!("{}: {}", field, e))))
                .transpose()
        };
        let integer = |field: &str, value: &Option<String>| -> Result<Option<u32>, CommandParseError> {
            value
                .as_deref()
                .map(|v| {
                    v.trim()
                        .parse::<u32>()
                        .map_err(|_| parse_error(format!("{} must be a whole number, got '{}'", field, v)))
                })
                .transpose()
        };

        let principal = decimal("principal", &self.principal)?
            .ok_or_else(|| parse_error("principal is required"))?;
        let kind: InstrumentKind = self.product.as_deref().unwrap_or("CDB").parse()?;

        let rate = match (decimal("rate", &self.rate)?, decimal("pct-cdi", &self.pct_cdi)?) {
            (Some(annual_pct), None) => RateRequest::Prefixed { annual_pct },
            (None, Some(pct_of_cdi)) => RateRequest::PercentOfCdi {
                pct_of_cdi,
                cdi_annual_pct: decimal("cdi", &self.cdi)?,
            },
            (Some(_), Some(_)) => return Err(parse_error("give either rate or pct-cdi, not both")),
            (None, None) => return Err(parse_error("a rate is required: rate=<pct> or pct-cdi=<pct>")),
        };

        let start = match self.start.as_deref() {
            Some(s) => parse_date(s)?,
            None => today,
        };
        let end = self.end.as_deref().map(parse_date).transpose()?;

        let term = match (integer("days", &self.days)?, integer("months", &self.months)?, end) {
            (Some(days), None, None) => TermSpec::Days { days },
            (None, Some(months), None) => TermSpec::Months { months },
            (None, None, Some(end)) => TermSpec::Range { start, end },
            (None, None, None) => {
                return Err(parse_error("a term is required: days, months or an end date"))
            }
            _ => return Err(parse_error("give only one of days, months or end date")),
        };

        Ok(ScenarioRequest {
            label: label.to_string(),
            principal,
            kind,
            rate,
            term,
            start,
            custody_fee_pct: decimal("fee", &self.fee)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_parse_spec_with_spaces() {
        let raw = RawScenario::parse_spec("product=LCA pct-cdi=95 months=12").unwrap();
        assert_eq!(raw.product.as_deref(), Some("LCA"));
        assert_eq!(raw.pct_cdi.as_deref(), Some("95"));
        assert_eq!(raw.months.as_deref(), Some("12"));
    }

    #[test]
    fn test_parse_spec_with_commas() {
        let raw = RawScenario::parse_spec("produto=CDB,taxa=12.5,dias=365").unwrap();
        assert_eq!(raw.product.as_deref(), Some("CDB"));
        assert_eq!(raw.rate.as_deref(), Some("12.5"));
        assert_eq!(raw.days.as_deref(), Some("365"));
    }

    #[test]
    fn test_parse_spec_rejects_unknown_and_duplicate_keys() {
        assert!(RawScenario::parse_spec("product=CDB colour=blue").is_err());
        assert!(RawScenario::parse_spec("days=10 days=20").is_err());
        assert!(RawScenario::parse_spec("product").is_err());
    }

    #[test]
    fn test_resolve_prefixed_days() {
        let raw = RawScenario::parse_spec("principal=1.000,00 rate=10 days=365").unwrap();
        let req = raw.resolve("A", today()).unwrap();
        assert_eq!(req.principal, dec!(1000));
        assert_eq!(req.kind, InstrumentKind::Cdb);
        assert_eq!(req.rate, RateRequest::Prefixed { annual_pct: dec!(10) });
        assert_eq!(req.term, TermSpec::Days { days: 365 });
        assert!(!req.needs_cdi());
    }

    #[test]
    fn test_resolve_with_shared_defaults() {
        let shared = RawScenario {
            principal: Some("5000".into()),
            cdi: Some("13,75".into()),
            ..Default::default()
        };
        let raw = RawScenario::parse_spec("product=LCI pct-cdi=90 months=6")
            .unwrap()
            .with_defaults(&shared);
        let req = raw.resolve("B", today()).unwrap();
        assert_eq!(req.principal, dec!(5000));
        assert_eq!(
            req.rate,
            RateRequest::PercentOfCdi {
                pct_of_cdi: dec!(90),
                cdi_annual_pct: Some(dec!(13.75)),
            }
        );
        let input = req.to_input(None, None).unwrap();
        assert_eq!(input.term_days, 181);
    }

    #[test]
    fn test_resolve_errors() {
        let resolve = |spec: &str| RawScenario::parse_spec(spec).unwrap().resolve("X", today());
        assert!(resolve("rate=10 days=30").is_err()); // no principal
        assert!(resolve("principal=100 days=30").is_err()); // no rate
        assert!(resolve("principal=100 rate=10 pct-cdi=100 days=30").is_err());
        assert!(resolve("principal=100 rate=10").is_err()); // no term
        assert!(resolve("principal=100 rate=10 days=30 months=1").is_err());
        assert!(resolve("principal=100 rate=10 days=trinta").is_err());
        assert!(resolve("principal=100 rate=10 days=30 product=CRI").is_err());
    }

    #[test]
    fn test_missing_cdi_must_be_fetched() {
        let req = RawScenario::parse_spec("principal=100 pct-cdi=100 days=30")
            .unwrap()
            .resolve("X", today())
            .unwrap();
        assert!(req.needs_cdi());
        assert!(matches!(
            req.to_input(None, None),
            Err(CalculatorError::RateUnavailable(_))
        ));
        let input = req.to_input(Some(dec!(14.9)), Some(dec!(0.2))).unwrap();
        assert_eq!(input.rate.effective_annual_rate(), dec!(0.149));
        assert_eq!(input.custody_fee_pct, Some(dec!(0.2)));
    }

    #[test]
    fn test_date_range_term() {
        let req = RawScenario::parse_spec("principal=100 rate=10 start=2025-01-10 end=10/03/2025")
            .unwrap()
            .resolve("X", today())
            .unwrap();
        assert_eq!(req.to_input(None, None).unwrap().term_days, 59);
    }
}
