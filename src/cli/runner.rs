use chrono::{Local, NaiveDate};

use crate::cli::{Commands, OutputArgs, ScenarioArgs};
use crate::commands::{Command, CommandParseError, OutputOptions, RawScenario, ScenarioRequest};

const SINGLE_LABEL: &str = "Investimento";
const FIRST_LABEL: &str = "Investimento 1";
const SECOND_LABEL: &str = "Investimento 2";

impl From<&ScenarioArgs> for RawScenario {
    fn from(args: &ScenarioArgs) -> Self {
        RawScenario {
            principal: Some(args.principal.clone()),
            product: Some(args.product.clone()),
            rate: args.rate.clone(),
            pct_cdi: args.pct_cdi.clone(),
            cdi: args.cdi.clone(),
            days: args.days.map(|d| d.to_string()),
            months: args.months.map(|m| m.to_string()),
            start: args.start.clone(),
            end: args.end.clone(),
            fee: args.custody_fee.clone(),
        }
    }
}

impl From<&OutputArgs> for OutputOptions {
    fn from(args: &OutputArgs) -> Self {
        OutputOptions {
            chart: args.chart.clone(),
            export: args.export.clone(),
            step_days: args.step,
        }
    }
}

/// Convert clap `Commands` into the internal `commands::Command`, resolving
/// dates relative to today.
pub fn to_internal_command(c: &Commands) -> Result<Command, CommandParseError> {
    to_internal_command_at(c, Local::now().date_naive())
}

pub fn to_internal_command_at(c: &Commands, today: NaiveDate) -> Result<Command, CommandParseError> {
    match c {
        Commands::Simulate { scenario, output } => {
            let request = RawScenario::from(scenario).resolve(SINGLE_LABEL, today)?;
            Ok(Command::Simulate {
                scenario: request,
                output: output.into(),
            })
        }

        Commands::Compare {
            first,
            second,
            principal,
            cdi,
            start,
            output,
        } => {
            let shared = RawScenario {
                principal: principal.clone(),
                cdi: cdi.clone(),
                start: start.clone(),
                ..Default::default()
            };
            let resolve = |label: &str, spec: &str| -> Result<ScenarioRequest, CommandParseError> {
                RawScenario::parse_spec(spec)
                    .map_err(|e| CommandParseError {
                        message: format!("{}: {}", label, e),
                    })?
                    .with_defaults(&shared)
                    .resolve(label, today)
                    .map_err(|e| CommandParseError {
                        message: format!("{}: {}", label, e),
                    })
            };
            Ok(Command::Compare {
                first: resolve(FIRST_LABEL, first)?,
                second: resolve(SECOND_LABEL, second)?,
                output: output.into(),
            })
        }

        Commands::Cdi => Ok(Command::Cdi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::RateRequest;
    use rendafixa::calculator::InstrumentKind;
    use rendafixa::term::TermSpec;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn scenario_args() -> ScenarioArgs {
        ScenarioArgs {
            principal: "1000".to_string(),
            product: "lca".to_string(),
            rate: None,
            pct_cdi: Some("95".to_string()),
            cdi: Some("13.75".to_string()),
            days: None,
            months: Some(12),
            start: None,
            end: None,
            custody_fee: None,
        }
    }

    #[test]
    fn convert_simulate() {
        let cmd = Commands::Simulate {
            scenario: scenario_args(),
            output: OutputArgs::default(),
        };
        match to_internal_command_at(&cmd, today()).expect("conversion failed") {
            Command::Simulate { scenario, output } => {
                assert_eq!(scenario.label, "Investimento");
                assert_eq!(scenario.kind, InstrumentKind::Lca);
                assert_eq!(scenario.term, TermSpec::Months { months: 12 });
                assert_eq!(scenario.start, today());
                assert_eq!(output, OutputOptions::default());
            }
            other => panic!("unexpected converted result: {:?}", other),
        }
    }

    #[test]
    fn convert_compare_applies_shared_values() {
        let cmd = Commands::Compare {
            first: "product=CDB rate=12 days=365".to_string(),
            second: "product=LCI pct-cdi=90 days=365 principal=2000".to_string(),
            principal: Some("1000".to_string()),
            cdi: Some("10".to_string()),
            start: None,
            output: OutputArgs::default(),
        };
        match to_internal_command_at(&cmd, today()).expect("conversion failed") {
            Command::Compare { first, second, .. } => {
                assert_eq!(first.label, "Investimento 1");
                assert_eq!(first.principal, dec!(1000));
                assert_eq!(second.principal, dec!(2000));
                assert_eq!(
                    second.rate,
                    RateRequest::PercentOfCdi {
                        pct_of_cdi: dec!(90),
                        cdi_annual_pct: Some(dec!(10)),
                    }
                );
            }
            other => panic!("unexpected converted result: {:?}", other),
        }
    }

    #[test]
    fn convert_compare_reports_which_scenario_failed() {
        let cmd = Commands::Compare {
            first: "product=CDB rate=12 days=365".to_string(),
            second: "product=CDB days=365".to_string(),
            principal: Some("1000".to_string()),
            cdi: None,
            start: None,
            output: OutputArgs::default(),
        };
        let err = to_internal_command_at(&cmd, today()).unwrap_err();
        assert!(err.message.starts_with("Investimento 2"));
    }
}
