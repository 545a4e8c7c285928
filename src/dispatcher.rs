//! Command dispatcher: resolves rates, runs the calculator and prints results.

use anyhow::{Context, Result};
use itertools::Itertools;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use crate::cli::formatters;
use crate::commands::{Command, OutputOptions, RateRequest, ScenarioRequest};
use rendafixa::cdi::{check_cdi_range, fetch_cdi};
use rendafixa::config::Config;
use rendafixa::reports::{export_csv, render_chart_svg, ChartLine, Comparison, Scenario};

/// Route a parsed command to its handler
pub async fn dispatch_command(command: Command, config: &Config, json_output: bool) -> Result<()> {
    match command {
        Command::Simulate { scenario, output } => {
            dispatch_simulate(scenario, output, config, json_output).await
        }
        Command::Compare {
            first,
            second,
            output,
        } => dispatch_compare(first, second, output, config, json_output).await,
        Command::Cdi => dispatch_cdi(config, json_output).await,
    }
}

/// Fetch the CDI once if any request needs it
async fn resolve_cdi(requests: &[&ScenarioRequest], config: &Config) -> Result<Option<Decimal>> {
    for request in requests {
        if let RateRequest::PercentOfCdi {
            cdi_annual_pct: Some(cdi),
            ..
        } = request.rate
        {
            check_cdi_range(cdi).with_context(|| format!("{}: invalid CDI", request.label))?;
        }
    }

    if !requests.iter().any(|r| r.needs_cdi()) {
        return Ok(None);
    }

    let rate = fetch_cdi(&config.cdi.url)
        .await
        .context("CDI rate unavailable; pass --cdi <pct> to use a manual rate")?;
    Ok(Some(rate.annual_pct))
}

fn build_scenario(request: &ScenarioRequest, cdi: Option<Decimal>, config: &Config) -> Result<Scenario> {
    let input = request
        .to_input(cdi, config.defaults.custody_fee_pct)
        .with_context(|| format!("{}: invalid input", request.label))?;
    let scenario = Scenario::simulate(request.label.clone(), input)
        .with_context(|| format!("{}: calculation failed", request.label))?;
    Ok(scenario)
}

fn write_outputs(
    scenarios: &[&Scenario],
    output: &OutputOptions,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    if let Some(path) = &output.chart {
        let step = output.step_days.unwrap_or(config.defaults.step_days);
        render_chart(path, scenarios, step)?;
        if !json_output {
            println!("Gráfico salvo em {}", path.display());
        }
    }
    if let Some(path) = &output.export {
        export_csv(path, scenarios)?;
        if !json_output {
            println!("CSV salvo em {}", path.display());
        }
    }
    Ok(())
}

fn render_chart(path: &Path, scenarios: &[&Scenario], step_days: u32) -> Result<()> {
    let series = scenarios
        .iter()
        .map(|s| s.net_series(step_days))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to build net value series")?;

    let lines: Vec<ChartLine> = scenarios
        .iter()
        .zip(&series)
        .map(|(s, points)| ChartLine {
            label: &s.label,
            points,
        })
        .collect();

    let title = scenarios
        .iter()
        .map(|s| format!("{} {}", s.result.kind, s.result.rate.kind_label()))
        .join(" x ");
    render_chart_svg(path, &format!("Valor líquido - {}", title), &lines)
}

async fn dispatch_simulate(
    request: ScenarioRequest,
    output: OutputOptions,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let cdi = resolve_cdi(&[&request], config).await?;
    let scenario = build_scenario(&request, cdi, config)?;
    info!(
        "{}: {} over {} days -> net {}",
        scenario.label, scenario.result.kind, scenario.result.term_days, scenario.result.net_value
    );

    if json_output {
        println!("{}", formatters::format_scenario_json(&scenario));
    } else {
        print!("{}", formatters::format_scenario_table(&scenario));
    }
    write_outputs(&[&scenario], &output, config, json_output)
}

async fn dispatch_compare(
    first: ScenarioRequest,
    second: ScenarioRequest,
    output: OutputOptions,
    config: &Config,
    json_output: bool,
) -> Result<()> {
    let cdi = resolve_cdi(&[&first, &second], config).await?;
    let comparison = Comparison::new(
        build_scenario(&first, cdi, config)?,
        build_scenario(&second, cdi, config)?,
    );
    info!("Best scenario: {}", comparison.best().label);

    if json_output {
        println!("{}", formatters::format_comparison_json(&comparison));
    } else {
        print!("{}", formatters::format_comparison_table(&comparison));
    }
    write_outputs(&comparison.scenarios(), &output, config, json_output)
}

async fn dispatch_cdi(config: &Config, json_output: bool) -> Result<()> {
    let rate = fetch_cdi(&config.cdi.url)
        .await
        .context("CDI rate unavailable")?;
    if json_output {
        println!("{}", formatters::format_cdi_json(&rate));
    } else {
        print!("{}", formatters::format_cdi(&rate));
    }
    Ok(())
}
