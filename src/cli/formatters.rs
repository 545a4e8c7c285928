//! Output formatting module for CLI display
//!
//! This module handles all terminal output formatting, separating
//! the concerns of calculation from presentation.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use rendafixa::calculator::{RateSpec, YieldResult};
use rendafixa::cdi::CdiRate;
use rendafixa::reports::{Comparison, Scenario};
use rendafixa::utils::{format_currency, format_decimal_br, format_percent, format_rate};

fn describe_rate(rate: &RateSpec) -> String {
    match *rate {
        RateSpec::Prefixed { annual_pct } => format!("{} a.a.", format_percent(annual_pct)),
        RateSpec::PercentOfCdi {
            pct_of_cdi,
            cdi_annual_pct,
        } => format!(
            "{} do CDI (CDI {})",
            format_percent(pct_of_cdi),
            format_percent(cdi_annual_pct)
        ),
    }
}

fn tax_cell(amount: Decimal, rate: Decimal) -> String {
    if amount.is_zero() {
        format_currency(amount)
    } else {
        format!("{} ({})", format_currency(amount), format_rate(rate))
            .red()
            .to_string()
    }
}

/// (label, value) pairs describing one result, in display order
fn breakdown(r: &YieldResult) -> Vec<(&'static str, String)> {
    vec![
        ("Produto", r.kind.as_str().to_string()),
        ("Tipo", r.rate.kind_label().to_string()),
        ("Taxa", describe_rate(&r.rate)),
        ("Prazo (dias)", r.term_days.to_string()),
        ("Valor investido", format_currency(r.principal)),
        ("Valor bruto", format_currency(r.gross_value)),
        ("Rendimento bruto", format_currency(r.gross_gain)),
        ("IOF", tax_cell(r.iof, r.iof_rate)),
        ("Imposto de Renda", tax_cell(r.income_tax, r.income_tax_rate)),
        ("Custódia", format_currency(r.custody_fee)),
        (
            "Valor líquido",
            format_currency(r.net_value).green().bold().to_string(),
        ),
        ("Rentabilidade líquida", format_percent(r.net_return_pct)),
        ("Rentabilidade anual", format_percent(r.annualized_net_return_pct)),
    ]
}

/// Format a single simulation for terminal table output
pub fn format_scenario_table(scenario: &Scenario) -> String {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "")]
        item: &'static str,
        #[tabled(rename = "Valor")]
        value: String,
    }

    let rows: Vec<Row> = breakdown(&scenario.result)
        .into_iter()
        .map(|(item, value)| Row { item, value })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    format!(
        "\n{} {}\n\n{}\n",
        "📊".cyan().bold(),
        scenario.label.bold(),
        table
    )
}

/// Format two simulations side by side, naming the better one
pub fn format_comparison_table(comparison: &Comparison) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        String::new(),
        comparison.first.label.clone(),
        comparison.second.label.clone(),
    ]);

    let first = breakdown(&comparison.first.result);
    let second = breakdown(&comparison.second.result);
    for ((item, a), (_, b)) in first.into_iter().zip(second) {
        builder.push_record([item.to_string(), a, b]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    let best = comparison.best();
    format!(
        "\n{} Comparação\n\n{}\n\n{} Melhor investimento segundo rentabilidade anual: {} (+{} p.p.)\n",
        "📊".cyan().bold(),
        table,
        "✓".green().bold(),
        best.label.green().bold(),
        format_decimal_br(comparison.advantage_pct())
    )
}

pub fn format_cdi(rate: &CdiRate) -> String {
    format!(
        "{} CDI: {} a.a. (publicado em {})\n",
        "ℹ".blue().bold(),
        format_percent(rate.annual_pct).bold(),
        rate.date.format("%d/%m/%Y")
    )
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}

pub fn format_scenario_json(scenario: &Scenario) -> String {
    to_json(scenario)
}

pub fn format_comparison_json(comparison: &Comparison) -> String {
    #[derive(Serialize)]
    struct JsonComparison<'a> {
        scenarios: [&'a Scenario; 2],
        best: &'a str,
        advantage_pct: String,
    }

    to_json(&JsonComparison {
        scenarios: comparison.scenarios(),
        best: &comparison.best().label,
        advantage_pct: comparison.advantage_pct().round_dp(4).to_string(),
    })
}

pub fn format_cdi_json(rate: &CdiRate) -> String {
    to_json(rate)
}
