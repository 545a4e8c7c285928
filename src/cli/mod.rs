use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod formatters;
pub mod runner;

#[derive(Parser)]
#[command(name = "rendafixa")]
#[command(
    version,
    about = "Brazilian fixed-income (CDB/LCI/LCA) yield simulator"
)]
#[command(
    long_about = "Simulate and compare CDB, LCI and LCA investments: gross accrual, regressive income tax (IR), IOF, custody fees and net value, with prefixed rates or a percentage of the CDI."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a config.toml (defaults to $XDG_CONFIG_HOME/rendafixa/config.toml)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate a single investment
    Simulate {
        #[command(flatten)]
        scenario: ScenarioArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare two investments side by side
    ///
    /// Each scenario is a list of key=value pairs, e.g.
    /// --a "product=CDB rate=12 days=365" --b "product=LCA pct-cdi=95 months=12".
    /// Keys: product, principal, rate, pct-cdi, cdi, days, months, start, end, fee.
    Compare {
        /// First scenario
        #[arg(long = "a")]
        first: String,

        /// Second scenario
        #[arg(long = "b")]
        second: String,

        /// Principal shared by both scenarios unless overridden
        #[arg(short, long)]
        principal: Option<String>,

        /// CDI annual rate (%) shared by both scenarios; fetched when omitted
        #[arg(long)]
        cdi: Option<String>,

        /// Start date for month-based terms (YYYY-MM-DD or DD/MM/YYYY; defaults to today)
        #[arg(long)]
        start: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the current CDI rate published by the Banco Central
    Cdi,
}

/// Parameters of one investment
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Amount invested (e.g. 1000, 1.234,56)
    #[arg(short, long)]
    pub principal: String,

    /// Product: CDB, LCI or LCA
    #[arg(long, default_value = "CDB")]
    pub product: String,

    /// Fixed annual rate in % ("pré")
    #[arg(short, long, conflicts_with = "pct_cdi")]
    pub rate: Option<String>,

    /// Percentage of the CDI ("pós"), e.g. 110
    #[arg(long = "pct-cdi")]
    pub pct_cdi: Option<String>,

    /// CDI annual rate in %; fetched from the Banco Central when omitted
    #[arg(long)]
    pub cdi: Option<String>,

    /// Term in days
    #[arg(short, long, conflicts_with_all = ["months", "end"])]
    pub days: Option<u32>,

    /// Term in months (calendar months from the start date)
    #[arg(short, long, conflicts_with = "end")]
    pub months: Option<u32>,

    /// Start date (YYYY-MM-DD or DD/MM/YYYY; defaults to today)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub end: Option<String>,

    /// Annual custody fee in %, pro-rated over the term
    #[arg(long = "custody-fee")]
    pub custody_fee: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write a chart of net value over time (SVG)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Export the result table to CSV
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Chart sampling step in days (defaults to the configured value)
    #[arg(long)]
    pub step: Option<u32>,
}
