mod cli;
mod commands;
mod dispatcher;

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use rendafixa::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for tables and --json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    let command = cli::runner::to_internal_command(&cli.command)?;

    dispatcher::dispatch_command(command, &config, cli.json).await
}
