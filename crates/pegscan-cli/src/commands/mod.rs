mod lists;
mod lookup;

use std::collections::BTreeMap;
use std::path::PathBuf;

use pegscan_core::{
    parse_ticker_list, BatchOutcome, ScanConfig, TickerSymbol, WatchlistStore, YahooSource,
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Result of a command, rendered by [`crate::output`].
#[derive(Debug)]
pub enum CommandOutput {
    Lookup(LookupOutput),
    Lists(ListOverview),
    Notice(Notice),
}

#[derive(Debug, Serialize)]
pub struct LookupOutput {
    #[serde(flatten)]
    pub outcome: BatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportSummary>,
}

#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListOverview {
    pub last: Vec<TickerSymbol>,
    pub saved: BTreeMap<String, Vec<TickerSymbol>>,
}

#[derive(Debug, Serialize)]
pub struct Notice {
    pub message: String,
    pub tickers: Vec<TickerSymbol>,
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let config = resolve_config(cli, ScanConfig::from_env()?)?;
    let store = WatchlistStore::new(&config.store_dir);
    tracing::debug!(store = %store.root().display(), "using watchlist store");

    match &cli.command {
        Command::Lookup(args) => {
            let source = YahooSource::from_config(&config)?;
            lookup::run(args, &store, &source).await
        }
        Command::List { command } => lists::run(command, &store),
    }
}

/// Apply command-line overrides on top of an environment-derived config.
pub fn resolve_config(cli: &Cli, mut config: ScanConfig) -> Result<ScanConfig, CliError> {
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    if let Some(min_ms) = cli.delay_min_ms {
        config.delay_min_ms = min_ms;
    }
    if let Some(max_ms) = cli.delay_max_ms {
        config.delay_max_ms = max_ms;
    }
    if let Some(max_retries) = cli.max_retries {
        config = config.with_max_retries(max_retries);
    }
    if let Some(store_dir) = &cli.store_dir {
        config = config.with_store_dir(store_dir);
    }
    config.validate()?;
    Ok(config)
}

/// Parse ticker arguments, each of which may itself hold several
/// comma-separated tickers.
pub fn parse_tickers(raw: &[String]) -> Result<Vec<TickerSymbol>, CliError> {
    Ok(parse_ticker_list(&raw.join(" "))?)
}
