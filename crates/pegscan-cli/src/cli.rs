//! CLI argument definitions for pegscan.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lookup` | Fetch metrics for tickers, a saved list or the last-used list |
//! | `list` | Show, save, use, delete or edit ticker lists |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json, csv) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug-level logging |
//! | `--store-dir` | `.pegscan` | Directory for ticker lists |
//! | `--timeout-ms` | `10000` | Per-request timeout |
//! | `--delay-min-ms` / `--delay-max-ms` | `2000` / `4000` | Pause between tickers |
//! | `--max-retries` | `2` | Retries per request |
//!
//! # Examples
//!
//! ```bash
//! pegscan lookup AAPL MSFT NVDA
//! pegscan lookup --list tech --output tech.xlsx
//! pegscan list save tech AAPL MSFT
//! pegscan list edit --remove MSFT --add AMD
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Valuation and growth metrics for stock tickers.
#[derive(Debug, Parser)]
#[command(
    name = "pegscan",
    author,
    version,
    about = "Valuation and growth metrics for stock tickers",
    long_about = "pegscan reads forward P/E, PEG, price/sales and revenue growth figures from \
Yahoo Finance, computes a local PEG ratio and quarter-over-quarter revenue growth, \
and prints one row per ticker.\n\
\n\
Use 'pegscan <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Directory holding the last-used and saved ticker lists.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Lower bound of the pause between tickers.
    #[arg(long, global = true)]
    pub delay_min_ms: Option<u64>,

    /// Upper bound of the pause between tickers.
    #[arg(long, global = true)]
    pub delay_max_ms: Option<u64>,

    /// Retries per request on throttling, server errors and timeouts.
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width console table.
    Table,
    /// Single JSON object.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch metrics for tickers.
    ///
    /// Tickers given on the command line win, then `--list`, then the
    /// last-used list.
    ///
    ///   pegscan lookup AAPL MSFT
    ///   pegscan lookup --list tech
    Lookup(LookupArgs),

    /// Manage ticker lists.
    List {
        #[command(subcommand)]
        command: ListCommand,
    },
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Ticker symbols, separated by spaces or commas.
    pub tickers: Vec<String>,

    /// Use a saved list instead of explicit tickers.
    #[arg(long, conflicts_with = "tickers")]
    pub list: Option<String>,

    /// Also export the records to a .csv, .tsv, .tab or .xlsx file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Do not remember these tickers as the last-used list.
    #[arg(long, default_value_t = false)]
    pub no_save: bool,
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Show the last-used list and every saved list.
    Show,
    /// Save tickers under a name (replaces an existing list).
    Save(SaveListArgs),
    /// Make a saved list the last-used list.
    Use(NamedListArgs),
    /// Delete a saved list.
    Delete(NamedListArgs),
    /// Remove and add tickers on the last-used list.
    Edit(EditListArgs),
}

#[derive(Debug, Args)]
pub struct SaveListArgs {
    pub name: String,

    #[arg(required = true)]
    pub tickers: Vec<String>,
}

#[derive(Debug, Args)]
pub struct NamedListArgs {
    pub name: String,
}

#[derive(Debug, Args)]
pub struct EditListArgs {
    /// Tickers to remove, or ALL to clear the list.
    #[arg(long, num_args = 1..)]
    pub remove: Vec<String>,

    /// Tickers to append.
    #[arg(long, num_args = 1..)]
    pub add: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_defaults_to_table_output() {
        let cli = Cli::try_parse_from(["pegscan", "lookup", "AAPL", "MSFT"]).expect("valid args");

        assert_eq!(cli.format, OutputFormat::Table);
        let Command::Lookup(args) = cli.command else {
            panic!("expected lookup");
        };
        assert_eq!(args.tickers, ["AAPL", "MSFT"]);
        assert!(!args.no_save);
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "pegscan",
            "lookup",
            "--list",
            "tech",
            "--format",
            "csv",
            "--delay-min-ms",
            "0",
            "-v",
        ])
        .expect("valid args");

        assert_eq!(cli.format, OutputFormat::Csv);
        assert_eq!(cli.delay_min_ms, Some(0));
        assert!(cli.verbose);
    }

    #[test]
    fn list_and_explicit_tickers_conflict() {
        assert!(Cli::try_parse_from(["pegscan", "lookup", "AAPL", "--list", "tech"]).is_err());
    }

    #[test]
    fn edit_accepts_several_values_per_flag() {
        let cli = Cli::try_parse_from(["pegscan", "list", "edit", "--remove", "A", "B", "--add", "C"])
            .expect("valid args");

        let Command::List {
            command: ListCommand::Edit(args),
        } = cli.command
        else {
            panic!("expected list edit");
        };
        assert_eq!(args.remove, ["A", "B"]);
        assert_eq!(args.add, ["C"]);
    }

    #[test]
    fn save_requires_tickers() {
        assert!(Cli::try_parse_from(["pegscan", "list", "save", "tech"]).is_err());
    }
}
