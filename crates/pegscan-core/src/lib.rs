//! # Pegscan Core
//!
//! Valuation and growth metrics for a list of tickers, read from Yahoo
//! Finance statistics and analysis pages and reconciled with a quarterly
//! revenue feed.
//!
//! ## Overview
//!
//! - **Field extraction** by case-insensitive label substring over scraped tables
//! - **Metric resolution** with ordered fallback labels
//! - **Local PEG** computed from forward P/E and the 5-year growth estimate
//! - **Quarter-over-quarter revenue growth** from the revenue series
//! - **Formatting** of every value into fixed two-decimal display text
//! - **Per-ticker isolation**: a failed ticker yields an all-empty row
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Yahoo Finance [`TickerSource`] |
//! | [`assemble`] | Record assembly and degradation |
//! | [`batch`] | Sequential batch driver |
//! | [`config`] | Defaults and `PEGSCAN_*` overrides |
//! | [`domain`] | Tickers, table documents, revenue series, output records |
//! | [`export`] | CSV / TSV / XLSX export |
//! | [`extract`] | Label lookup over table documents |
//! | [`format`] | Display formatting |
//! | [`growth`] | Revenue growth from the series |
//! | [`html`] | HTML to table document parsing |
//! | [`http_client`] | HTTP client abstraction |
//! | [`metrics`] | The six scraped metrics and their labels |
//! | [`peg`] | Local PEG ratio |
//! | [`retry`] | Retry and backoff policy |
//! | [`source`] | Per-ticker source contract |
//! | [`throttle`] | Politeness delay between tickers |
//! | [`watchlist`] | Last-used and named ticker lists |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pegscan_core::{parse_ticker_list, run_batch, YahooSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tickers = parse_ticker_list("AAPL, MSFT")?;
//!     let outcome = run_batch(&tickers, &YahooSource::new()).await;
//!
//!     for record in &outcome.records {
//!         println!("{}: PEG {}", record.ticker, record.calculated_peg);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │ tickers
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Batch Driver   │────▶│ TickerSource     │
//! └────────┬────────┘     │ (Yahoo/fixture)  │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Record Assembly │  extract → resolve → PEG / QoQ → format
//! └────────┬────────┘
//!          ▼
//!   Vec<OutputRecord>
//! ```
//!
//! ## Error Handling
//!
//! The pipeline itself never fails: missing labels and unparseable values
//! become empty fields, and a ticker whose fetch fails becomes an all-empty
//! row reported in [`BatchOutcome::failures`]:
//!
//! ```rust
//! use pegscan_core::{FetchError, FetchErrorKind};
//!
//! fn describe(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::NotFound => "unknown ticker",
//!         FetchErrorKind::RateLimited => "slow down",
//!         _ => "try again later",
//!     }
//! }
//! ```

pub mod adapters;
pub mod assemble;
pub mod batch;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod extract;
pub mod format;
pub mod growth;
pub mod html;
pub mod http_client;
pub mod metrics;
pub mod peg;
pub mod retry;
pub mod source;
pub mod throttle;
pub mod watchlist;

// Adapters
pub use adapters::{YahooAuthManager, YahooSource};

// Pipeline
pub use assemble::{assemble_batch, assemble_or_degrade, assemble_record};
pub use batch::{run_batch, BatchOutcome, TickerFailure};
pub use extract::{extract_field, LabeledValue};
pub use format::{format_value, parse_decimal};
pub use growth::quarter_over_quarter_growth;
pub use metrics::{resolve_metrics, DocumentKind, Metric, MetricSet};
pub use peg::calculated_peg;

// Domain models
pub use domain::{
    parse_ticker_list, OutputRecord, RevenueObservation, RevenueSeries, TableBlock, TableRow,
    TabularDocument, TickerSymbol, COLUMN_HEADERS,
};

// Sources and transport
pub use html::parse_tabular_document;
pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use retry::{Backoff, RetryConfig};
pub use source::{FetchError, FetchErrorKind, FixtureSource, TickerInputs, TickerSource};
pub use throttle::PolitenessDelay;

// Configuration and persistence
pub use config::ScanConfig;
pub use export::{export_as, export_to_path, write_delimited, write_xlsx, ExportFormat};
pub use watchlist::{edit_tickers, WatchlistStore};

// Error types
pub use error::{CoreError, ValidationError};
