//! Sequential batch driver over a [`TickerSource`].

use std::time::Instant;

use serde::Serialize;

use crate::assemble::assemble_or_degrade;
use crate::source::{FetchError, TickerSource};
use crate::{OutputRecord, TickerSymbol};

/// A ticker whose inputs could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerFailure {
    pub ticker: TickerSymbol,
    pub code: &'static str,
    pub message: String,
}

impl TickerFailure {
    fn new(ticker: TickerSymbol, error: &FetchError) -> Self {
        Self {
            ticker,
            code: error.code(),
            message: error.message().to_owned(),
        }
    }
}

/// Records for every requested ticker, plus the failures behind any
/// degraded rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<OutputRecord>,
    pub failures: Vec<TickerFailure>,
    pub elapsed_ms: u64,
}

/// Fetch and assemble each ticker in order, one at a time.
///
/// Always yields exactly one record per input ticker.
pub async fn run_batch(tickers: &[TickerSymbol], source: &dyn TickerSource) -> BatchOutcome {
    let started = Instant::now();
    let mut outcome = BatchOutcome {
        records: Vec::with_capacity(tickers.len()),
        ..BatchOutcome::default()
    };

    for (position, ticker) in tickers.iter().enumerate() {
        tracing::info!(
            ticker = %ticker,
            position = position + 1,
            total = tickers.len(),
            "fetching ticker"
        );

        let fetched = source.fetch(ticker).await;
        if let Err(error) = &fetched {
            outcome.failures.push(TickerFailure::new(ticker.clone(), error));
        }
        outcome
            .records
            .push(assemble_or_degrade(ticker.clone(), fetched.as_ref()));
    }

    outcome.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        tickers = tickers.len(),
        failures = outcome.failures.len(),
        elapsed_ms = outcome.elapsed_ms,
        "batch complete"
    );
    outcome
}
