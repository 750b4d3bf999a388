//! Per-ticker input contract.
//!
//! A [`TickerSource`] supplies the two scraped pages and the revenue series
//! for one ticker. The batch driver awaits one fetch at a time; transports,
//! retries and politeness delays live behind this trait.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{RevenueSeries, TabularDocument, TickerSymbol};

/// Everything the pipeline reads for one ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerInputs {
    pub statistics: TabularDocument,
    pub analysis: TabularDocument,
    pub revenue: Option<RevenueSeries>,
}

impl TickerInputs {
    pub fn new(
        statistics: TabularDocument,
        analysis: TabularDocument,
        revenue: Option<RevenueSeries>,
    ) -> Self {
        Self {
            statistics,
            analysis,
            revenue,
        }
    }
}

/// Fetch failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Unavailable,
    RateLimited,
    NotFound,
    InvalidResponse,
    Internal,
}

/// Structured fetch error for one ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::NotFound,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::InvalidResponse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Unavailable => "fetch.unavailable",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::NotFound => "fetch.not_found",
            FetchErrorKind::InvalidResponse => "fetch.invalid_response",
            FetchErrorKind::Internal => "fetch.internal",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Supplies [`TickerInputs`] for one ticker at a time.
pub trait TickerSource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        ticker: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<TickerInputs, FetchError>> + Send + 'a>>;
}

/// In-memory source keyed by ticker, for offline runs and tests.
/// Tickers without an entry fail with `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    entries: HashMap<TickerSymbol, Result<TickerInputs, FetchError>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(mut self, ticker: TickerSymbol, inputs: TickerInputs) -> Self {
        self.entries.insert(ticker, Ok(inputs));
        self
    }

    pub fn with_failure(mut self, ticker: TickerSymbol, error: FetchError) -> Self {
        self.entries.insert(ticker, Err(error));
        self
    }
}

impl TickerSource for FixtureSource {
    fn fetch<'a>(
        &'a self,
        ticker: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<TickerInputs, FetchError>> + Send + 'a>> {
        let result = self.entries.get(ticker).cloned().unwrap_or_else(|| {
            Err(FetchError::not_found(format!(
                "no fixture registered for '{ticker}'"
            )))
        });
        Box::pin(async move { result })
    }
}
