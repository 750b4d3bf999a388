use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde::Deserialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::config::ScanConfig;
use crate::html::parse_tabular_document;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::retry::RetryConfig;
use crate::source::{FetchError, TickerInputs, TickerSource};
use crate::throttle::PolitenessDelay;
use crate::{RevenueObservation, RevenueSeries, TickerSymbol, ValidationError};

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URLS: [&str; 2] = [
    "https://query1.finance.yahoo.com/v1/test/getcrumb",
    "https://query2.finance.yahoo.com/v1/test/getcrumb",
];
const REFERER: &str = "https://finance.yahoo.com/";
const REVENUE_WINDOW_DAYS: i64 = 730;

pub fn statistics_url(ticker: &TickerSymbol) -> String {
    let symbol = urlencoding::encode(ticker.as_str());
    format!("https://finance.yahoo.com/quote/{symbol}/key-statistics?p={symbol}")
}

pub fn analysis_url(ticker: &TickerSymbol) -> String {
    let symbol = urlencoding::encode(ticker.as_str());
    format!("https://finance.yahoo.com/quote/{symbol}/analysis?p={symbol}")
}

/// Quarterly revenue feed URL covering the two years before `now`.
pub fn revenue_url(ticker: &TickerSymbol, crumb: &str, now: OffsetDateTime) -> String {
    let symbol = urlencoding::encode(ticker.as_str());
    let period2 = now.unix_timestamp();
    let period1 = (now - time::Duration::days(REVENUE_WINDOW_DAYS)).unix_timestamp();
    format!(
        "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries/{symbol}?symbol={symbol}&type=quarterlyTotalRevenue&period1={period1}&period2={period2}&crumb={}",
        urlencoding::encode(crumb)
    )
}

// ============================================================================
// Session: cookie + crumb
// ============================================================================

#[derive(Debug, Clone)]
struct CachedCrumb {
    value: String,
    fetched_at: Instant,
}

/// Yahoo session state.
///
/// Page requests rely on the cookie jar populated by `fc.yahoo.com`; the JSON
/// feed additionally needs a crumb from `getcrumb`. A `YAHOO_COOKIE`
/// environment value, when set, is sent explicitly on every request.
#[derive(Debug)]
pub struct YahooAuthManager {
    crumb: Mutex<Option<CachedCrumb>>,
    ttl: Duration,
    env_cookie: Option<String>,
}

impl Default for YahooAuthManager {
    fn default() -> Self {
        Self {
            crumb: Mutex::new(None),
            ttl: Duration::from_secs(3600),
            env_cookie: std::env::var("YAHOO_COOKIE")
                .ok()
                .filter(|cookie| !cookie.trim().is_empty()),
        }
    }
}

impl YahooAuthManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(cookie: impl Into<String>) -> Self {
        Self {
            env_cookie: Some(cookie.into()),
            ..Self::default()
        }
    }

    pub fn without_env_cookie() -> Self {
        Self {
            env_cookie: None,
            ..Self::default()
        }
    }

    pub fn auth(&self) -> HttpAuth {
        self.env_cookie
            .clone()
            .map_or(HttpAuth::None, HttpAuth::Cookie)
    }

    pub fn invalidate(&self) {
        *self.crumb.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached(&self) -> Option<String> {
        let guard = self.crumb.lock().unwrap_or_else(PoisonError::into_inner);
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.value.clone())
    }

    fn store(&self, value: String) {
        *self.crumb.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedCrumb {
            value,
            fetched_at: Instant::now(),
        });
    }

    /// Cached crumb, or a fresh one from the getcrumb endpoints.
    pub async fn crumb(
        &self,
        http_client: &dyn HttpClient,
        timeout_ms: u64,
    ) -> Result<String, FetchError> {
        if let Some(crumb) = self.cached() {
            return Ok(crumb);
        }

        let cookie_request = HttpRequest::get(COOKIE_URL)
            .with_browser_headers()
            .with_header("referer", REFERER)
            .with_auth(&self.auth())
            .with_timeout_ms(timeout_ms);
        http_client.execute(cookie_request).await.map_err(|e| {
            FetchError::unavailable(format!("failed to fetch Yahoo cookie: {}", e.message()))
        })?;

        for endpoint in CRUMB_URLS {
            let request = HttpRequest::get(endpoint)
                .with_browser_headers()
                .with_header("referer", REFERER)
                .with_auth(&self.auth())
                .with_timeout_ms(timeout_ms);

            let response = match http_client.execute(request).await {
                Ok(response) => response,
                Err(error) => {
                    tracing::debug!(endpoint, error = %error, "crumb request failed");
                    continue;
                }
            };

            if response.status == 429 {
                return Err(FetchError::rate_limited(
                    "Yahoo rate limited while fetching crumb",
                ));
            }
            if let Some(crumb) = valid_crumb(&response) {
                self.store(crumb.clone());
                return Ok(crumb);
            }
        }

        Err(FetchError::unavailable(
            "failed to fetch Yahoo crumb from all endpoints",
        ))
    }
}

fn valid_crumb(response: &HttpResponse) -> Option<String> {
    if !response.is_success() {
        return None;
    }
    let body = response.body.trim();
    let looks_like_page = body.contains("<html") || body.contains("<!DOCTYPE");
    let plausible = !body.is_empty() && body.len() < 100 && !body.contains(char::is_whitespace);
    (plausible && !looks_like_page && !body.to_ascii_lowercase().contains("too many requests"))
        .then(|| body.to_owned())
}

// ============================================================================
// Source
// ============================================================================

/// [`TickerSource`] backed by Yahoo Finance pages and the revenue
/// time-series feed.
pub struct YahooSource {
    http_client: Arc<dyn HttpClient>,
    auth: YahooAuthManager,
    retry: RetryConfig,
    delay: PolitenessDelay,
    timeout_ms: u64,
}

impl Default for YahooSource {
    fn default() -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()))
    }
}

impl YahooSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            auth: YahooAuthManager::new(),
            retry: RetryConfig::default(),
            delay: PolitenessDelay::default(),
            timeout_ms: 10_000,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self::new()
            .with_retry(config.retry())
            .with_politeness(config.politeness()?)
            .with_timeout_ms(config.timeout_ms))
    }

    pub fn with_auth_manager(mut self, auth: YahooAuthManager) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_politeness(mut self, delay: PolitenessDelay) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_inputs(&self, ticker: &TickerSymbol) -> Result<TickerInputs, FetchError> {
        self.delay.wait().await;

        let statistics = self.fetch_page(&statistics_url(ticker)).await?;
        let analysis = self.fetch_page(&analysis_url(ticker)).await?;
        let revenue = match self.fetch_revenue(ticker).await {
            Ok(series) => Some(series),
            Err(error) => {
                tracing::warn!(
                    ticker = %ticker,
                    code = error.code(),
                    error = %error,
                    "revenue series unavailable"
                );
                None
            }
        };

        Ok(TickerInputs::new(
            parse_tabular_document(&statistics),
            parse_tabular_document(&analysis),
            revenue,
        ))
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send_with_retry(url).await?;
        if !response.is_success() {
            return Err(status_error(response.status, url));
        }
        Ok(response.body)
    }

    async fn fetch_revenue(&self, ticker: &TickerSymbol) -> Result<RevenueSeries, FetchError> {
        let crumb = self
            .auth
            .crumb(self.http_client.as_ref(), self.timeout_ms)
            .await?;
        let mut response = self
            .send_with_retry(&revenue_url(ticker, &crumb, OffsetDateTime::now_utc()))
            .await?;

        if response.status == 401 || response.status == 429 {
            tracing::debug!(ticker = %ticker, status = response.status, "refreshing Yahoo crumb");
            self.auth.invalidate();
            let crumb = self
                .auth
                .crumb(self.http_client.as_ref(), self.timeout_ms)
                .await?;
            let url = revenue_url(ticker, &crumb, OffsetDateTime::now_utc());
            response = self.send_once(&url).await?;
        }

        if !response.is_success() {
            return Err(status_error(response.status, "revenue time series"));
        }
        parse_revenue_series(&response.body)
    }

    /// Sends a GET, repeating on retryable statuses and transport errors.
    /// Returns the last response even when its status is not a success.
    async fn send_with_retry(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let mut attempt = 0;
        loop {
            let last_attempt = attempt >= self.retry.max_retries;
            match self.send_once(url).await {
                Ok(response)
                    if !last_attempt
                        && !response.is_success()
                        && self.retry.should_retry_status(response.status) =>
                {
                    tracing::debug!(url, status = response.status, attempt, "retrying request");
                }
                Ok(response) => return Ok(response),
                Err(error) if !last_attempt && error.retryable() => {
                    tracing::debug!(url, error = %error, attempt, "retrying request");
                }
                Err(error) => return Err(error),
            }
            tokio::time::sleep(self.retry.delay_for_attempt(attempt)).await;
            attempt += 1;
        }
    }

    async fn send_once(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let request = HttpRequest::get(url)
            .with_browser_headers()
            .with_header("referer", REFERER)
            .with_auth(&self.auth.auth())
            .with_timeout_ms(self.timeout_ms);

        self.http_client.execute(request).await.map_err(|e| {
            if e.retryable() {
                FetchError::unavailable(format!("yahoo transport error: {}", e.message()))
            } else {
                FetchError::internal(format!("yahoo request error: {}", e.message()))
            }
        })
    }
}

impl TickerSource for YahooSource {
    fn fetch<'a>(
        &'a self,
        ticker: &'a TickerSymbol,
    ) -> Pin<Box<dyn Future<Output = Result<TickerInputs, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_inputs(ticker))
    }
}

fn status_error(status: u16, what: &str) -> FetchError {
    match status {
        404 => FetchError::not_found(format!("yahoo returned 404 for {what}")),
        429 => FetchError::rate_limited(format!("yahoo rate limited {what}")),
        408 | 500..=599 => FetchError::unavailable(format!("yahoo returned status {status} for {what}")),
        _ => FetchError::invalid_response(format!("yahoo returned status {status} for {what}")),
    }
}

// ============================================================================
// Revenue time-series payload
// ============================================================================

#[derive(Debug, Deserialize)]
struct YahooTimeseriesResponse {
    timeseries: YahooTimeseriesData,
}

#[derive(Debug, Deserialize)]
struct YahooTimeseriesData {
    #[serde(default)]
    result: Vec<YahooTimeseriesResult>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooTimeseriesResult {
    #[serde(rename = "quarterlyTotalRevenue", default)]
    quarterly_total_revenue: Vec<Option<YahooRevenuePoint>>,
}

#[derive(Debug, Deserialize)]
struct YahooRevenuePoint {
    #[serde(rename = "asOfDate")]
    as_of_date: String,
    #[serde(rename = "reportedValue", default)]
    reported_value: Option<YahooRawValue>,
}

#[derive(Debug, Deserialize)]
struct YahooRawValue {
    #[serde(default)]
    raw: Option<f64>,
}

/// Decode a `quarterlyTotalRevenue` response into a most-recent-first series.
///
/// Null points, points without a value and points with an unreadable date
/// are skipped.
pub fn parse_revenue_series(body: &str) -> Result<RevenueSeries, FetchError> {
    let response: YahooTimeseriesResponse = serde_json::from_str(body).map_err(|e| {
        FetchError::invalid_response(format!("failed to parse revenue time series: {e}"))
    })?;

    if let Some(error) = response.timeseries.error.filter(|e| !e.is_null()) {
        return Err(FetchError::invalid_response(format!(
            "yahoo time series error: {error}"
        )));
    }

    let format = format_description!("[year]-[month]-[day]");
    let observations = response
        .timeseries
        .result
        .into_iter()
        .flat_map(|result| result.quarterly_total_revenue)
        .flatten()
        .filter_map(|point| {
            let value = point.reported_value?.raw?;
            let as_of = Date::parse(&point.as_of_date, &format).ok()?;
            Some(RevenueObservation::new(as_of, value))
        });

    Ok(RevenueSeries::from_observations(observations))
}
