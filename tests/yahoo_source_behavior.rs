//! Behavior-driven tests for the Yahoo source
//!
//! A recording HTTP client stands in for Yahoo so the tests can observe
//! which URLs are requested, with which headers, and how responses map to
//! ticker inputs and failures.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pegscan_core::{
    assemble_record, run_batch, FetchErrorKind, HttpClient, HttpError, HttpRequest, HttpResponse,
    PolitenessDelay, RetryConfig, TickerSource, TickerSymbol, YahooAuthManager, YahooSource,
};

const STATISTICS_PAGE: &str = r#"<html><body><table>
  <tr><td>Forward P/E</td><td>30.00</td></tr>
  <tr><td>PEG Ratio (5 yr expected)</td><td>2.40</td></tr>
  <tr><td>Price/Sales (ttm)</td><td>8.12</td></tr>
  <tr><td>Quarterly Revenue Growth (yoy)</td><td>4.9%</td></tr>
</table></body></html>"#;

const ANALYSIS_PAGE: &str = r#"<html><body><table>
  <tr><td>Next Year</td><td>7.25%</td></tr>
  <tr><td>Next 5 Years (per annum)</td><td>12.00%</td></tr>
</table></body></html>"#;

const REVENUE_FEED: &str = r#"{"timeseries":{"result":[{"meta":{"symbol":["XYZ"]},
  "quarterlyTotalRevenue":[
    {"asOfDate":"2024-03-31","reportedValue":{"raw":200.0}},
    {"asOfDate":"2024-06-30","reportedValue":{"raw":210.0}}
  ]}],"error":null}}"#;

/// Answers by URL shape and records every request.
struct FakeYahoo {
    revenue_status: Vec<u16>,
    missing: Vec<&'static str>,
    revenue_calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeYahoo {
    fn healthy() -> Self {
        Self {
            revenue_status: vec![200],
            missing: Vec::new(),
            revenue_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_revenue_status(mut self, statuses: Vec<u16>) -> Self {
        self.revenue_status = statuses;
        self
    }

    fn with_missing(mut self, symbol: &'static str) -> Self {
        self.missing.push(symbol);
        self
    }

    fn respond(&self, url: &str) -> HttpResponse {
        if self
            .missing
            .iter()
            .any(|symbol| url.contains(&format!("/quote/{symbol}/")))
        {
            return HttpResponse::with_status(404, "<html>Not Found</html>");
        }
        if url.contains("/key-statistics") {
            return HttpResponse::ok(STATISTICS_PAGE);
        }
        if url.contains("/analysis") {
            return HttpResponse::ok(ANALYSIS_PAGE);
        }
        if url.contains("getcrumb") {
            return HttpResponse::ok("crumb-token");
        }
        if url.contains("fundamentals-timeseries") {
            let call = self.revenue_calls.fetch_add(1, Ordering::SeqCst);
            let status = self
                .revenue_status
                .get(call)
                .or(self.revenue_status.last())
                .copied()
                .unwrap_or(200);
            return if status == 200 {
                HttpResponse::ok(REVENUE_FEED)
            } else {
                HttpResponse::with_status(status, "")
            };
        }
        HttpResponse::with_status(404, "")
    }

    fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .iter()
            .map(|request| request.url.clone())
            .collect()
    }

    fn first_request_to(&self, fragment: &str) -> Option<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .iter()
            .find(|request| request.url.contains(fragment))
            .cloned()
    }
}

impl HttpClient for FakeYahoo {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let response = self.respond(&request.url);
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        Box::pin(async move { Ok(response) })
    }
}

fn source(fake: &Arc<FakeYahoo>) -> YahooSource {
    YahooSource::with_http_client(Arc::clone(fake) as Arc<dyn HttpClient>)
        .with_auth_manager(YahooAuthManager::without_env_cookie())
        .with_retry(RetryConfig::fixed(Duration::ZERO, 1))
        .with_politeness(PolitenessDelay::disabled())
}

fn ticker(raw: &str) -> TickerSymbol {
    TickerSymbol::parse(raw).expect("valid ticker")
}

// =============================================================================
// Successful lookups
// =============================================================================

#[tokio::test]
async fn healthy_upstream_yields_pages_and_revenue_series() {
    // Given: Yahoo serves both pages and the revenue feed
    let fake = Arc::new(FakeYahoo::healthy());
    let yahoo = source(&fake);

    // When: A ticker is fetched and assembled
    let inputs = yahoo.fetch(&ticker("XYZ")).await.expect("fetch succeeds");
    let record = assemble_record(ticker("XYZ"), &inputs);

    // Then: Scraped and derived columns are all filled
    assert_eq!(record.forward_pe, "30.00");
    assert_eq!(record.vendor_peg, "2.40");
    assert_eq!(record.calculated_peg, "2.50");
    assert_eq!(record.price_to_sales, "8.12");
    assert_eq!(record.revenue_growth_yoy, "4.90%");
    assert_eq!(record.revenue_growth_qoq, "5.00%");
    assert_eq!(record.growth_estimate_1y, "7.25%");
    assert_eq!(record.growth_estimate_5y, "12.00%");
}

#[tokio::test]
async fn requests_follow_the_yahoo_url_layout() {
    // Given: A healthy upstream
    let fake = Arc::new(FakeYahoo::healthy());
    let yahoo = source(&fake);

    // When: One ticker is fetched
    yahoo.fetch(&ticker("XYZ")).await.expect("fetch succeeds");

    // Then: Pages come first, then the session bootstrap, then the feed
    let urls = fake.urls();
    assert_eq!(urls[0], "https://finance.yahoo.com/quote/XYZ/key-statistics?p=XYZ");
    assert_eq!(urls[1], "https://finance.yahoo.com/quote/XYZ/analysis?p=XYZ");
    assert_eq!(urls[2], "https://fc.yahoo.com");
    assert_eq!(urls[3], "https://query1.finance.yahoo.com/v1/test/getcrumb");
    assert!(urls[4].contains("type=quarterlyTotalRevenue"));
    assert!(urls[4].ends_with("&crumb=crumb-token"));
    assert_eq!(urls.len(), 5);
}

#[tokio::test]
async fn page_requests_carry_browser_headers() {
    // Given: A healthy upstream
    let fake = Arc::new(FakeYahoo::healthy());
    let yahoo = source(&fake);

    // When: One ticker is fetched
    yahoo.fetch(&ticker("XYZ")).await.expect("fetch succeeds");

    // Then: The statistics request looks like a desktop browser
    let request = fake
        .first_request_to("/key-statistics")
        .expect("statistics page requested");
    assert!(request
        .headers
        .get("user-agent")
        .is_some_and(|agent| agent.contains("Chrome/")));
    assert_eq!(
        request.headers.get("accept-language").map(String::as_str),
        Some("en-US,en;q=0.5")
    );
    assert_eq!(
        request.headers.get("connection").map(String::as_str),
        Some("keep-alive")
    );
}

#[tokio::test]
async fn crumb_is_reused_across_tickers() {
    // Given: A healthy upstream
    let fake = Arc::new(FakeYahoo::healthy());
    let yahoo = source(&fake);

    // When: Two tickers are fetched back to back
    yahoo.fetch(&ticker("AAA")).await.expect("fetch succeeds");
    yahoo.fetch(&ticker("BBB")).await.expect("fetch succeeds");

    // Then: The session bootstrap happened once
    let crumb_calls = fake.urls().iter().filter(|url| url.contains("getcrumb")).count();
    assert_eq!(crumb_calls, 1);
}

// =============================================================================
// Degraded lookups
// =============================================================================

#[tokio::test]
async fn revenue_feed_failure_only_blanks_quarterly_growth() {
    // Given: The revenue feed keeps answering 500
    let fake = Arc::new(FakeYahoo::healthy().with_revenue_status(vec![500]));
    let yahoo = source(&fake);

    // When: The ticker is fetched
    let inputs = yahoo.fetch(&ticker("XYZ")).await.expect("pages still succeed");
    let record = assemble_record(ticker("XYZ"), &inputs);

    // Then: The series is absent and only QoQ is blank
    assert!(inputs.revenue.is_none());
    assert_eq!(record.revenue_growth_qoq, "");
    assert_eq!(record.calculated_peg, "2.50");
}

#[tokio::test]
async fn unauthorized_feed_refreshes_the_crumb_once() {
    // Given: The feed rejects the first crumb, then accepts
    let fake = Arc::new(FakeYahoo::healthy().with_revenue_status(vec![401, 200]));
    let yahoo = source(&fake);

    // When: The ticker is fetched
    let inputs = yahoo.fetch(&ticker("XYZ")).await.expect("fetch succeeds");

    // Then: A second crumb was requested and the series arrived
    let crumb_calls = fake.urls().iter().filter(|url| url.contains("getcrumb")).count();
    assert_eq!(crumb_calls, 2);
    assert_eq!(inputs.revenue.map(|series| series.len()), Some(2));
}

#[tokio::test]
async fn unknown_ticker_is_not_found_and_the_batch_continues() {
    // Given: Yahoo has no pages for GHOST
    let fake = Arc::new(FakeYahoo::healthy().with_missing("GHOST"));
    let yahoo = source(&fake);

    // When: A batch including GHOST runs
    let outcome = run_batch(&[ticker("GHOST"), ticker("XYZ")], &yahoo).await;

    // Then: GHOST is blank with a not-found failure and XYZ is complete
    assert!(outcome.records[0].is_empty());
    assert_eq!(outcome.failures[0].code, "fetch.not_found");
    assert_eq!(outcome.records[1].calculated_peg, "2.50");

    // And: The 404 was not retried
    let ghost_calls = fake.urls().iter().filter(|url| url.contains("GHOST")).count();
    assert_eq!(ghost_calls, 1);
}

#[tokio::test]
async fn direct_fetch_of_unknown_ticker_reports_not_found() {
    // Given: Yahoo has no pages for GHOST
    let fake = Arc::new(FakeYahoo::healthy().with_missing("GHOST"));
    let yahoo = source(&fake);

    // When: It is fetched
    let err = yahoo.fetch(&ticker("GHOST")).await.expect_err("404");

    // Then: The error is a non-retryable not-found
    assert_eq!(err.kind(), FetchErrorKind::NotFound);
    assert!(!err.retryable());
}
