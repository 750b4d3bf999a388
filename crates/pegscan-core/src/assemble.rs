//! Record assembly: one [`OutputRecord`] per ticker, failures degraded.

use crate::format::format_value;
use crate::growth::quarter_over_quarter_growth;
use crate::metrics::{resolve_metrics, Metric};
use crate::peg::{calculated_peg, peg_divergence};
use crate::source::{FetchError, TickerInputs};
use crate::{OutputRecord, TickerSymbol};

/// Run resolution, derivation and formatting for one ticker.
pub fn assemble_record(ticker: TickerSymbol, inputs: &TickerInputs) -> OutputRecord {
    let metrics = resolve_metrics(&inputs.statistics, &inputs.analysis);

    let forward_pe = metrics.get(Metric::ForwardPe);
    let vendor_peg = metrics.get(Metric::VendorPeg);
    let five_year = metrics.get(Metric::FiveYearGrowthEstimate);

    let local_peg = calculated_peg(forward_pe, five_year);
    let qoq = quarter_over_quarter_growth(inputs.revenue.as_ref());

    if let Some(divergence) = peg_divergence(vendor_peg, &local_peg) {
        tracing::debug!(ticker = %ticker, divergence, "vendor and calculated PEG differ");
    }

    OutputRecord {
        forward_pe: format_value(forward_pe),
        vendor_peg: format_value(vendor_peg),
        calculated_peg: format_value(&local_peg),
        price_to_sales: format_value(metrics.get(Metric::PriceToSales)),
        revenue_growth_yoy: format_value(metrics.get(Metric::QuarterlyRevenueGrowth)),
        revenue_growth_qoq: format_value(&qoq),
        growth_estimate_1y: format_value(metrics.get(Metric::OneYearGrowthEstimate)),
        growth_estimate_5y: format_value(five_year),
        ticker,
    }
}

/// Record for a ticker whose inputs may have failed to arrive.
pub fn assemble_or_degrade(
    ticker: TickerSymbol,
    inputs: Result<&TickerInputs, &FetchError>,
) -> OutputRecord {
    match inputs {
        Ok(inputs) => assemble_record(ticker, inputs),
        Err(error) => {
            tracing::warn!(ticker = %ticker, error = %error, "ticker degraded to empty record");
            OutputRecord::unavailable(ticker)
        }
    }
}

/// Fold already-fetched inputs into records, preserving order.
pub fn assemble_batch<I>(items: I) -> Vec<OutputRecord>
where
    I: IntoIterator<Item = (TickerSymbol, Result<TickerInputs, FetchError>)>,
{
    items
        .into_iter()
        .map(|(ticker, inputs)| assemble_or_degrade(ticker, inputs.as_ref()))
        .collect()
}
