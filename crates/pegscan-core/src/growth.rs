//! Quarter-over-quarter revenue growth from the structured revenue feed.
//!
//! Independent of the scraped year-over-year figure; the two cover
//! different periods and are never reconciled.

use crate::extract::LabeledValue;
use crate::RevenueSeries;

/// `(latest - previous) / previous * 100`, rendered as `<2 decimals>%`.
pub fn quarter_over_quarter_growth(series: Option<&RevenueSeries>) -> LabeledValue {
    let Some((latest, previous)) = series.and_then(RevenueSeries::latest_pair) else {
        return LabeledValue::NotAvailable;
    };

    if previous == 0.0 {
        return LabeledValue::NotAvailable;
    }

    let growth = (latest - previous) / previous * 100.0;
    if !growth.is_finite() {
        return LabeledValue::NotAvailable;
    }

    LabeledValue::Present(format!("{growth:.2}%"))
}
