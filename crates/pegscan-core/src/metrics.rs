//! Metric resolution: which document and which labels back each metric.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::extract::{extract_field, LabeledValue};
use crate::TabularDocument;

/// Which of the two per-ticker pages a metric is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Statistics,
    Analysis,
}

impl DocumentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Statistics => "statistics",
            Self::Analysis => "analysis",
        }
    }
}

/// The fixed set of scraped metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    ForwardPe,
    VendorPeg,
    PriceToSales,
    QuarterlyRevenueGrowth,
    OneYearGrowthEstimate,
    FiveYearGrowthEstimate,
}

impl Metric {
    /// Declared resolution order.
    pub const ALL: [Metric; 6] = [
        Self::ForwardPe,
        Self::VendorPeg,
        Self::PriceToSales,
        Self::QuarterlyRevenueGrowth,
        Self::OneYearGrowthEstimate,
        Self::FiveYearGrowthEstimate,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForwardPe => "forward_pe",
            Self::VendorPeg => "vendor_peg",
            Self::PriceToSales => "price_to_sales",
            Self::QuarterlyRevenueGrowth => "quarterly_revenue_growth",
            Self::OneYearGrowthEstimate => "one_year_growth_estimate",
            Self::FiveYearGrowthEstimate => "five_year_growth_estimate",
        }
    }

    pub const fn document(self) -> DocumentKind {
        match self {
            Self::OneYearGrowthEstimate | Self::FiveYearGrowthEstimate => DocumentKind::Analysis,
            _ => DocumentKind::Statistics,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ForwardPe => "Forward P/E",
            Self::VendorPeg => "PEG Ratio (5 yr expected)",
            Self::PriceToSales => "Price/Sales",
            Self::QuarterlyRevenueGrowth => "Quarterly Revenue Growth",
            Self::OneYearGrowthEstimate => "Next Year",
            Self::FiveYearGrowthEstimate => "Next 5 Years (per annum)",
        }
    }

    /// Alternate labels, tried in order once the primary label misses.
    pub const fn fallbacks(self) -> &'static [&'static str] {
        match self {
            Self::VendorPeg => &["PEG Ratio"],
            Self::OneYearGrowthEstimate => &["Growth Estimate Next Year"],
            Self::FiveYearGrowthEstimate => {
                &["Growth Est Next 5Y", "5 Year Growth Est", "Next Five Years"]
            }
            Self::ForwardPe | Self::PriceToSales | Self::QuarterlyRevenueGrowth => &[],
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved value per [`Metric`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSet {
    values: [LabeledValue; 6],
}

impl MetricSet {
    pub fn get(&self, metric: Metric) -> &LabeledValue {
        &self.values[metric.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &LabeledValue)> {
        Metric::ALL.into_iter().zip(self.values.iter())
    }

    pub fn missing(&self) -> impl Iterator<Item = Metric> + '_ {
        self.iter()
            .filter(|(_, value)| !value.is_available())
            .map(|(metric, _)| metric)
    }
}

/// Resolve every metric against the statistics and analysis documents.
pub fn resolve_metrics(statistics: &TabularDocument, analysis: &TabularDocument) -> MetricSet {
    let values = Metric::ALL.map(|metric| {
        let document = match metric.document() {
            DocumentKind::Statistics => statistics,
            DocumentKind::Analysis => analysis,
        };
        let value = extract_field(document, metric.label(), metric.fallbacks());
        if !value.is_available() {
            tracing::debug!(
                metric = metric.as_str(),
                document = metric.document().as_str(),
                "metric label not found"
            );
        }
        value
    });

    MetricSet { values }
}
