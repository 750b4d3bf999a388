use serde::{Deserialize, Serialize};

use crate::TickerSymbol;

/// Header row of the nine-column output schema, in wire order.
pub const COLUMN_HEADERS: [&str; 9] = [
    "Ticker",
    "Forward P/E",
    "Vendor PEG",
    "Calculated PEG",
    "Price/Sales",
    "Qtrly Rev Growth YoY",
    "Qtrly Rev Growth QoQ",
    "1Y Rev Growth Est",
    "5Y Rev Growth Est",
];

/// Final per-ticker row. Every value field is display text; an empty string
/// means the value is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub ticker: TickerSymbol,
    pub forward_pe: String,
    pub vendor_peg: String,
    pub calculated_peg: String,
    pub price_to_sales: String,
    pub revenue_growth_yoy: String,
    pub revenue_growth_qoq: String,
    pub growth_estimate_1y: String,
    pub growth_estimate_5y: String,
}

impl OutputRecord {
    /// Degraded record: ticker preserved, every value field empty.
    pub fn unavailable(ticker: TickerSymbol) -> Self {
        Self {
            ticker,
            forward_pe: String::new(),
            vendor_peg: String::new(),
            calculated_peg: String::new(),
            price_to_sales: String::new(),
            revenue_growth_yoy: String::new(),
            revenue_growth_qoq: String::new(),
            growth_estimate_1y: String::new(),
            growth_estimate_5y: String::new(),
        }
    }

    /// The eight value fields in column order.
    pub fn values(&self) -> [&str; 8] {
        [
            self.forward_pe.as_str(),
            self.vendor_peg.as_str(),
            self.calculated_peg.as_str(),
            self.price_to_sales.as_str(),
            self.revenue_growth_yoy.as_str(),
            self.revenue_growth_qoq.as_str(),
            self.growth_estimate_1y.as_str(),
            self.growth_estimate_5y.as_str(),
        ]
    }

    /// All nine columns, ticker first.
    pub fn to_row(&self) -> [&str; 9] {
        let [a, b, c, d, e, f, g, h] = self.values();
        [self.ticker.as_str(), a, b, c, d, e, f, g, h]
    }

    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|value| value.is_empty())
    }
}
