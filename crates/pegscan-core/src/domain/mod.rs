//! # Domain Models
//!
//! Value types shared by every pipeline stage.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TickerSymbol`] | Validated, upper-cased ticker |
//! | [`TabularDocument`] | Table → row → cell view of a fetched page |
//! | [`RevenueSeries`] | Quarterly revenue, most-recent-first |
//! | [`OutputRecord`] | Nine-column result row |
//!
//! All types are immutable once built. Construction either validates
//! ([`TickerSymbol::parse`]) or normalizes ([`RevenueSeries::from_observations`]).

mod document;
mod record;
mod revenue;
mod ticker;

pub use document::{TableBlock, TableRow, TabularDocument};
pub use record::{OutputRecord, COLUMN_HEADERS};
pub use revenue::{RevenueObservation, RevenueSeries};
pub use ticker::{parse_ticker_list, TickerSymbol};
