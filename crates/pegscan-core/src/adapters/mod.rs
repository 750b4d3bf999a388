//! Network-backed [`TickerSource`](crate::TickerSource) implementations.

pub mod yahoo;

pub use yahoo::{YahooAuthManager, YahooSource};
