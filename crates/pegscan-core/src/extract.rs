//! Label-driven field lookup over a [`TabularDocument`].
//!
//! A label matches a cell when the lower-cased cell text contains the
//! lower-cased label. The value is the text of the next cell in the same
//! row. Each label is searched across the whole document before the next
//! alternate is tried.

use serde::{Deserialize, Serialize};

use crate::TabularDocument;

/// Result of a lookup: a raw text value or the "not available" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LabeledValue {
    NotAvailable,
    Present(String),
}

impl LabeledValue {
    pub fn present(value: impl Into<String>) -> Self {
        Self::Present(value.into())
    }

    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::NotAvailable => None,
            Self::Present(value) => Some(value),
        }
    }

    /// Evaluate `fallback` only when this value is the sentinel.
    pub fn or_else(self, fallback: impl FnOnce() -> LabeledValue) -> LabeledValue {
        match self {
            Self::NotAvailable => fallback(),
            present => present,
        }
    }
}

impl From<Option<String>> for LabeledValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::NotAvailable, Self::Present)
    }
}

/// Look up `label`, then each of `alternates` in order.
pub fn extract_field(
    document: &TabularDocument,
    label: &str,
    alternates: &[&str],
) -> LabeledValue {
    std::iter::once(label)
        .chain(alternates.iter().copied())
        .find_map(|candidate| find_value(document, candidate))
        .map(str::to_owned)
        .into()
}

/// Text of the cell following the first cell containing `label`.
pub fn find_value<'a>(document: &'a TabularDocument, label: &str) -> Option<&'a str> {
    let needle = label.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    document.rows().find_map(|row| {
        let cells = row.cells();
        cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.to_lowercase().contains(&needle))
            .find_map(|(index, _)| cells.get(index + 1))
            .map(String::as_str)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(rows: Vec<Vec<&str>>) -> TabularDocument {
        TabularDocument::from_cells(vec![rows])
    }

    #[test]
    fn substring_label_matches_qualified_cell() {
        let document = doc(vec![vec!["PEG Ratio (5 yr expected)", "1.23"]]);
        assert_eq!(
            extract_field(&document, "PEG Ratio", &[]),
            LabeledValue::present("1.23")
        );
    }

    #[test]
    fn match_is_case_insensitive() {
        let document = doc(vec![vec!["forward p/e 1", "20.5"]]);
        assert_eq!(find_value(&document, "Forward P/E"), Some("20.5"));
    }

    #[test]
    fn label_in_last_cell_is_skipped_and_scan_continues() {
        let document = TabularDocument::from_cells(vec![
            vec![vec!["Currency in USD", "Current Year", "Next Year (2026)"]],
            vec![vec!["Next Year", "12.40%"]],
        ]);
        assert_eq!(find_value(&document, "Next Year"), Some("12.40%"));
    }

    #[test]
    fn primary_label_wins_over_earlier_alternate() {
        let document = doc(vec![
            vec!["5 Year Growth Est", "18%"],
            vec!["Next 5 Years (per annum)", "11%"],
        ]);
        let value = extract_field(&document, "Next 5 Years (per annum)", &["5 Year Growth Est"]);
        assert_eq!(value, LabeledValue::present("11%"));
    }

    #[test]
    fn alternates_are_tried_in_order() {
        let document = doc(vec![
            vec!["Next Five Years", "9%"],
            vec!["5 Year Growth Est", "18%"],
        ]);
        let value = extract_field(
            &document,
            "Next 5 Years (per annum)",
            &["Growth Est Next 5Y", "5 Year Growth Est", "Next Five Years"],
        );
        assert_eq!(value, LabeledValue::present("18%"));
    }

    #[test]
    fn later_cell_in_same_row_can_match() {
        let document = doc(vec![vec!["Beta", "1.1", "Price/Sales (ttm)", "7.8"]]);
        assert_eq!(find_value(&document, "Price/Sales"), Some("7.8"));
    }

    #[test]
    fn missing_label_and_empty_document_yield_sentinel() {
        let document = doc(vec![vec!["Beta", "1.1"]]);
        assert_eq!(extract_field(&document, "Forward P/E", &[]), LabeledValue::NotAvailable);
        assert_eq!(
            extract_field(&TabularDocument::empty(), "Forward P/E", &["PEG"]),
            LabeledValue::NotAvailable
        );
    }

    #[test]
    fn blank_label_matches_nothing() {
        let document = doc(vec![vec!["Beta", "1.1"]]);
        assert_eq!(find_value(&document, "  "), None);
    }
}
