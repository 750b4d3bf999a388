//! Display normalization for raw and derived values.

use crate::extract::LabeledValue;

/// Parse a decimal after removing thousands separators, percent signs and
/// surrounding whitespace. Non-finite numbers are rejected.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|ch| !matches!(ch, ',' | '%')).collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Normalize a value for output.
///
/// - the sentinel becomes an empty string
/// - text containing `%` becomes `<2 decimals>%`
/// - other numeric text becomes `<2 decimals>`
/// - text that does not parse is returned unchanged
pub fn format_value(value: &LabeledValue) -> String {
    match value {
        LabeledValue::NotAvailable => String::new(),
        LabeledValue::Present(raw) => format_raw(raw),
    }
}

fn format_raw(raw: &str) -> String {
    match parse_decimal(raw) {
        Some(number) if raw.contains('%') => format!("{number:.2}%"),
        Some(number) => format!("{number:.2}"),
        None => raw.to_owned(),
    }
}
