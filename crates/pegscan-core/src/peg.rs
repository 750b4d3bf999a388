//! Locally computed PEG ratio and its cross-check against the vendor figure.

use crate::extract::LabeledValue;
use crate::format::parse_decimal;

/// `forward P/E / five-year growth`, with growth read as a percentage
/// magnitude ("15%" divides by 15). Rendered with two decimals.
pub fn calculated_peg(forward_pe: &LabeledValue, growth_estimate: &LabeledValue) -> LabeledValue {
    let (Some(pe), Some(growth)) = (
        forward_pe.as_str().and_then(parse_decimal),
        growth_estimate.as_str().and_then(parse_decimal),
    ) else {
        return LabeledValue::NotAvailable;
    };

    if growth == 0.0 {
        return LabeledValue::NotAvailable;
    }

    let ratio = pe / growth;
    if !ratio.is_finite() {
        return LabeledValue::NotAvailable;
    }

    LabeledValue::Present(format!("{ratio:.2}"))
}

/// Absolute difference between vendor and locally computed PEG, when both
/// are numeric.
pub fn peg_divergence(vendor: &LabeledValue, calculated: &LabeledValue) -> Option<f64> {
    let vendor = vendor.as_str().and_then(parse_decimal)?;
    let calculated = calculated.as_str().and_then(parse_decimal)?;
    Some((vendor - calculated).abs())
}
