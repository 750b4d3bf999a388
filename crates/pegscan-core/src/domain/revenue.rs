use serde::{Deserialize, Serialize};
use time::Date;

/// One reported quarterly revenue figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueObservation {
    pub as_of: Date,
    pub value: f64,
}

impl RevenueObservation {
    pub const fn new(as_of: Date, value: f64) -> Self {
        Self { as_of, value }
    }
}

/// Quarterly revenue observations ordered most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSeries {
    observations: Vec<RevenueObservation>,
}

impl RevenueSeries {
    /// Sort by date descending and drop non-finite values.
    pub fn from_observations(observations: impl IntoIterator<Item = RevenueObservation>) -> Self {
        let mut observations: Vec<RevenueObservation> = observations
            .into_iter()
            .filter(|observation| observation.value.is_finite())
            .collect();
        observations.sort_by(|a, b| b.as_of.cmp(&a.as_of));
        Self { observations }
    }

    /// Values already in most-recent-first order, without dates.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            observations: values
                .into_iter()
                .filter(|value| value.is_finite())
                .map(|value| RevenueObservation::new(Date::MIN, value))
                .collect(),
        }
    }

    pub fn observations(&self) -> &[RevenueObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The two most recent values as `(latest, previous)`.
    pub fn latest_pair(&self) -> Option<(f64, f64)> {
        match self.observations.as_slice() {
            [latest, previous, ..] => Some((latest.value, previous.value)),
            _ => None,
        }
    }
}
