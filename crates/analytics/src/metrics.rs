use crate::error::AnalyticsError;
use core_types::MetricField;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The descriptive statistics of one asset's price history.
///
/// This struct is the output of the `MetricsCalculator`. Every value is `None` when the
/// series had no points, so "no data" is never confused with a computed zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetrics {
    pub symbol: String,
    /// Price at the earliest timestamp.
    pub oldest: Option<Decimal>,
    /// Price at the latest timestamp.
    pub newest: Option<Decimal>,
    pub max: Option<Decimal>,
    pub min: Option<Decimal>,
    /// `(max - min) / min`. Also `None` when the minimum price is zero.
    pub normalized_range: Option<Decimal>,
    /// Number of observations the metrics were computed from.
    pub points: usize,
}

impl AssetMetrics {
    /// Metrics for a series without any observations.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            oldest: None,
            newest: None,
            max: None,
            min: None,
            normalized_range: None,
            points: 0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.points > 0
    }

    /// Returns a single statistic, or the reason it is unavailable.
    pub fn require(&self, field: MetricField) -> Result<Decimal, AnalyticsError> {
        let value = match field {
            MetricField::Oldest => self.oldest,
            MetricField::Newest => self.newest,
            MetricField::Max => self.max,
            MetricField::Min => self.min,
            MetricField::NormalizedRange => self.normalized_range,
        };

        match value {
            Some(value) => Ok(value),
            None if !self.has_data() => Err(AnalyticsError::NoData(self.symbol.clone())),
            // With data present only the range can be missing, and only for a zero minimum.
            None => Err(AnalyticsError::DivisionByZero(format!(
                "{} of {}",
                field, self.symbol
            ))),
        }
    }
}
