use chrono::NaiveDate;
use core_types::MetricField;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The oldest/newest/max/min values of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub oldest: Decimal,
    pub newest: Decimal,
    pub max: Decimal,
    pub min: Decimal,
}

/// A single statistic of one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricValue {
    pub symbol: String,
    pub metric: MetricField,
    pub value: Decimal,
}

/// The asset with the highest normalized range over one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLeader {
    pub symbol: String,
    pub normalized_range: Decimal,
    pub date: NaiveDate,
}
