use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five statistics computed per asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    Oldest,
    Newest,
    Max,
    Min,
    NormalizedRange,
}

impl MetricField {
    pub const ALL: [MetricField; 5] = [
        MetricField::Oldest,
        MetricField::Newest,
        MetricField::Max,
        MetricField::Min,
        MetricField::NormalizedRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricField::Oldest => "oldest",
            MetricField::Newest => "newest",
            MetricField::Max => "max",
            MetricField::Min => "min",
            MetricField::NormalizedRange => "normalized_range",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricField {
    type Err = CoreError;

    /// Accepts the snake_case name as well as the kebab-case spelling used in URLs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "oldest" => Ok(MetricField::Oldest),
            "newest" => Ok(MetricField::Newest),
            "max" => Ok(MetricField::Max),
            "min" => Ok(MetricField::Min),
            "normalized_range" => Ok(MetricField::NormalizedRange),
            _ => Err(CoreError::InvalidInput("metric".to_string(), s.to_string())),
        }
    }
}
