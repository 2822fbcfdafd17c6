use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single historical price observation, one per record line of a price source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub symbol: String,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: i64, symbol: impl Into<String>, price: Decimal) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            price,
        }
    }
}

/// All observations for one asset.
///
/// Points keep the order in which the source produced them; nothing here assumes
/// they are sorted by time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSeries {
    symbol: String,
    points: Vec<PricePoint>,
}

impl AssetSeries {
    /// Creates an empty series for `symbol`.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    /// Appends an observation, relabelling it with the series symbol.
    pub fn push(&mut self, timestamp: i64, price: Decimal) {
        self.points.push(PricePoint::new(timestamp, self.symbol.clone(), price));
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consumes the series and returns its points ordered by timestamp.
    ///
    /// The sort is stable, so points sharing a timestamp keep their source order.
    pub fn into_time_ordered(self) -> (String, Vec<PricePoint>) {
        let mut points = self.points;
        points.sort_by_key(|p| p.timestamp);
        (self.symbol, points)
    }
}
