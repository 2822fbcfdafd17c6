use analytics::AssetMetrics;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of the normalized-range ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedAsset {
    pub symbol: String,
    /// `None` when the range is undefined (no data, or a zero minimum).
    pub normalized_range: Option<Decimal>,
}

impl From<&AssetMetrics> for RankedAsset {
    fn from(metrics: &AssetMetrics) -> Self {
        Self {
            symbol: metrics.symbol.clone(),
            normalized_range: metrics.normalized_range,
        }
    }
}

/// The ranking order: highest normalized range first, ties by symbol ascending,
/// undefined ranges after every defined one.
pub fn by_normalized_range_desc(a: &RankedAsset, b: &RankedAsset) -> Ordering {
    match (a.normalized_range, b.normalized_range) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.symbol.cmp(&b.symbol)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.symbol.cmp(&b.symbol),
    }
}

/// Ranks every asset by [`by_normalized_range_desc`].
pub fn rank<'a>(metrics: impl IntoIterator<Item = &'a AssetMetrics>) -> Vec<RankedAsset> {
    let mut ranked: Vec<RankedAsset> = metrics.into_iter().map(RankedAsset::from).collect();
    ranked.sort_by(by_normalized_range_desc);
    ranked
}
