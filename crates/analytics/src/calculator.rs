use crate::error::AnalyticsError;
use crate::metrics::AssetMetrics;
use core_types::{AssetSeries, PricePoint};
use rust_decimal::Decimal;

/// A stateless calculator for deriving descriptive statistics from a price series.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsCalculator {}

impl MetricsCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the metrics of a series.
    ///
    /// # Arguments
    ///
    /// * `series` - All observations of one asset, in any order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AssetMetrics` or an `AnalyticsError` if the range
    /// overflows the decimal representation.
    pub fn calculate(&self, series: &AssetSeries) -> Result<AssetMetrics, AnalyticsError> {
        self.calculate_points(series.symbol(), series.points())
    }

    /// Calculates metrics over an arbitrary slice of observations for `symbol`.
    ///
    /// Everything is found in one linear scan. When several points share the earliest
    /// timestamp the first one encountered supplies `oldest`; when several share the
    /// latest timestamp the last one encountered supplies `newest`.
    pub fn calculate_points(
        &self,
        symbol: &str,
        points: &[PricePoint],
    ) -> Result<AssetMetrics, AnalyticsError> {
        let Some((first, rest)) = points.split_first() else {
            return Ok(AssetMetrics::empty(symbol));
        };

        let mut oldest = first;
        let mut newest = first;
        let mut max = first.price;
        let mut min = first.price;

        for point in rest {
            if point.timestamp < oldest.timestamp {
                oldest = point;
            }
            if point.timestamp >= newest.timestamp {
                newest = point;
            }
            max = max.max(point.price);
            min = min.min(point.price);
        }

        Ok(AssetMetrics {
            symbol: symbol.to_string(),
            oldest: Some(oldest.price),
            newest: Some(newest.price),
            max: Some(max),
            min: Some(min),
            normalized_range: self.normalized_range(symbol, max, min)?,
            points: points.len(),
        })
    }

    /// `(max - min) / min`, or `None` when `min` is zero.
    fn normalized_range(
        &self,
        symbol: &str,
        max: Decimal,
        min: Decimal,
    ) -> Result<Option<Decimal>, AnalyticsError> {
        if min.is_zero() {
            tracing::debug!(symbol, "Minimum price is zero; normalized range is undefined.");
            return Ok(None);
        }

        (max - min)
            .checked_div(min)
            .map(Some)
            .ok_or_else(|| {
                AnalyticsError::Calculation(format!(
                    "normalized range of {} overflows (max {}, min {})",
                    symbol, max, min
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::MetricField;
    use rust_decimal_macros::dec;

    fn series(symbol: &str, points: &[(i64, Decimal)]) -> AssetSeries {
        let mut series = AssetSeries::empty(symbol);
        for &(timestamp, price) in points {
            series.push(timestamp, price);
        }
        series
    }

    #[test]
    fn unordered_series_uses_timestamps_not_position() {
        let xrp = series("XRP", &[(100, dec!(0.5)), (200, dec!(0.8)), (50, dec!(0.6))]);

        let metrics = MetricsCalculator::new().calculate(&xrp).unwrap();

        assert_eq!(metrics.oldest, Some(dec!(0.6)));
        assert_eq!(metrics.newest, Some(dec!(0.8)));
        assert_eq!(metrics.max, Some(dec!(0.8)));
        assert_eq!(metrics.min, Some(dec!(0.5)));
        assert_eq!(metrics.normalized_range, Some(dec!(0.6)));
        assert_eq!(metrics.points, 3);
    }

    #[test]
    fn empty_series_has_absent_fields() {
        let metrics = MetricsCalculator::new().calculate(&AssetSeries::empty("ETH")).unwrap();
        assert_eq!(metrics, AssetMetrics::empty("ETH"));
        assert!(!metrics.has_data());
    }

    #[test]
    fn duplicate_timestamps_first_wins_for_oldest_last_wins_for_newest() {
        let doge = series(
            "DOGE",
            &[
                (10, dec!(1.0)),
                (10, dec!(2.0)),
                (20, dec!(3.0)),
                (20, dec!(4.0)),
            ],
        );

        let metrics = MetricsCalculator::new().calculate(&doge).unwrap();

        assert_eq!(metrics.oldest, Some(dec!(1.0)));
        assert_eq!(metrics.newest, Some(dec!(4.0)));
    }

    #[test]
    fn all_zero_prices_make_range_a_division_by_zero() {
        let zero = series("ZERO", &[(1, dec!(0)), (2, dec!(0))]);

        let metrics = MetricsCalculator::new().calculate(&zero).unwrap();

        assert_eq!(metrics.normalized_range, None);
        assert!(matches!(
            metrics.require(MetricField::NormalizedRange),
            Err(AnalyticsError::DivisionByZero(_))
        ));
    }

    #[test]
    fn single_point_has_zero_range() {
        let btc = series("BTC", &[(1, dec!(46813.21))]);
        let metrics = MetricsCalculator::new().calculate(&btc).unwrap();
        assert_eq!(metrics.normalized_range, Some(Decimal::ZERO));
        assert_eq!(metrics.oldest, metrics.newest);
    }

    #[test]
    fn oldest_and_newest_lie_within_min_and_max() {
        let ltc = series(
            "LTC",
            &[
                (5, dec!(130.2)),
                (1, dec!(148.1)),
                (9, dec!(121.9)),
                (3, dec!(152.7)),
                (7, dec!(139.0)),
            ],
        );

        let m = MetricsCalculator::new().calculate(&ltc).unwrap();
        let (min, max) = (m.min.unwrap(), m.max.unwrap());

        assert!(min <= max);
        for value in [m.oldest.unwrap(), m.newest.unwrap()] {
            assert!(min <= value && value <= max);
        }
        assert_eq!(m.normalized_range.unwrap(), (max - min) / min);
    }

    #[test]
    fn calculation_is_deterministic() {
        let xrp = series("XRP", &[(100, dec!(0.5)), (100, dec!(0.7)), (50, dec!(0.6))]);
        let calculator = MetricsCalculator::new();
        assert_eq!(calculator.calculate(&xrp).unwrap(), calculator.calculate(&xrp).unwrap());
    }
}
