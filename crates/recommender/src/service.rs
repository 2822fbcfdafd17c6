use crate::error::QueryError;
use crate::index::MetricsIndex;
use crate::ranking::{self, RankedAsset, by_normalized_range_desc};
use crate::responses::{AssetSummary, DailyLeader, MetricValue};
use analytics::{AssetMetrics, MetricsCalculator};
use chrono::{DateTime, Duration, NaiveDate};
use core_types::MetricField;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// The query surface over a `MetricsIndex`.
///
/// Every operation works on a snapshot of the current index, so a concurrent
/// [`QueryService::reload`] never changes the data a query is already reading.
#[derive(Debug)]
pub struct QueryService {
    index: RwLock<Arc<MetricsIndex>>,
    calculator: MetricsCalculator,
}

impl QueryService {
    pub fn new(index: MetricsIndex) -> Self {
        Self {
            index: RwLock::new(Arc::new(index)),
            calculator: MetricsCalculator::new(),
        }
    }

    /// The index currently being served.
    pub fn snapshot(&self) -> Arc<MetricsIndex> {
        match self.index.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Swaps in a freshly built index and returns the one it replaced.
    pub fn reload(&self, index: MetricsIndex) -> Arc<MetricsIndex> {
        let next = Arc::new(index);
        let previous = match self.index.write() {
            Ok(mut guard) => std::mem::replace(&mut *guard, next),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), next),
        };
        tracing::info!(
            previous_assets = previous.len(),
            assets = self.snapshot().len(),
            "Metrics index replaced."
        );
        previous
    }

    /// Oldest, newest, max and min price of `symbol`.
    pub fn asset_summary(&self, symbol: &str) -> Result<AssetSummary, QueryError> {
        let index = self.snapshot();
        let metrics = lookup(&index, symbol)?;

        Ok(AssetSummary {
            oldest: metrics.require(MetricField::Oldest)?,
            newest: metrics.require(MetricField::Newest)?,
            max: metrics.require(MetricField::Max)?,
            min: metrics.require(MetricField::Min)?,
        })
    }

    /// A single statistic of `symbol`.
    pub fn metric(&self, symbol: &str, field: MetricField) -> Result<MetricValue, QueryError> {
        let index = self.snapshot();
        let metrics = lookup(&index, symbol)?;

        Ok(MetricValue {
            symbol: metrics.symbol.clone(),
            metric: field,
            value: metrics.require(field)?,
        })
    }

    /// Every asset, highest normalized range first.
    pub fn ranked_by_normalized_range(&self) -> Vec<RankedAsset> {
        let index = self.snapshot();
        ranking::rank(index.entries().map(|(_, entry)| entry.metrics()))
    }

    /// The asset whose prices moved the most, relative to their low, during the UTC day
    /// containing `timestamp_ms`.
    ///
    /// Ranges are recomputed from that day's observations only. Assets without
    /// observations that day, or with a zero minimum that day, are not candidates.
    pub fn highest_normalized_range_for_date(
        &self,
        timestamp_ms: i64,
    ) -> Result<DailyLeader, QueryError> {
        let (date, start, end) = utc_day_bounds(timestamp_ms)?;
        let index = self.snapshot();

        let mut leader: Option<RankedAsset> = None;
        for (symbol, entry) in index.entries() {
            let day = self.calculator.calculate_points(symbol, entry.window(start, end))?;
            if day.normalized_range.is_none() {
                continue;
            }
            let candidate = RankedAsset::from(&day);
            let replaces = leader.as_ref().is_none_or(|current| {
                by_normalized_range_desc(&candidate, current).is_lt()
            });
            if replaces {
                leader = Some(candidate);
            }
        }

        match leader {
            Some(RankedAsset {
                symbol,
                normalized_range: Some(normalized_range),
            }) => Ok(DailyLeader {
                symbol,
                normalized_range,
                date,
            }),
            _ => Err(QueryError::NoData(format!("no asset has price data on {}", date))),
        }
    }

    /// All asset symbols in the index, sorted.
    pub fn known_symbols(&self) -> BTreeSet<String> {
        self.snapshot().symbols().map(str::to_string).collect()
    }
}

fn lookup<'a>(index: &'a MetricsIndex, symbol: &str) -> Result<&'a AssetMetrics, QueryError> {
    let symbol = normalize_symbol(symbol)?;
    index
        .metrics(&symbol)
        .ok_or(QueryError::UnknownAsset(symbol))
}

/// Symbols are stored upper-cased; lookups accept any case and surrounding whitespace.
pub fn normalize_symbol(symbol: &str) -> Result<String, QueryError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(QueryError::InvalidInput("asset symbol must not be empty".to_string()));
    }
    Ok(symbol.to_ascii_uppercase())
}

/// Parses a millisecond timestamp supplied as text.
pub fn parse_millis(raw: &str) -> Result<i64, QueryError> {
    raw.trim().parse::<i64>().map_err(|_| {
        QueryError::InvalidInput(format!("'{}' is not a timestamp in milliseconds", raw))
    })
}

/// The UTC date containing `timestamp_ms` and its `[start, end)` bounds in milliseconds.
fn utc_day_bounds(timestamp_ms: i64) -> Result<(NaiveDate, i64, i64), QueryError> {
    if timestamp_ms < 0 {
        return Err(QueryError::InvalidInput(format!(
            "timestamp {} is before the Unix epoch",
            timestamp_ms
        )));
    }
    let instant = DateTime::from_timestamp_millis(timestamp_ms).ok_or_else(|| {
        QueryError::InvalidInput(format!("timestamp {} is out of range", timestamp_ms))
    })?;

    let date = instant.date_naive();
    let start = date
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc().timestamp_millis())
        .ok_or_else(|| QueryError::InvalidInput(format!("no midnight for {}", date)))?;
    let end = start + Duration::days(1).num_milliseconds();

    Ok((date, start, end))
}
