use crate::error::IndexError;
use analytics::{AssetMetrics, MetricsCalculator};
use chrono::{DateTime, Utc};
use core_types::{AssetSeries, PricePoint};
use data_loader::SeriesLoader;
use std::collections::BTreeMap;

/// Everything the index keeps for one asset.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    metrics: AssetMetrics,
    /// Observations sorted by timestamp, kept for date-scoped queries.
    points: Vec<PricePoint>,
}

impl IndexEntry {
    pub fn metrics(&self) -> &AssetMetrics {
        &self.metrics
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Points with `start <= timestamp < end`.
    pub fn window(&self, start: i64, end: i64) -> &[PricePoint] {
        let lo = self.points.partition_point(|p| p.timestamp < start);
        let hi = self.points.partition_point(|p| p.timestamp < end);
        &self.points[lo..hi.max(lo)]
    }
}

/// The read-only mapping from asset symbol to its computed metrics.
///
/// Built once from every loaded series and never mutated afterwards; a refresh builds a
/// whole new index.
#[derive(Debug, Clone)]
pub struct MetricsIndex {
    entries: BTreeMap<String, IndexEntry>,
    built_at: DateTime<Utc>,
}

impl MetricsIndex {
    /// Reduces every series to metrics. Fails without a partial result if any
    /// calculation fails or two series share a symbol.
    pub fn build(series: impl IntoIterator<Item = AssetSeries>) -> Result<Self, IndexError> {
        let calculator = MetricsCalculator::new();
        let mut entries = BTreeMap::new();

        for series in series {
            let metrics = calculator.calculate(&series)?;
            let (symbol, points) = series.into_time_ordered();
            if entries.contains_key(&symbol) {
                return Err(IndexError::DuplicateSymbol(symbol));
            }
            entries.insert(symbol, IndexEntry { metrics, points });
        }

        let index = Self {
            entries,
            built_at: Utc::now(),
        };
        tracing::info!(
            assets = index.len(),
            points = index.entries.values().map(|e| e.points.len()).sum::<usize>(),
            "Metrics index built."
        );
        Ok(index)
    }

    /// Loads every source the loader knows about and builds the index from them.
    pub async fn load(loader: &SeriesLoader) -> Result<Self, IndexError> {
        let series = loader.load_all().await?;
        Self::build(series)
    }

    pub fn get(&self, symbol: &str) -> Option<&IndexEntry> {
        self.entries.get(symbol)
    }

    pub fn metrics(&self, symbol: &str) -> Option<&AssetMetrics> {
        self.get(symbol).map(IndexEntry::metrics)
    }

    /// Entries in ascending symbol order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(symbol, entry)| (symbol.as_str(), entry))
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}
