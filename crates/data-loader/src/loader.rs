use crate::error::LoaderError;
use crate::parser::{RecordFormat, parse_series};
use crate::source::{PriceSource, discover_sources};
use configuration::DataSettings;
use core_types::AssetSeries;
use futures::future::join_all;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Reads every per-asset price source in a directory into an `AssetSeries`.
#[derive(Debug, Clone)]
pub struct SeriesLoader {
    prices_dir: PathBuf,
    extension: String,
    format: RecordFormat,
}

impl SeriesLoader {
    pub fn new(prices_dir: impl Into<PathBuf>, extension: impl Into<String>, format: RecordFormat) -> Self {
        Self {
            prices_dir: prices_dir.into(),
            extension: extension.into(),
            format,
        }
    }

    pub fn from_settings(settings: &DataSettings) -> Result<Self, LoaderError> {
        let format = RecordFormat {
            delimiter: settings.delimiter_byte()?,
            price_column: settings.price_column,
        };
        Ok(Self::new(&settings.prices_dir, &settings.extension, format))
    }

    pub fn prices_dir(&self) -> &std::path::Path {
        &self.prices_dir
    }

    /// Enumerates the sources this loader would read.
    pub fn sources(&self) -> Result<Vec<PriceSource>, LoaderError> {
        discover_sources(&self.prices_dir, &self.extension)
    }

    /// Reads and parses a single source. Blocking.
    pub fn load_source(&self, source: &PriceSource) -> Result<AssetSeries, LoaderError> {
        let file = File::open(&source.path).map_err(|e| LoaderError::Io {
            path: source.path.clone(),
            source: e,
        })?;
        parse_series(&source.symbol, &source.label(), BufReader::new(file), self.format)
    }

    /// Loads every source concurrently, one blocking task per file.
    ///
    /// Fails on the first source that cannot be read or parsed; no partial result is
    /// returned. Series come back in source-path order.
    pub async fn load_all(&self) -> Result<Vec<AssetSeries>, LoaderError> {
        let sources = self.sources()?;
        tracing::info!(
            dir = %self.prices_dir.display(),
            sources = sources.len(),
            "Loading price sources."
        );

        let tasks = sources.into_iter().map(|source| {
            let loader = self.clone();
            tokio::task::spawn_blocking(move || loader.load_source(&source))
        });

        let results = join_all(tasks).await;

        let mut all_series = Vec::with_capacity(results.len());
        for result in results {
            let series = result.map_err(|e| LoaderError::TaskFailed(e.to_string()))??;
            if series.is_empty() {
                tracing::warn!(symbol = series.symbol(), "Price source has no records.");
            }
            all_series.push(series);
        }

        Ok(all_series)
    }
}
