use crate::error::LoaderError;
use core_types::AssetSeries;
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

/// Column layout of a price source. The timestamp is always the first field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    pub delimiter: u8,
    pub price_column: usize,
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            price_column: 2,
        }
    }
}

/// Parses one delimited price source into a series for `symbol`.
///
/// The first record is a header and is skipped. Any record that does not yield a
/// non-negative integer timestamp and a non-negative decimal price aborts the parse;
/// bad rows are never skipped silently. `file` only labels errors.
pub fn parse_series<R: Read>(
    symbol: &str,
    file: &str,
    reader: R,
    format: RecordFormat,
) -> Result<AssetSeries, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut series = AssetSeries::empty(symbol);

    for result in reader.records() {
        let record = result.map_err(|source| LoaderError::Csv {
            file: file.to_string(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let malformed = |reason: String| LoaderError::MalformedRecord {
            file: file.to_string(),
            line,
            reason,
        };

        let raw_timestamp = record
            .get(0)
            .ok_or_else(|| malformed("missing timestamp field".to_string()))?;
        let timestamp: i64 = raw_timestamp
            .parse()
            .map_err(|_| malformed(format!("timestamp '{}' is not an integer", raw_timestamp)))?;
        if timestamp < 0 {
            return Err(malformed(format!("timestamp {} is negative", timestamp)));
        }

        let raw_price = record.get(format.price_column).ok_or_else(|| {
            malformed(format!(
                "expected a price in field {}, found {} fields",
                format.price_column,
                record.len()
            ))
        })?;
        let price = parse_price(raw_price)
            .ok_or_else(|| malformed(format!("price '{}' is not a decimal number", raw_price)))?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(malformed(format!("price {} is negative", price)));
        }

        series.push(timestamp, price);
    }

    tracing::debug!(symbol, file, points = series.len(), "Parsed price source.");
    Ok(series)
}

/// Accepts plain decimals and scientific notation such as `1.5e-5`.
fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}
