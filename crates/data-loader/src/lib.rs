//! # Price Series Loader
//!
//! Turns a directory of per-asset delimited price files into `AssetSeries` values.
//!
//! ## Public API
//!
//! - `SeriesLoader`: discovers the sources in a directory and loads them concurrently.
//! - `parse_series`: parses a single source from any reader.
//! - `symbol_from_path`: the `<SYMBOL>_<suffix>` naming convention.
//! - `LoaderError`: every way loading can fail. All of them are fatal to startup.

pub mod error;
pub mod loader;
pub mod parser;
pub mod source;

pub use error::LoaderError;
pub use loader::SeriesLoader;
pub use parser::{RecordFormat, parse_series};
pub use source::{PriceSource, discover_sources, symbol_from_path};
