//! # Asset Metrics Calculator
//!
//! This crate reduces a historical price series to the five descriptive statistics the
//! recommender serves: oldest, newest, max, min and the normalized range `(max - min) / min`.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** It has no knowledge of files or servers. It depends only on `core-types`.
//! - **Stateless Calculation:** `MetricsCalculator` takes a series as input and produces
//!   `AssetMetrics` as output, which makes it deterministic and easy to test.
//!
//! ## Public API
//!
//! - `MetricsCalculator`: the linear-scan reduction.
//! - `AssetMetrics`: the per-asset result. Fields are `None` when there is no data.
//! - `AnalyticsError`: `NoData`, `DivisionByZero` (a zero minimum) and overflow.

// Declare the modules that constitute this crate.
pub mod calculator;
pub mod error;
pub mod metrics;

// Re-export the key components to create a clean, public-facing API.
pub use calculator::MetricsCalculator;
pub use error::AnalyticsError;
pub use metrics::AssetMetrics;
