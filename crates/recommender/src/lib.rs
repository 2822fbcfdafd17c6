//! # Recommender Query Engine
//!
//! Holds the process-wide `MetricsIndex` and answers every query the service exposes.
//!
//! ## Architectural Principles
//!
//! - **Build Once:** the index is built at startup from every price source and is never
//!   mutated. A reload builds a complete new index and swaps it in behind an `Arc`.
//! - **No I/O at Query Time:** lookups read the snapshot; the ranking is a sort of a
//!   handful of precomputed rows.
//! - **Typed Failures:** unknown assets, absent data and undefined ranges are distinct
//!   `QueryError` variants so the web layer can map each to a client error.
//!
//! ## Public API
//!
//! - `MetricsIndex`: symbol → metrics mapping plus the time-sorted observations.
//! - `QueryService`: summary, single-metric, ranking, daily-leader and symbol queries.
//! - `RankedAsset` / `by_normalized_range_desc`: the one place the ranking order is defined.

pub mod error;
pub mod index;
pub mod ranking;
pub mod responses;
pub mod service;

pub use error::{IndexError, QueryError};
pub use index::{IndexEntry, MetricsIndex};
pub use ranking::{RankedAsset, by_normalized_range_desc};
pub use responses::{AssetSummary, DailyLeader, MetricValue};
pub use service::{QueryService, normalize_symbol, parse_millis};
