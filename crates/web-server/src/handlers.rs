use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use core_types::MetricField;
use recommender::{
    parse_millis, AssetSummary, DailyLeader, MetricValue, MetricsIndex, QueryError, RankedAsset,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ReloadSummary {
    pub assets: usize,
    pub built_at: DateTime<Utc>,
}

/// # GET /cryptos/
/// Lists every asset the index knows about.
pub async fn list_symbols(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.service.known_symbols().into_iter().collect())
}

/// # GET /cryptos/:crypto/oldest-newest-min-max
pub async fn get_oldest_newest_min_max(
    Path(crypto): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AssetSummary>, AppError> {
    let summary = state.service.asset_summary(&crypto)?;
    Ok(Json(summary))
}

/// # GET /cryptos/:crypto/metrics/:metric
/// `metric` is one of `oldest`, `newest`, `max`, `min`, `normalized-range`.
pub async fn get_metric(
    Path((crypto, metric)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MetricValue>, AppError> {
    let field = metric
        .parse::<MetricField>()
        .map_err(|e| QueryError::InvalidInput(e.to_string()))?;
    let value = state.service.metric(&crypto, field)?;
    Ok(Json(value))
}

/// # GET /cryptos/descending-normalized
/// All assets, highest normalized range first.
pub async fn get_descending_normalized(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<RankedAsset>> {
    Json(state.service.ranked_by_normalized_range())
}

/// # GET /cryptos/highest-normalized/:millis
/// The asset with the highest normalized range on the UTC day containing `millis`.
pub async fn get_highest_normalized_for_date(
    Path(millis): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DailyLeader>, AppError> {
    let timestamp = parse_millis(&millis)?;
    let leader = state.service.highest_normalized_range_for_date(timestamp)?;
    Ok(Json(leader))
}

/// # POST /api/reload
/// Re-reads the price directory and swaps the new index in. On failure the
/// current index keeps serving.
pub async fn reload_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadSummary>, AppError> {
    let index = MetricsIndex::load(&state.loader).await?;
    let summary = ReloadSummary {
        assets: index.len(),
        built_at: index.built_at(),
    };
    state.service.reload(index);
    Ok(Json(summary))
}
