//! Forecast HTTP Routes
//!
//! The listing endpoint with its search/filter/sort criteria, plus metrics,
//! filter options, stats, and truncation.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::executor::{
    DatasetStats, FilterOptionEntry, PageParams, RecordPage, DEFAULT_LIMIT,
};
use crate::metrics::AccuracyReport;
use crate::query::{compile_listing, parse_criteria, FixedFilters};
use crate::schema::SchemaRegistry;

use super::errors::ApiError;
use super::server::AppState;

/// Forecast routes with shared state
pub fn forecast_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/forecast", get(list_handler))
        .route("/forecast/metrics", get(metrics_handler))
        .route("/forecast/filters", get(filter_options_handler))
        .route("/forecast/stats", get(stats_handler))
        .route("/forecast/all", delete(delete_all_handler))
        .with_state(state)
}

/// Query parameters of the listing endpoint
#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<usize>,
    offset: Option<usize>,
    #[serde(default)]
    all_records: bool,

    week_start_date: Option<String>,
    super_category: Option<String>,
    store_type: Option<String>,

    /// JSON search criteria, e.g. `{"article_id":"12345"}`
    search: Option<String>,
    /// JSON filter criteria, e.g. `{"forecast_qty":{"type":"range","min":10}}`
    filters: Option<String>,
    /// JSON sort criteria, e.g. `{"field":"forecast_qty","direction":"desc"}`
    sort: Option<String>,
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecordPage>, ApiError> {
    let criteria = parse_criteria(
        params.search.as_deref(),
        params.filters.as_deref(),
        params.sort.as_deref(),
    )?;

    let fixed = FixedFilters {
        week_start_date: params.week_start_date,
        super_category: params.super_category,
        store_type: params.store_type,
    };
    let listing = compile_listing(SchemaRegistry::forecast(), &fixed, &criteria)?;

    let page = PageParams {
        limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        offset: params.offset.unwrap_or(0),
        all_records: params.all_records,
    };

    Ok(Json(state.executor.list(listing, page)?))
}

async fn metrics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AccuracyReport>, ApiError> {
    Ok(Json(state.aggregator.report()?))
}

#[derive(Debug, Serialize)]
struct FilterOptionsResponse {
    filter_options: BTreeMap<String, FilterOptionEntry>,
}

async fn filter_options_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    Ok(Json(FilterOptionsResponse {
        filter_options: state.executor.filter_options()?,
    }))
}

async fn stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetStats>, ApiError> {
    Ok(Json(state.executor.stats()?))
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    message: String,
}

async fn delete_all_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.executor.clear()?;
    Ok(Json(DeleteResponse {
        message: "All forecast data deleted successfully".to_string(),
    }))
}
