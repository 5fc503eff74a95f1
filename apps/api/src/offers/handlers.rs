use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::flight::{
    FlightSearchEntry, FlightSearchParams, OfferTiming, RefreshCheck, UserProgress,
    UserProgressUpdate,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveCacheRequest {
    pub search_params: FlightSearchParams,
    pub results: Value,
    pub timing: OfferTiming,
    pub selected_offer_id: Option<String>,
    pub user_progress: Option<UserProgress>,
}

#[derive(Serialize)]
pub struct SaveCacheResponse {
    pub search_id: String,
}

/// Body for every lookup-style endpoint: the search parameters identify the
/// entry.
#[derive(Debug, Deserialize)]
pub struct SearchParamsBody {
    pub search_params: FlightSearchParams,
}

#[derive(Serialize)]
pub struct LookupResponse {
    pub cached: bool,
    pub entry: Option<FlightSearchEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub search_params: FlightSearchParams,
    pub progress: UserProgressUpdate,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOfferRequest {
    pub search_params: FlightSearchParams,
    pub offer_id: String,
}

#[derive(Serialize)]
pub struct TimeRemainingResponse {
    pub milliseconds: i64,
}

#[derive(Serialize)]
pub struct CachedSearchesResponse {
    pub count: usize,
    pub searches: Vec<FlightSearchEntry>,
}

#[derive(Serialize)]
pub struct ClearAllResponse {
    pub removed: usize,
}

/// POST /api/v1/flights/cache
pub async fn handle_save(
    State(state): State<AppState>,
    Json(req): Json<SaveCacheRequest>,
) -> Json<SaveCacheResponse> {
    let search_id = state
        .offers
        .save(
            &req.search_params,
            req.results,
            req.timing,
            req.selected_offer_id,
            req.user_progress,
        )
        .await;
    Json(SaveCacheResponse { search_id })
}

/// POST /api/v1/flights/cache/lookup
pub async fn handle_lookup(
    State(state): State<AppState>,
    Json(req): Json<SearchParamsBody>,
) -> Json<LookupResponse> {
    let entry = state.offers.load(&req.search_params).await;
    Json(LookupResponse { cached: entry.is_some(), entry })
}

/// POST /api/v1/flights/cache/refresh-check
pub async fn handle_refresh_check(
    State(state): State<AppState>,
    Json(req): Json<SearchParamsBody>,
) -> Json<RefreshCheck> {
    Json(state.offers.needs_refresh(&req.search_params).await)
}

/// POST /api/v1/flights/cache/time-remaining
pub async fn handle_time_remaining(
    State(state): State<AppState>,
    Json(req): Json<SearchParamsBody>,
) -> Json<TimeRemainingResponse> {
    let milliseconds = state.offers.time_remaining(&req.search_params).await;
    Json(TimeRemainingResponse { milliseconds })
}

/// PATCH /api/v1/flights/cache/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    Json(req): Json<ProgressRequest>,
) -> StatusCode {
    state
        .offers
        .update_user_progress(&req.search_params, req.progress)
        .await;
    StatusCode::NO_CONTENT
}

/// PATCH /api/v1/flights/cache/selected-offer
pub async fn handle_selected_offer(
    State(state): State<AppState>,
    Json(req): Json<SelectedOfferRequest>,
) -> StatusCode {
    state
        .offers
        .update_selected_offer(&req.search_params, req.offer_id)
        .await;
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/flights/cache
pub async fn handle_remove(
    State(state): State<AppState>,
    Json(req): Json<SearchParamsBody>,
) -> StatusCode {
    state.offers.remove(&req.search_params).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/flights/cache
/// Every cached search, for the "resume a previous search" surface.
pub async fn handle_list(State(state): State<AppState>) -> Json<CachedSearchesResponse> {
    let searches = state.offers.all_cached_searches().await;
    Json(CachedSearchesResponse { count: searches.len(), searches })
}

/// DELETE /api/v1/flights/cache/all
pub async fn handle_clear_all(
    State(state): State<AppState>,
) -> Result<Json<ClearAllResponse>, AppError> {
    let removed = state.offers.clear_all().await?;
    Ok(Json(ClearAllResponse { removed }))
}
