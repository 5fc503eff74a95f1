use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feed::scoring::ScoredPost;
use crate::models::post::{PostRow, UserLocation};
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl FeedQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// A location only counts when both coordinates are present.
    fn location(&self) -> Option<UserLocation> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(UserLocation { lat, lng }),
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub page: u32,
    pub limit: u32,
    pub posts: Vec<ScoredPost>,
}

#[derive(Serialize)]
pub struct RecentFeedResponse {
    pub limit: u32,
    pub posts: Vec<PostRow>,
}

/// GET /api/v1/feed
pub async fn handle_feed(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Json<FeedResponse> {
    let (page, limit) = (q.page(), q.limit());
    let posts = state.feed.get_feed_posts(page, limit, q.location()).await;
    Json(FeedResponse { page, limit, posts })
}

/// GET /api/v1/feed/popular
pub async fn handle_popular(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Json<FeedResponse> {
    let limit = q.limit();
    let posts = state.feed.get_popular_posts(limit, q.location()).await;
    Json(FeedResponse { page: 1, limit, posts })
}

/// GET /api/v1/feed/recent
pub async fn handle_recent(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Json<RecentFeedResponse> {
    let limit = q.limit();
    let posts = state.feed.get_recent_posts(limit).await;
    Json(RecentFeedResponse { limit, posts })
}

/// GET /api/v1/feed/destinations
pub async fn handle_destinations(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Json<FeedResponse> {
    let (page, limit) = (q.page(), q.limit());
    let posts = state.feed.get_destination_posts(page, limit, q.location()).await;
    Json(FeedResponse { page, limit, posts })
}

/// GET /api/v1/feed/around-the-world
/// Distance filtering needs the caller's location, so lat/lng are required
/// here rather than optional.
pub async fn handle_around_the_world(
    State(state): State<AppState>,
    Query(q): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let location = q.location().ok_or_else(|| {
        AppError::Validation("lat and lng are required for the around-the-world feed".to_string())
    })?;
    let (page, limit) = (q.page(), q.limit());
    let posts = state
        .feed
        .get_around_the_world_posts(page, limit, Some(location))
        .await;
    Ok(Json(FeedResponse { page, limit, posts }))
}
