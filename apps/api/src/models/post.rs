use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A community post as stored in Postgres. Read-only to the feed ranker:
/// the store filters on `is_published` server-side, so every row reaching
/// the scoring path is already published.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostRow {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub place_lat: Option<f64>,
    pub place_lng: Option<f64>,
    pub like_count: i64,
    pub reply_count: i64,
    pub post_type: String,
    pub is_published: bool,
}

impl PostRow {
    pub fn total_engagement(&self) -> i64 {
        self.like_count + self.reply_count
    }
}

/// Approximate user location, supplied by the caller per request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
}
