use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::post::PostRow;

/// Read-only query interface over the post store. The store filters and
/// orders server-side; the ranker never sees unpublished rows.
///
/// Carried in `FeedRanker` as `Arc<dyn PostStore>` so tests can substitute
/// an in-memory store.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All published posts, newest first.
    async fn fetch_published(&self) -> Result<Vec<PostRow>>;

    /// The `limit` most recently created published posts.
    async fn fetch_recent_published(&self, limit: i64) -> Result<Vec<PostRow>>;

    /// Published posts created at or after `cutoff`, newest first.
    async fn fetch_recent_window(&self, cutoff: DateTime<Utc>, limit: i64)
        -> Result<Vec<PostRow>>;

    /// Published posts of one `post_type`, newest first.
    async fn fetch_published_by_type(&self, post_type: &str) -> Result<Vec<PostRow>>;
}

/// Production store over Postgres.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "id, created_at, place_lat, place_lng, like_count, reply_count, post_type, is_published";

#[async_trait]
impl PostStore for PgPostStore {
    async fn fetch_published(&self) -> Result<Vec<PostRow>> {
        Ok(sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE is_published = TRUE ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn fetch_recent_published(&self, limit: i64) -> Result<Vec<PostRow>> {
        Ok(sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE is_published = TRUE ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn fetch_recent_window(
        &self,
        cutoff: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<PostRow>> {
        Ok(sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE is_published = TRUE AND created_at >= $1 \
             ORDER BY created_at DESC LIMIT $2"
        ))
        .bind(cutoff)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn fetch_published_by_type(&self, post_type: &str) -> Result<Vec<PostRow>> {
        Ok(sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE is_published = TRUE AND post_type = $1 \
             ORDER BY created_at DESC"
        ))
        .bind(post_type)
        .fetch_all(&self.pool)
        .await?)
    }
}
