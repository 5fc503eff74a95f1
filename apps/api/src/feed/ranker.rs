use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::warn;

use crate::feed::scoring::{score_post, FeedWeights, ScoredPost, FAR_AWAY_KM};
use crate::feed::store::PostStore;
use crate::models::post::{PostRow, UserLocation};

/// Window for the "recent" feed.
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// The popular feed samples this multiple of `limit` most-recent posts
/// before sorting by popularity. Recency-biased by construction: it is not
/// a global top-k over all posts.
pub const POPULAR_SAMPLE_FACTOR: u32 = 2;

/// Ranks community posts into the various feed views.
///
/// Fail-open: every store error is logged and surfaced as an empty page.
/// Callers must treat an empty result as "no posts or fetch failed", never
/// as a hard error signal.
#[derive(Clone)]
pub struct FeedRanker {
    store: Arc<dyn PostStore>,
}

impl FeedRanker {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// The general feed: every published post scored with the standard
    /// weights, sorted by final score, paginated.
    pub async fn get_feed_posts(
        &self,
        page: u32,
        limit: u32,
        user_location: Option<UserLocation>,
    ) -> Vec<ScoredPost> {
        let posts = match self.store.fetch_published().await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("feed fetch failed, returning empty page: {e:#}");
                return Vec::new();
            }
        };
        let mut scored = score_all(&posts, user_location, &FeedWeights::STANDARD);
        sort_by_final_score(&mut scored);
        paginate(scored, page, limit)
    }

    /// The `limit` most popular posts among the `2 × limit` most recent.
    pub async fn get_popular_posts(
        &self,
        limit: u32,
        user_location: Option<UserLocation>,
    ) -> Vec<ScoredPost> {
        let sample = i64::from(limit.saturating_mul(POPULAR_SAMPLE_FACTOR));
        let posts = match self.store.fetch_recent_published(sample).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("popular feed fetch failed, returning empty page: {e:#}");
                return Vec::new();
            }
        };
        let mut scored = score_all(&posts, user_location, &FeedWeights::STANDARD);
        scored.sort_by(|a, b| {
            b.popularity_score
                .partial_cmp(&a.popularity_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.post.created_at.cmp(&a.post.created_at))
        });
        scored.truncate(limit as usize);
        scored
    }

    /// Posts created within the last 24h, newest first, unscored.
    pub async fn get_recent_posts(&self, limit: u32) -> Vec<PostRow> {
        let cutoff = Utc::now() - Duration::hours(RECENT_WINDOW_HOURS);
        match self.store.fetch_recent_window(cutoff, i64::from(limit)).await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("recent feed fetch failed, returning empty page: {e:#}");
                Vec::new()
            }
        }
    }

    /// Destination posts only, ranked with the destination weighting
    /// (popularity-heavy, no engagement term).
    pub async fn get_destination_posts(
        &self,
        page: u32,
        limit: u32,
        user_location: Option<UserLocation>,
    ) -> Vec<ScoredPost> {
        let posts = match self.store.fetch_published_by_type("destination").await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("destination feed fetch failed, returning empty page: {e:#}");
                return Vec::new();
            }
        };
        let mut scored = score_all(&posts, user_location, &FeedWeights::DESTINATION);
        sort_by_final_score(&mut scored);
        paginate(scored, page, limit)
    }

    /// Posts farther than 1000 km from the user. Requires a user location;
    /// posts without coordinates are excluded from this bucket, not
    /// defaulted in.
    pub async fn get_around_the_world_posts(
        &self,
        page: u32,
        limit: u32,
        user_location: Option<UserLocation>,
    ) -> Vec<ScoredPost> {
        let Some(location) = user_location else {
            return Vec::new();
        };
        let posts = match self.store.fetch_published().await {
            Ok(posts) => posts,
            Err(e) => {
                warn!("around-the-world fetch failed, returning empty page: {e:#}");
                return Vec::new();
            }
        };
        let mut scored = score_all(&posts, Some(location), &FeedWeights::STANDARD);
        scored.retain(|s| matches!(s.distance_km, Some(d) if d > FAR_AWAY_KM));
        sort_by_final_score(&mut scored);
        paginate(scored, page, limit)
    }
}

fn score_all(
    posts: &[PostRow],
    user_location: Option<UserLocation>,
    weights: &FeedWeights,
) -> Vec<ScoredPost> {
    let now = Utc::now();
    posts
        .iter()
        .map(|post| score_post(post, user_location, weights, now))
        .collect()
}

/// Descending by final score; `created_at` descending breaks ties so the
/// ordering is deterministic.
fn sort_by_final_score(scored: &mut [ScoredPost]) {
    scored.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.post.created_at.cmp(&a.post.created_at))
    });
}

fn paginate(scored: Vec<ScoredPost>, page: u32, limit: u32) -> Vec<ScoredPost> {
    let page = page.max(1);
    let start = (page as usize - 1) * limit as usize;
    scored.into_iter().skip(start).take(limit as usize).collect()
}
