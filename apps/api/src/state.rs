use sqlx::PgPool;

use crate::feed::FeedRanker;
use crate::offers::OfferCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pool kept for operational surfaces; feed queries go through the
    /// `PostStore` held by the ranker.
    #[allow(dead_code)]
    pub db: PgPool,
    pub feed: FeedRanker,
    pub offers: OfferCache,
}
