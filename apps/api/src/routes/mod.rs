pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::feed::handlers as feed_handlers;
use crate::offers::handlers as offer_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Community feed
        .route("/api/v1/feed", get(feed_handlers::handle_feed))
        .route("/api/v1/feed/popular", get(feed_handlers::handle_popular))
        .route("/api/v1/feed/recent", get(feed_handlers::handle_recent))
        .route(
            "/api/v1/feed/destinations",
            get(feed_handlers::handle_destinations),
        )
        .route(
            "/api/v1/feed/around-the-world",
            get(feed_handlers::handle_around_the_world),
        )
        // Flight search cache
        .route(
            "/api/v1/flights/cache",
            get(offer_handlers::handle_list)
                .post(offer_handlers::handle_save)
                .delete(offer_handlers::handle_remove),
        )
        .route(
            "/api/v1/flights/cache/all",
            delete(offer_handlers::handle_clear_all),
        )
        .route(
            "/api/v1/flights/cache/lookup",
            post(offer_handlers::handle_lookup),
        )
        .route(
            "/api/v1/flights/cache/refresh-check",
            post(offer_handlers::handle_refresh_check),
        )
        .route(
            "/api/v1/flights/cache/time-remaining",
            post(offer_handlers::handle_time_remaining),
        )
        .route(
            "/api/v1/flights/cache/progress",
            patch(offer_handlers::handle_progress),
        )
        .route(
            "/api/v1/flights/cache/selected-offer",
            patch(offer_handlers::handle_selected_offer),
        )
        .with_state(state)
}
