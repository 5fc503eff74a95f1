#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::post::{PostRow, UserLocation};

/// Hours for the recency decay to drop to 1/e.
pub const RECENCY_DECAY_HOURS: f64 = 24.0;

/// Proximity score when either side has no coordinates: neutral, not penalized.
pub const NEUTRAL_PROXIMITY: f64 = 0.5;

/// Combined engagement at which the popularity score saturates (log10 scale).
pub const POPULARITY_LOG_CEILING: f64 = 3.0;

/// Combined engagement at which the linear engagement score saturates.
pub const ENGAGEMENT_SATURATION: f64 = 10.0;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance beyond which a post counts as "around the world".
pub const FAR_AWAY_KM: f64 = 1000.0;

/// Weighting of the four sub-scores. Each set must sum to 1.0 so the
/// combined score stays in [0, 1].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeedWeights {
    pub recency: f64,
    pub proximity: f64,
    pub popularity: f64,
    pub engagement: f64,
}

impl FeedWeights {
    /// Standard feed weighting.
    pub const STANDARD: FeedWeights = FeedWeights {
        recency: 0.30,
        proximity: 0.25,
        popularity: 0.25,
        engagement: 0.20,
    };

    /// Destination-discovery weighting: popularity and freshness over raw
    /// interaction volume, no engagement term.
    pub const DESTINATION: FeedWeights = FeedWeights {
        recency: 0.35,
        proximity: 0.25,
        popularity: 0.40,
        engagement: 0.0,
    };

    pub fn sum(&self) -> f64 {
        self.recency + self.proximity + self.popularity + self.engagement
    }
}

impl Default for FeedWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A post with its computed sub-scores. Created fresh on every scoring call,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPost {
    pub post: PostRow,
    pub distance_km: Option<f64>,
    pub recency_score: f64,
    pub proximity_score: f64,
    pub popularity_score: f64,
    pub engagement_score: f64,
    pub final_score: f64,
}

/// Computes recency score as exp(-hours_since_created / 24).
/// A brand-new post scores 1.0, a 24h-old post ≈ 0.37, asymptotic toward 0.
pub fn compute_recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours_since = (now - created_at).num_seconds().max(0) as f64 / 3600.0;
    (-hours_since / RECENCY_DECAY_HOURS).exp().clamp(0.0, 1.0)
}

/// Great-circle distance in km between two points (Haversine).
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance between the user and a post's place, if both sides have
/// coordinates.
pub fn post_distance_km(post: &PostRow, user_location: Option<UserLocation>) -> Option<f64> {
    let loc = user_location?;
    let lat = post.place_lat?;
    let lng = post.place_lng?;
    Some(haversine_km(loc.lat, loc.lng, lat, lng))
}

/// Piecewise-constant proximity score. Monotone non-increasing in distance;
/// neutral 0.5 when the distance is unknown.
pub fn compute_proximity_score(distance_km: Option<f64>) -> f64 {
    let d = match distance_km {
        Some(d) => d,
        None => return NEUTRAL_PROXIMITY,
    };
    if d <= 50.0 {
        1.0
    } else if d <= 100.0 {
        0.9
    } else if d <= 200.0 {
        0.8
    } else if d <= 500.0 {
        0.6
    } else if d <= 1000.0 {
        0.4
    } else {
        0.3
    }
}

/// Logarithmic popularity: min(1, log10(likes + replies + 1) / 3).
/// Compresses viral posts so they don't totally dominate; saturates around
/// 1000 combined interactions.
pub fn compute_popularity_score(total_engagement: i64) -> f64 {
    let total = total_engagement.max(0) as f64;
    ((total + 1.0).log10() / POPULARITY_LOG_CEILING).clamp(0.0, 1.0)
}

/// Linear engagement: min(1, (likes + replies) / 10).
pub fn compute_engagement_score(total_engagement: i64) -> f64 {
    (total_engagement.max(0) as f64 / ENGAGEMENT_SATURATION).clamp(0.0, 1.0)
}

/// Scores one post against the caller's location with the given weights.
pub fn score_post(
    post: &PostRow,
    user_location: Option<UserLocation>,
    weights: &FeedWeights,
    now: DateTime<Utc>,
) -> ScoredPost {
    let distance_km = post_distance_km(post, user_location);
    let recency_score = compute_recency_score(post.created_at, now);
    let proximity_score = compute_proximity_score(distance_km);
    let popularity_score = compute_popularity_score(post.total_engagement());
    let engagement_score = compute_engagement_score(post.total_engagement());

    let final_score = (weights.recency * recency_score
        + weights.proximity * proximity_score
        + weights.popularity * popularity_score
        + weights.engagement * engagement_score)
        .clamp(0.0, 1.0);

    ScoredPost {
        post: post.clone(),
        distance_km,
        recency_score,
        proximity_score,
        popularity_score,
        engagement_score,
        final_score,
    }
}
