use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The tuple of parameters that identifies one flight search.
/// Two searches with the same parameters share one cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub passenger_count: u32,
    pub cabin_class: String,
    pub currency: String,
    pub max_connections: Option<u32>,
}

/// Supplier timing metadata attached to a search result set.
/// `expires_at` is the provider's own validity window; `supplier_timeout_ms`
/// feeds the client-side staleness heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferTiming {
    pub search_started_at: DateTime<Utc>,
    pub supplier_timeout_ms: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Steps of the booking flow, in expected order. The cache stores whatever
/// step the caller sets; enforcing legal transitions is the caller's job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    #[default]
    Search,
    Passengers,
    Ancillaries,
    Luggage,
    Payment,
}

/// User progress through the booking flow. Form payloads are opaque to the
/// cache and round-tripped verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub current_step: BookingStep,
    pub passenger_forms: Option<Value>,
    pub ancillaries: Option<Value>,
    pub luggage_selections: Option<Value>,
}

/// Partial progress update. Present fields overwrite, absent fields are
/// preserved on the stored entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProgressUpdate {
    pub current_step: Option<BookingStep>,
    pub passenger_forms: Option<Value>,
    pub ancillaries: Option<Value>,
    pub luggage_selections: Option<Value>,
}

/// One cached flight search: the results payload, supplier timing, and the
/// user's progress through booking. Exactly one entry exists per search_id;
/// last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightSearchEntry {
    pub search_id: String,
    pub search_params: FlightSearchParams,
    pub search_results: Value,
    pub timing: OfferTiming,
    pub search_timestamp: DateTime<Utc>,
    pub selected_offer_id: Option<String>,
    pub user_progress: UserProgress,
    /// Derived on every read; the stored value is never authoritative.
    #[serde(default)]
    pub needs_refresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshReason {
    Expired,
    Stale,
}

/// Result of a refresh check. `reason` is only populated when an entry was
/// actually found — a never-cached search reports `needs_refresh` with no
/// reason, so callers can tell "never cached" from "cached but invalid".
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RefreshCheck {
    pub needs_refresh: bool,
    pub reason: Option<RefreshReason>,
}
