use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::models::flight::{
    FlightSearchEntry, FlightSearchParams, OfferTiming, RefreshCheck, RefreshReason, UserProgress,
    UserProgressUpdate,
};
use crate::offers::fingerprint::fingerprint;
use crate::offers::store::KvStore;

/// Offers are treated as expired this long before the supplier's own
/// `expires_at`, so a user mid-checkout never holds a just-lapsed offer.
pub const OFFER_EXPIRY_BUFFER_MINUTES: i64 = 5;

/// Floor for the client-side staleness horizon.
pub const MIN_STALE_AGE_MINUTES: i64 = 30;

/// Staleness horizon is the supplier timeout times this factor, floored at
/// `MIN_STALE_AGE_MINUTES`.
pub const STALE_TIMEOUT_FACTOR: i64 = 3;

/// Entries kept by the aggressive cleanup pass.
pub const AGGRESSIVE_KEEP: usize = 5;

const KEY_PREFIX: &str = "flight_search:";

/// Persists flight search results and in-progress booking state keyed by
/// search fingerprint.
///
/// Two independent invalidation policies apply on read:
/// - **expired** (supplier-declared TTL): evicted unconditionally;
/// - **stale** (client heuristic): flagged via `needs_refresh`, kept as a
///   usable fallback.
///
/// Writes are fail-soft: one aggressive-cleanup retry, then the loss is
/// accepted and logged. Reads are fail-null: store errors and corrupt
/// payloads surface as "absent". Concurrent writers from other processes
/// may touch the same keys; nothing here asserts write-then-read success.
#[derive(Clone)]
pub struct OfferCache {
    store: Arc<dyn KvStore>,
}

impl OfferCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Caches a completed search, overwriting any previous entry for the
    /// same parameters. Runs a normal cleanup pass first. Returns the
    /// search id even when persistence ultimately fails — callers must
    /// treat "saved" as best-effort.
    pub async fn save(
        &self,
        params: &FlightSearchParams,
        results: Value,
        timing: OfferTiming,
        selected_offer_id: Option<String>,
        user_progress: Option<UserProgress>,
    ) -> String {
        let search_id = fingerprint(params);

        if let Err(e) = self.cleanup_expired().await {
            warn!("cache cleanup before save failed: {e:#}");
        }

        let entry = FlightSearchEntry {
            search_id: search_id.clone(),
            search_params: params.clone(),
            search_results: results,
            timing,
            search_timestamp: Utc::now(),
            selected_offer_id,
            user_progress: user_progress.unwrap_or_default(),
            needs_refresh: false,
        };
        self.write_entry(&entry).await;
        search_id
    }

    /// Loads the cached search for `params`. Expired entries are evicted
    /// and reported absent; stale entries come back flagged with
    /// `needs_refresh` but are not evicted.
    pub async fn load(&self, params: &FlightSearchParams) -> Option<FlightSearchEntry> {
        let search_id = fingerprint(params);
        let mut entry = self.read_entry(&search_id).await?;
        let now = Utc::now();

        if is_expired(&entry, now) {
            debug!("evicting expired search {search_id}");
            self.remove_by_search_id(&search_id).await;
            return None;
        }

        entry.needs_refresh = is_stale(&entry, now);
        Some(entry)
    }

    /// Merges a partial progress update into the stored entry. Present
    /// fields overwrite, absent fields are preserved. No-op when nothing is
    /// cached for `params`.
    pub async fn update_user_progress(
        &self,
        params: &FlightSearchParams,
        update: UserProgressUpdate,
    ) {
        let search_id = fingerprint(params);
        let Some(mut entry) = self.read_entry(&search_id).await else {
            debug!("progress update for uncached search {search_id}, ignoring");
            return;
        };
        if let Some(step) = update.current_step {
            entry.user_progress.current_step = step;
        }
        if let Some(forms) = update.passenger_forms {
            entry.user_progress.passenger_forms = Some(forms);
        }
        if let Some(ancillaries) = update.ancillaries {
            entry.user_progress.ancillaries = Some(ancillaries);
        }
        if let Some(luggage) = update.luggage_selections {
            entry.user_progress.luggage_selections = Some(luggage);
        }
        self.write_entry(&entry).await;
    }

    /// Records the offer the user picked. No-op when nothing is cached.
    pub async fn update_selected_offer(&self, params: &FlightSearchParams, offer_id: String) {
        let search_id = fingerprint(params);
        let Some(mut entry) = self.read_entry(&search_id).await else {
            debug!("offer selection for uncached search {search_id}, ignoring");
            return;
        };
        entry.selected_offer_id = Some(offer_id);
        self.write_entry(&entry).await;
    }

    /// Idempotent delete by parameters.
    pub async fn remove(&self, params: &FlightSearchParams) {
        self.remove_by_search_id(&fingerprint(params)).await;
    }

    /// Idempotent delete by search id.
    pub async fn remove_by_search_id(&self, search_id: &str) {
        if let Err(e) = self.store.remove(&entry_key(search_id)).await {
            warn!("cache remove failed for {search_id}: {e:#}");
        }
    }

    /// Whether the caller should re-run the search. The reason is only
    /// populated when an entry was actually found; a never-cached search
    /// needs a refresh but has no reason.
    pub async fn needs_refresh(&self, params: &FlightSearchParams) -> RefreshCheck {
        let search_id = fingerprint(params);
        let Some(entry) = self.read_entry(&search_id).await else {
            return RefreshCheck { needs_refresh: true, reason: None };
        };
        let now = Utc::now();
        if is_expired(&entry, now) {
            RefreshCheck { needs_refresh: true, reason: Some(RefreshReason::Expired) }
        } else if is_stale(&entry, now) {
            RefreshCheck { needs_refresh: true, reason: Some(RefreshReason::Stale) }
        } else {
            RefreshCheck { needs_refresh: false, reason: None }
        }
    }

    /// Milliseconds until the supplier's `expires_at`; 0 when absent,
    /// already past, or open-ended.
    pub async fn time_remaining(&self, params: &FlightSearchParams) -> i64 {
        let search_id = fingerprint(params);
        let Some(entry) = self.read_entry(&search_id).await else {
            return 0;
        };
        match entry.timing.expires_at {
            Some(expires_at) => (expires_at - Utc::now()).num_milliseconds().max(0),
            None => 0,
        }
    }

    /// Every parseable cached search. Corrupt payloads are logged and
    /// skipped.
    pub async fn all_cached_searches(&self) -> Vec<FlightSearchEntry> {
        let keys = match self.store.keys(KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("cache enumeration failed: {e:#}");
                return Vec::new();
            }
        };
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            match self.store.get(&key).await {
                Ok(Some(payload)) => match serde_json::from_str::<FlightSearchEntry>(&payload) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => warn!("corrupt cache payload at {key}, skipping: {e}"),
                },
                Ok(None) => {} // removed by a concurrent writer
                Err(e) => warn!("cache read failed for {key}: {e:#}"),
            }
        }
        entries
    }

    /// Normal cleanup: evict every entry that is expired or stale, plus any
    /// corrupt payloads. Returns the number of keys removed.
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let keys = self.store.keys(KEY_PREFIX).await?;
        let now = Utc::now();
        let mut removed = 0;
        for key in keys {
            let evict = match self.store.get(&key).await {
                Ok(Some(payload)) => match serde_json::from_str::<FlightSearchEntry>(&payload) {
                    Ok(entry) => is_expired(&entry, now) || is_stale(&entry, now),
                    Err(e) => {
                        warn!("corrupt cache payload at {key}, evicting: {e}");
                        true
                    }
                },
                Ok(None) => false,
                Err(_) => false,
            };
            if evict && self.store.remove(&key).await.is_ok() {
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("cleanup evicted {removed} cached searches");
        }
        Ok(removed)
    }

    /// Removes every cached search.
    pub async fn clear_all(&self) -> Result<usize> {
        let keys = self.store.keys(KEY_PREFIX).await?;
        let mut removed = 0;
        for key in keys {
            if self.store.remove(&key).await.is_ok() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Capacity-pressure cleanup: keep only the `AGGRESSIVE_KEEP`
    /// most-recently written entries, regardless of expiry or staleness.
    /// Corrupt payloads are evicted outright.
    async fn aggressive_cleanup(&self) -> Result<usize> {
        let keys = self.store.keys(KEY_PREFIX).await?;
        let mut timestamped: Vec<(String, DateTime<Utc>)> = Vec::with_capacity(keys.len());
        let mut removed = 0;

        for key in keys {
            match self.store.get(&key).await {
                Ok(Some(payload)) => match serde_json::from_str::<FlightSearchEntry>(&payload) {
                    Ok(entry) => timestamped.push((key, entry.search_timestamp)),
                    Err(_) => {
                        if self.store.remove(&key).await.is_ok() {
                            removed += 1;
                        }
                    }
                },
                _ => {}
            }
        }

        timestamped.sort_by(|a, b| b.1.cmp(&a.1));
        for (key, _) in timestamped.into_iter().skip(AGGRESSIVE_KEEP) {
            if self.store.remove(&key).await.is_ok() {
                removed += 1;
            }
        }
        warn!("aggressive cleanup evicted {removed} cached searches");
        Ok(removed)
    }

    async fn read_entry(&self, search_id: &str) -> Option<FlightSearchEntry> {
        let payload = match self.store.get(&entry_key(search_id)).await {
            Ok(payload) => payload?,
            Err(e) => {
                warn!("cache read failed for {search_id}: {e:#}");
                return None;
            }
        };
        match serde_json::from_str(&payload) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("corrupt cache payload for {search_id}, treating as absent: {e}");
                None
            }
        }
    }

    /// Best-effort write with one aggressive-cleanup retry.
    async fn write_entry(&self, entry: &FlightSearchEntry) {
        let payload = match serde_json::to_string(entry) {
            Ok(payload) => payload,
            Err(e) => {
                error!("failed to serialize cache entry {}: {e}", entry.search_id);
                return;
            }
        };
        let key = entry_key(&entry.search_id);
        let Err(first) = self.store.set(&key, &payload).await else {
            return;
        };
        warn!(
            "cache write failed for {}, retrying after aggressive cleanup: {first:#}",
            entry.search_id
        );
        if let Err(e) = self.aggressive_cleanup().await {
            warn!("aggressive cleanup failed: {e:#}");
        }
        if let Err(e) = self.store.set(&key, &payload).await {
            error!(
                "cache write failed again for {}, entry not persisted: {e:#}",
                entry.search_id
            );
        }
    }
}

fn entry_key(search_id: &str) -> String {
    format!("{KEY_PREFIX}{search_id}")
}

/// Supplier-declared expiry, with the safety buffer. Entries with no
/// `expires_at` never expire by this rule.
fn is_expired(entry: &FlightSearchEntry, now: DateTime<Utc>) -> bool {
    match entry.timing.expires_at {
        Some(expires_at) => now >= expires_at - Duration::minutes(OFFER_EXPIRY_BUFFER_MINUTES),
        None => false,
    }
}

/// Client-side staleness heuristic: the search is old enough that results
/// may have drifted even if the supplier hasn't invalidated them yet.
fn is_stale(entry: &FlightSearchEntry, now: DateTime<Utc>) -> bool {
    let horizon_ms = (entry.timing.supplier_timeout_ms * STALE_TIMEOUT_FACTOR)
        .max(MIN_STALE_AGE_MINUTES * 60 * 1000);
    (now - entry.search_timestamp).num_milliseconds() > horizon_ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flight::BookingStep;
    use crate::offers::store::MemoryStore;
    use serde_json::json;

    fn make_params(route: &str) -> FlightSearchParams {
        FlightSearchParams {
            origin: route[..3].to_string(),
            destination: route[4..].to_string(),
            departure_date: "2025-11-03".to_string(),
            return_date: Some("2025-11-10".to_string()),
            passenger_count: 1,
            cabin_class: "economy".to_string(),
            currency: "EUR".to_string(),
            max_connections: Some(1),
        }
    }

    fn make_timing(expires_in: Duration) -> OfferTiming {
        OfferTiming {
            search_started_at: Utc::now(),
            supplier_timeout_ms: 20_000,
            expires_at: Some(Utc::now() + expires_in),
            created_at: Some(Utc::now()),
        }
    }

    fn make_results() -> Value {
        json!({"offers": [{"id": "off_1", "total_amount": "412.30"}]})
    }

    fn cache() -> (OfferCache, MemoryStore) {
        let store = MemoryStore::new();
        (OfferCache::new(Arc::new(store.clone())), store)
    }

    /// Plants an entry with a backdated `search_timestamp`, which save()
    /// cannot produce.
    async fn plant_entry(store: &MemoryStore, entry: &FlightSearchEntry) {
        store
            .set(
                &entry_key(&entry.search_id),
                &serde_json::to_string(entry).unwrap(),
            )
            .await
            .unwrap();
    }

    fn make_entry(
        params: &FlightSearchParams,
        age: Duration,
        expires_in: Option<Duration>,
    ) -> FlightSearchEntry {
        let now = Utc::now();
        FlightSearchEntry {
            search_id: fingerprint(params),
            search_params: params.clone(),
            search_results: make_results(),
            timing: OfferTiming {
                search_started_at: now - age,
                supplier_timeout_ms: 20_000,
                expires_at: expires_in.map(|d| now + d),
                created_at: Some(now - age),
            },
            search_timestamp: now - age,
            selected_offer_id: None,
            user_progress: UserProgress::default(),
            needs_refresh: false,
        }
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let (cache, _) = cache();
        let params = make_params("AMS-BCN");
        let results = make_results();

        let search_id = cache
            .save(&params, results.clone(), make_timing(Duration::minutes(30)), None, None)
            .await;

        let entry = cache.load(&params).await.expect("entry should be cached");
        assert_eq!(entry.search_id, search_id);
        assert_eq!(entry.search_results, results);
        assert_eq!(entry.search_params, params);
        assert!(!entry.needs_refresh);
        assert_eq!(entry.user_progress.current_step, BookingStep::Search);
    }

    #[tokio::test]
    async fn test_load_unknown_search_is_none() {
        let (cache, _) = cache();
        assert!(cache.load(&make_params("AMS-BCN")).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_evicted_on_load() {
        let (cache, _) = cache();
        let params = make_params("AMS-BCN");
        cache
            .save(&params, make_results(), make_timing(Duration::milliseconds(-1)), None, None)
            .await;

        assert!(cache.load(&params).await.is_none());
        assert!(cache.all_cached_searches().await.is_empty());
    }

    #[tokio::test]
    async fn test_expiry_buffer_applies_before_supplier_deadline() {
        let (cache, _) = cache();
        let params = make_params("AMS-BCN");
        // Expires in 4 minutes: inside the 5-minute buffer, so already
        // treated as expired.
        cache
            .save(&params, make_results(), make_timing(Duration::minutes(4)), None, None)
            .await;
        assert!(cache.load(&params).await.is_none());
    }

    #[tokio::test]
    async fn test_stale_entry_flagged_not_evicted() {
        let (cache, store) = cache();
        let params = make_params("AMS-BCN");
        // Written 2h ago (past max(3×20s, 30min)), supplier expiry still
        // far in the future.
        let entry = make_entry(&params, Duration::hours(2), Some(Duration::hours(6)));
        plant_entry(&store, &entry).await;

        let loaded = cache.load(&params).await.expect("stale entries stay usable");
        assert!(loaded.needs_refresh);
        assert_eq!(cache.all_cached_searches().await.len(), 1);
    }

    #[tokio::test]
    async fn test_staleness_floor_is_thirty_minutes() {
        let (cache, store) = cache();
        let params = make_params("AMS-BCN");
        // 3 × 20s supplier timeout would be a 1-minute horizon, but the
        // 30-minute floor keeps a 10-minute-old search fresh.
        let entry = make_entry(&params, Duration::minutes(10), Some(Duration::hours(6)));
        plant_entry(&store, &entry).await;

        let loaded = cache.load(&params).await.unwrap();
        assert!(!loaded.needs_refresh);
    }

    #[tokio::test]
    async fn test_needs_refresh_reasons() {
        let (cache, store) = cache();

        // Never cached: refresh with no reason.
        let check = cache.needs_refresh(&make_params("AMS-BCN")).await;
        assert!(check.needs_refresh);
        assert_eq!(check.reason, None);

        // Fresh entry.
        let fresh = make_params("CDG-FCO");
        cache
            .save(&fresh, make_results(), make_timing(Duration::hours(1)), None, None)
            .await;
        let check = cache.needs_refresh(&fresh).await;
        assert!(!check.needs_refresh);
        assert_eq!(check.reason, None);

        // Expired entry.
        let expired = make_params("LIS-OPO");
        plant_entry(&store, &make_entry(&expired, Duration::minutes(1), Some(Duration::minutes(-1)))).await;
        let check = cache.needs_refresh(&expired).await;
        assert_eq!(check.reason, Some(RefreshReason::Expired));

        // Stale entry.
        let stale = make_params("BER-VIE");
        plant_entry(&store, &make_entry(&stale, Duration::hours(2), Some(Duration::hours(6)))).await;
        let check = cache.needs_refresh(&stale).await;
        assert_eq!(check.reason, Some(RefreshReason::Stale));
    }

    #[tokio::test]
    async fn test_time_remaining() {
        let (cache, _) = cache();
        assert_eq!(cache.time_remaining(&make_params("AMS-BCN")).await, 0);

        let params = make_params("CDG-FCO");
        cache
            .save(&params, make_results(), make_timing(Duration::minutes(30)), None, None)
            .await;
        let remaining = cache.time_remaining(&params).await;
        assert!(remaining > 0 && remaining <= 30 * 60 * 1000);
    }

    #[tokio::test]
    async fn test_progress_merge_preserves_absent_fields() {
        let (cache, _) = cache();
        let params = make_params("AMS-BCN");
        cache
            .save(&params, make_results(), make_timing(Duration::hours(1)), None, None)
            .await;

        cache
            .update_user_progress(
                &params,
                UserProgressUpdate {
                    current_step: Some(BookingStep::Passengers),
                    passenger_forms: Some(json!([{"given_name": "Ada"}])),
                    ..Default::default()
                },
            )
            .await;
        // A later partial update must not clobber the passenger forms.
        cache
            .update_user_progress(
                &params,
                UserProgressUpdate {
                    current_step: Some(BookingStep::Ancillaries),
                    ancillaries: Some(json!({"seats": ["12A"]})),
                    ..Default::default()
                },
            )
            .await;

        let entry = cache.load(&params).await.unwrap();
        assert_eq!(entry.user_progress.current_step, BookingStep::Ancillaries);
        assert_eq!(entry.user_progress.passenger_forms, Some(json!([{"given_name": "Ada"}])));
        assert_eq!(entry.user_progress.ancillaries, Some(json!({"seats": ["12A"]})));
        assert_eq!(entry.user_progress.luggage_selections, None);
    }

    #[tokio::test]
    async fn test_progress_update_noop_when_absent() {
        let (cache, store) = cache();
        cache
            .update_user_progress(
                &make_params("AMS-BCN"),
                UserProgressUpdate {
                    current_step: Some(BookingStep::Payment),
                    ..Default::default()
                },
            )
            .await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_selected_offer_set_and_noop() {
        let (cache, store) = cache();
        let params = make_params("AMS-BCN");
        cache
            .save(&params, make_results(), make_timing(Duration::hours(1)), None, None)
            .await;
        cache.update_selected_offer(&params, "off_1".to_string()).await;
        assert_eq!(cache.load(&params).await.unwrap().selected_offer_id, Some("off_1".to_string()));

        cache.update_selected_offer(&make_params("CDG-FCO"), "off_9".to_string()).await;
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (cache, _) = cache();
        let params = make_params("AMS-BCN");
        cache
            .save(&params, make_results(), make_timing(Duration::hours(1)), None, None)
            .await;
        cache.remove(&params).await;
        cache.remove(&params).await;
        assert!(cache.load(&params).await.is_none());
    }

    #[tokio::test]
    async fn test_searches_differing_in_max_connections_cached_independently() {
        let (cache, _) = cache();
        let direct = make_params("AMS-BCN");
        let one_stop = FlightSearchParams { max_connections: Some(2), ..direct.clone() };

        cache
            .save(&direct, json!({"offers": "direct"}), make_timing(Duration::hours(1)), None, None)
            .await;
        cache
            .save(&one_stop, json!({"offers": "one-stop"}), make_timing(Duration::hours(1)), None, None)
            .await;

        assert_eq!(cache.load(&direct).await.unwrap().search_results, json!({"offers": "direct"}));
        assert_eq!(
            cache.load(&one_stop).await.unwrap().search_results,
            json!({"offers": "one-stop"})
        );
    }

    #[tokio::test]
    async fn test_cleanup_evicts_expired_and_stale_only() {
        let (cache, store) = cache();
        plant_entry(&store, &make_entry(&make_params("AAA-BBB"), Duration::minutes(1), Some(Duration::minutes(-1)))).await;
        plant_entry(&store, &make_entry(&make_params("CCC-DDD"), Duration::hours(2), Some(Duration::hours(6)))).await;
        plant_entry(&store, &make_entry(&make_params("EEE-FFF"), Duration::minutes(1), Some(Duration::hours(6)))).await;

        let removed = cache.cleanup_expired().await.unwrap();
        assert_eq!(removed, 2);
        let survivors = cache.all_cached_searches().await;
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].search_params, make_params("EEE-FFF"));
    }

    #[tokio::test]
    async fn test_write_failure_triggers_aggressive_cleanup_and_retry() {
        let (cache, store) = cache();
        // Seed 7 fresh entries with staggered write times.
        let routes = ["AAA-BB1", "AAA-BB2", "AAA-BB3", "AAA-BB4", "AAA-BB5", "AAA-BB6", "AAA-BB7"];
        for (i, route) in routes.iter().enumerate() {
            let entry = make_entry(
                &make_params(route),
                Duration::minutes(routes.len() as i64 - i as i64),
                Some(Duration::hours(6)),
            );
            plant_entry(&store, &entry).await;
        }

        store.fail_next_writes(1);
        let params = make_params("NEW-ONE");
        cache
            .save(&params, make_results(), make_timing(Duration::hours(1)), None, None)
            .await;

        // The retry landed the new entry, and only the 5 most recent of the
        // 7 seeded entries survived the aggressive pass.
        assert!(cache.load(&params).await.is_some());
        assert_eq!(store.len(), AGGRESSIVE_KEEP + 1);
        assert!(cache.load(&make_params("AAA-BB1")).await.is_none());
        assert!(cache.load(&make_params("AAA-BB2")).await.is_none());
        assert!(cache.load(&make_params("AAA-BB7")).await.is_some());
    }

    #[tokio::test]
    async fn test_save_returns_id_even_when_persistence_fails() {
        let (cache, store) = cache();
        let params = make_params("AMS-BCN");
        // Both the initial write and the post-cleanup retry fail.
        store.fail_next_writes(2);
        let search_id = cache
            .save(&params, make_results(), make_timing(Duration::hours(1)), None, None)
            .await;
        assert_eq!(search_id, fingerprint(&params));
        assert!(cache.load(&params).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_payload_treated_as_absent() {
        let (cache, store) = cache();
        let params = make_params("AMS-BCN");
        store
            .set(&entry_key(&fingerprint(&params)), "{not json")
            .await
            .unwrap();
        assert!(cache.load(&params).await.is_none());
        assert!(cache.all_cached_searches().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let (cache, store) = cache();
        for route in ["AMS-BCN", "CDG-FCO"] {
            cache
                .save(&make_params(route), make_results(), make_timing(Duration::hours(1)), None, None)
                .await;
        }
        assert_eq!(cache.clear_all().await.unwrap(), 2);
        assert!(store.is_empty());
    }
}
