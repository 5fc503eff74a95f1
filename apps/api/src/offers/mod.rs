// Flight-offer caching.
// Implements: search fingerprinting, the persisted search entry lifecycle
// (save / load / progress / eviction), and the expiry-vs-staleness policies.
// All persistence goes through the KvStore trait — Redis in production.

pub mod cache;
pub mod fingerprint;
pub mod handlers;
pub mod store;

pub use cache::OfferCache;
pub use store::{KvStore, RedisStore};
