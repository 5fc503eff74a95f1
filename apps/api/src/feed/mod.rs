// Community feed ranking.
// Implements: multi-factor post scoring (recency, proximity, popularity,
// engagement), the specialized feed views, and pagination. All reads go
// through the PostStore trait — no direct SQL outside store.rs.

pub mod handlers;
pub mod ranker;
pub mod scoring;
pub mod store;

pub use ranker::FeedRanker;
pub use store::{PgPostStore, PostStore};
