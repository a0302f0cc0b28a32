//! Recent-search history persisted in local key-value storage.
//!
//! The history is loaded once at startup, rewritten in full on every new
//! search and deleted outright on clear. Storage failures while loading fall
//! back to an empty history instead of surfacing an error.

mod recent;
mod storage;

pub use recent::{RecentSearches, CAPACITY, STORAGE_KEY};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
