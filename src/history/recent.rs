//! Bounded, persisted list of recent searches.

use chrono::Utc;
use color_eyre::{eyre::eyre, Result};
use tracing::{debug, warn};

use super::storage::KeyValueStore;
use crate::finder::{RecentSearch, SearchResult};

/// Storage key holding the serialized history
pub const STORAGE_KEY: &str = "recentSearches";

/// Maximum number of entries kept
pub const CAPACITY: usize = 10;

/// Recent searches, newest first, mirrored into a [`KeyValueStore`].
pub struct RecentSearches<S: KeyValueStore> {
  store: S,
  entries: Vec<RecentSearch>,
}

impl<S: KeyValueStore> RecentSearches<S> {
  /// Rehydrate the history from `store`.
  ///
  /// A missing, unreadable or corrupted value yields an empty history.
  pub fn load(store: S) -> Self {
    let entries = match store.get(STORAGE_KEY) {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<RecentSearch>>(&raw) {
        Ok(mut entries) => {
          entries.truncate(CAPACITY);
          entries
        }
        Err(e) => {
          warn!(error = %e, "Ignoring corrupted search history");
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        warn!(error = %e, "Failed to read search history");
        Vec::new()
      }
    };
    debug!(count = entries.len(), "Loaded search history");

    Self { store, entries }
  }

  /// Entries, newest first
  pub fn entries(&self) -> &[RecentSearch] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn get(&self, id: &str) -> Option<&RecentSearch> {
    self.entries.iter().find(|entry| entry.id == id)
  }

  /// Record a search, evicting the oldest entry past [`CAPACITY`], and
  /// persist the whole history.
  ///
  /// The in-memory history is updated even when the write fails.
  pub fn record(&mut self, key: &str, results: Vec<SearchResult>) -> Result<&RecentSearch> {
    let entry = RecentSearch {
      id: new_id(),
      key: key.to_string(),
      timestamp: Utc::now().timestamp_millis(),
      results,
    };

    self.entries.insert(0, entry);
    self.entries.truncate(CAPACITY);
    self.persist()?;

    Ok(&self.entries[0])
  }

  /// Forget every entry and delete the persisted value.
  pub fn clear(&mut self) -> Result<()> {
    self.entries.clear();
    self.store.remove(STORAGE_KEY)?;
    debug!("Cleared search history");
    Ok(())
  }

  fn persist(&self) -> Result<()> {
    let data = serde_json::to_string(&self.entries)
      .map_err(|e| eyre!("Failed to serialize search history: {}", e))?;
    self.store.set(STORAGE_KEY, &data)?;
    debug!(count = self.entries.len(), "Saved search history");
    Ok(())
  }
}

fn new_id() -> String {
  uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::history::MemoryStore;
  use serde_json::json;
  use std::collections::HashSet;
  use std::sync::Arc;

  fn results(n: i64) -> Vec<SearchResult> {
    vec![SearchResult::new("id", json!(n))]
  }

  #[test]
  fn test_load_empty_store() {
    let history = RecentSearches::load(MemoryStore::new());
    assert!(history.is_empty());
  }

  #[test]
  fn test_record_prepends_and_persists() {
    let store = Arc::new(MemoryStore::new());
    let mut history = RecentSearches::load(store.clone());

    history.record("first", results(1)).unwrap();
    let second = history.record("second", results(2)).unwrap().clone();

    assert_eq!(second.key, "second");
    assert_eq!(history.entries()[0].key, "second");
    assert_eq!(history.entries()[1].key, "first");

    let persisted: Vec<RecentSearch> =
      serde_json::from_str(&store.get(STORAGE_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, history.entries());
  }

  #[test]
  fn test_record_sets_timestamp_and_id() {
    let before = Utc::now().timestamp_millis();
    let mut history = RecentSearches::load(MemoryStore::new());
    let entry = history.record("id", results(1)).unwrap().clone();
    let after = Utc::now().timestamp_millis();

    assert!(entry.timestamp >= before && entry.timestamp <= after);
    assert!(!entry.id.is_empty());
    assert_eq!(history.get(&entry.id), Some(&entry));
  }

  #[test]
  fn test_capacity_evicts_oldest() {
    let store = Arc::new(MemoryStore::new());
    let mut history = RecentSearches::load(store.clone());

    for i in 0..11 {
      history.record(&format!("key{}", i), results(i)).unwrap();
    }

    assert_eq!(history.len(), CAPACITY);
    let keys: Vec<_> = history.entries().iter().map(|e| e.key.clone()).collect();
    let expected: Vec<_> = (1..11).rev().map(|i| format!("key{}", i)).collect();
    assert_eq!(keys, expected);
    assert!(!keys.contains(&"key0".to_string()));

    let reloaded = RecentSearches::load(store);
    assert_eq!(reloaded.entries(), history.entries());
  }

  #[test]
  fn test_ids_are_unique() {
    let mut history = RecentSearches::load(MemoryStore::new());
    for i in 0..CAPACITY as i64 {
      history.record("k", results(i)).unwrap();
    }
    let ids: HashSet<_> = history.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), CAPACITY);
  }

  #[test]
  fn test_round_trip_through_store() {
    let store = Arc::new(MemoryStore::new());
    let mut history = RecentSearches::load(store.clone());
    history
      .record(
        "id",
        vec![
          SearchResult::new("user.id", json!(5)),
          SearchResult::new("user.meta.id", json!({ "nested": [true, null] })),
        ],
      )
      .unwrap();
    history.record("name", results(7)).unwrap();

    let reloaded = RecentSearches::load(store);
    assert_eq!(reloaded.entries(), history.entries());
  }

  #[test]
  fn test_clear_removes_persisted_key() {
    let store = Arc::new(MemoryStore::new());
    let mut history = RecentSearches::load(store.clone());
    history.record("id", results(1)).unwrap();

    history.clear().unwrap();
    assert!(history.is_empty());
    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);

    let reloaded = RecentSearches::load(store);
    assert!(reloaded.is_empty());
  }

  #[test]
  fn test_corrupted_history_loads_empty() {
    let store = MemoryStore::new();
    store.set(STORAGE_KEY, "{not json").unwrap();
    let history = RecentSearches::load(store);
    assert!(history.is_empty());
  }

  #[test]
  fn test_wrong_shape_loads_empty() {
    let store = MemoryStore::new();
    store.set(STORAGE_KEY, r#"{"id":"x"}"#).unwrap();
    assert!(RecentSearches::load(store).is_empty());
  }

  #[test]
  fn test_oversized_history_truncated_on_load() {
    let entries: Vec<RecentSearch> = (0..15)
      .map(|i| RecentSearch {
        id: format!("id{}", i),
        key: "k".to_string(),
        timestamp: i,
        results: Vec::new(),
      })
      .collect();
    let store = MemoryStore::new();
    store
      .set(STORAGE_KEY, &serde_json::to_string(&entries).unwrap())
      .unwrap();

    let history = RecentSearches::load(store);
    assert_eq!(history.len(), CAPACITY);
    assert_eq!(history.entries()[0].id, "id0");
  }

  #[test]
  fn test_sqlite_backed_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.db");

    {
      let store = crate::history::SqliteStore::open_at(&path).unwrap();
      let mut history = RecentSearches::load(store);
      history.record("id", results(5)).unwrap();
    }

    let store = crate::history::SqliteStore::open_at(&path).unwrap();
    let mut history = RecentSearches::load(store);
    assert_eq!(history.len(), 1);
    assert_eq!(history.entries()[0].results, results(5));

    history.clear().unwrap();
    let store = crate::history::SqliteStore::open_at(&path).unwrap();
    assert!(RecentSearches::load(store).is_empty());
  }
}
