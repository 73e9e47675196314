//! Recent-query history.
//!
//! Most-recent-first list of plain query strings, capped and de-duplicated,
//! persisted as a JSON array through a [`KeyValueStore`]. History is a
//! convenience: an unreadable entry loads as empty and a failed write while
//! recording is only logged. [`RecentQueries::clear`] is the exception.

use anyhow::{Context, Result};
use tracing::warn;

use crate::store::KeyValueStore;

/// Storage key for the history array.
pub const RECENT_QUERIES_KEY: &str = "workbench-search:recent";

/// Default number of remembered queries.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

pub struct RecentQueries<S: KeyValueStore> {
    store: S,
    limit: usize,
    entries: Vec<String>,
}

impl<S: KeyValueStore> RecentQueries<S> {
    /// Load history from `store`, keeping at most `limit` entries.
    pub fn load(store: S, limit: usize) -> Self {
        let entries = match store.get(RECENT_QUERIES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<String>>(&json) {
                Ok(mut entries) => {
                    entries.truncate(limit);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "discarding unreadable recent-query history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read recent-query history");
                Vec::new()
            }
        };
        Self {
            store,
            limit,
            entries,
        }
    }

    /// Most recent first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Move `query` to the front. Blank queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() || self.limit == 0 {
            return;
        }
        self.entries.retain(|q| q != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);
        self.persist();
    }

    /// Forget every entry. Unlike [`record`](Self::record), a failed store
    /// write is returned: the caller asked for the history to be gone.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.store
            .remove(RECENT_QUERIES_KEY)
            .context("Failed to clear recent-query history")
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.store.set(RECENT_QUERIES_KEY, &json));
        if let Err(e) = result {
            warn!(error = %e, "could not save recent-query history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn most_recent_first_capped_and_deduplicated() {
        let mut recent = RecentQueries::load(MemoryStore::new(), 3);
        for q in ["rust", "wasm", "react", "wasm", "css"] {
            recent.record(q);
        }
        assert_eq!(recent.entries(), &["css", "wasm", "react"]);
    }

    #[test]
    fn blank_queries_are_ignored() {
        let mut recent = RecentQueries::load(MemoryStore::new(), DEFAULT_RECENT_LIMIT);
        recent.record("   ");
        assert!(recent.entries().is_empty());
    }

    #[test]
    fn survives_reload() {
        let mut recent = RecentQueries::load(MemoryStore::new(), DEFAULT_RECENT_LIMIT);
        recent.record(" edge caching ");
        let store = recent.into_store();
        let reloaded = RecentQueries::load(store, DEFAULT_RECENT_LIMIT);
        assert_eq!(reloaded.entries(), &["edge caching"]);
    }

    #[test]
    fn corrupt_history_loads_empty() {
        let store = MemoryStore::new();
        store.set(RECENT_QUERIES_KEY, "{not json").unwrap();
        let recent = RecentQueries::load(store, DEFAULT_RECENT_LIMIT);
        assert!(recent.entries().is_empty());
    }

    #[test]
    fn clear_removes_persisted_entry() {
        let mut recent = RecentQueries::load(MemoryStore::new(), DEFAULT_RECENT_LIMIT);
        recent.record("rust");
        recent.clear().unwrap();
        let store = recent.into_store();
        assert_eq!(store.get(RECENT_QUERIES_KEY).unwrap(), None);
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some(r#"["rust"]"#.to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            anyhow::bail!("read-only")
        }

        fn remove(&self, _key: &str) -> Result<()> {
            anyhow::bail!("read-only")
        }
    }

    #[test]
    fn failed_clear_is_reported() {
        let mut recent = RecentQueries::load(ReadOnlyStore, DEFAULT_RECENT_LIMIT);
        assert_eq!(recent.entries(), &["rust"]);
        let err = recent.clear().unwrap_err();
        assert!(format!("{:#}", err).contains("read-only"));

        // Recording still never fails the caller.
        recent.record("wasm");
        assert_eq!(recent.entries(), &["wasm"]);
    }
}
