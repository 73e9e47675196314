//! Search instrumentation hooks.
//!
//! The manager reports every executed search through [`SearchObserver`]s so
//! that analytics, logging, or UI telemetry can be attached without the
//! scoring code knowing about any of them.

use serde::Serialize;

use crate::models::SearchFilters;

/// One completed `search` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent {
    /// The query as typed, trimmed.
    pub query: String,
    /// Filters in canonical form.
    pub filters: SearchFilters,
    pub result_count: usize,
    /// True when the result list came from the cache.
    pub cache_hit: bool,
    /// Corpus generation the search ran against.
    pub generation: u64,
}

/// Receives [`SearchEvent`]s. Called synchronously from `search`, so
/// implementations should be cheap.
pub trait SearchObserver: Send + Sync {
    fn on_search(&self, event: &SearchEvent);
}

impl<F> SearchObserver for F
where
    F: Fn(&SearchEvent) + Send + Sync,
{
    fn on_search(&self, event: &SearchEvent) {
        self(event)
    }
}
