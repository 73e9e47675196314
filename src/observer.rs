use tracing::info;

use workbench_search_core::events::{SearchEvent, SearchObserver};

/// Logs every search at `info` level. Visible with `--verbose` or
/// `RUST_LOG=info`.
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_search(&self, event: &SearchEvent) {
        info!(
            query = %event.query,
            results = event.result_count,
            cache_hit = event.cache_hit,
            generation = event.generation,
            filtered = !event.filters.is_empty(),
            "search"
        );
    }
}
