//! Key-value persistence abstraction.
//!
//! The [`KeyValueStore`] trait is the browser-`localStorage` shaped seam the
//! query interface persists its convenience state through (currently only
//! the recent-query history). Nothing the search manager computes depends on
//! it, so a lost or unreadable store only ever costs history.
//!
//! Implementations:
//!
//! | Type | Where |
//! |------|-------|
//! | [`memory::MemoryStore`] | tests, WASM hosts that bridge storage themselves |
//! | `FileStore` | the `workbench-search` CLI, one JSON file per store |

pub mod memory;

use anyhow::Result;

/// String keys to string values.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
