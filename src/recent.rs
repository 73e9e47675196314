//! `wbs recent`: show or clear the recent-query history.

use anyhow::Result;

use workbench_search_core::history::RecentQueries;

use crate::config::Config;
use crate::file_store::FileStore;

pub fn run_recent(config: &Config, clear: bool) -> Result<()> {
    let store = FileStore::new(&config.history.path);
    let mut history = RecentQueries::load(store, config.history.limit);

    if clear {
        history.clear()?;
        println!("Recent queries cleared.");
        return Ok(());
    }

    if history.entries().is_empty() {
        println!("No recent queries.");
        return Ok(());
    }
    for (i, query) in history.entries().iter().enumerate() {
        println!("{}. {}", i + 1, query);
    }
    Ok(())
}
