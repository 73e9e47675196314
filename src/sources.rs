//! Content sources: loading the configured JSON collections into a corpus.

use anyhow::{Context, Result};
use tracing::debug;

use workbench_search_core::corpus::{parse_collection, ContentRegistry};
use workbench_search_core::manager::SearchManager;
use workbench_search_core::models::SearchableItem;

use crate::config::{Config, SourceConfig};
use crate::observer::TracingObserver;

fn read_source(source: &SourceConfig) -> Result<Vec<SearchableItem>> {
    let json = std::fs::read_to_string(&source.path).with_context(|| {
        format!(
            "Failed to read source '{}': {}",
            source.name,
            source.path.display()
        )
    })?;
    parse_collection(source.kind, &json)
        .with_context(|| format!("Failed to parse source '{}'", source.name))
}

/// Read every configured source, in config order, rejecting duplicate ids
/// across sources.
pub fn load_corpus(config: &Config) -> Result<Vec<SearchableItem>> {
    let mut registry = ContentRegistry::new();
    for source in &config.sources {
        let items = read_source(source)?;
        let count = registry
            .register(items)
            .with_context(|| format!("Failed to register source '{}'", source.name))?;
        debug!(source = %source.name, items = count, "source loaded");
    }
    Ok(registry.into_items())
}

/// A manager built from the config's settings and initialized with the
/// configured corpus.
pub fn build_manager(config: &Config) -> Result<SearchManager> {
    let corpus = load_corpus(config)?;
    let manager = SearchManager::new(config.search_settings()).with_observer(TracingObserver);
    manager.initialize(corpus);
    Ok(manager)
}

pub fn list_sources(config: &Config) -> Result<()> {
    if config.sources.is_empty() {
        println!("No sources configured.");
        return Ok(());
    }

    println!("{:<16} {:<12} {:<8} STATUS", "SOURCE", "KIND", "ITEMS");
    for source in &config.sources {
        let (items, status) = if !source.path.exists() {
            ("-".to_string(), "MISSING".to_string())
        } else {
            match read_source(source) {
                Ok(items) => (items.len().to_string(), "OK".to_string()),
                Err(e) => ("-".to_string(), format!("ERROR ({})", e.root_cause())),
            }
        };
        println!(
            "{:<16} {:<12} {:<8} {}",
            source.name,
            source.kind.as_str(),
            items,
            status
        );
    }

    Ok(())
}
