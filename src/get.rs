//! `wbs get <id>`: print one item in full.

use anyhow::{Context, Result};

use workbench_search_core::models::SearchableItem;

use crate::config::Config;
use crate::sources::build_manager;

/// Look up an item by id in the configured corpus.
pub fn get_item(config: &Config, id: &str) -> Result<SearchableItem> {
    let manager = build_manager(config)?;
    manager
        .get(id)
        .with_context(|| format!("Item not found: {}", id))
}

pub fn run_get(config: &Config, id: &str, json: bool) -> Result<()> {
    let item = get_item(config, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    println!("--- Item ---");
    println!("id:           {}", item.id);
    println!("type:         {}", item.kind);
    println!("title:        {}", item.title);
    println!("category:     {}", item.category);
    println!("date:         {}", item.date);
    println!("featured:     {}", item.featured);
    println!("tags:         {}", item.tags.join(", "));
    println!("technologies: {}", item.technologies.join(", "));
    println!();

    println!("--- Description ---");
    println!("{}", item.description);
    println!();

    println!("--- Content ---");
    println!("{}", item.content);

    Ok(())
}
