//! `wbs search`, `wbs suggest`, and `wbs facets`.
//!
//! Each command loads the configured corpus into a fresh [`SearchManager`],
//! runs one operation, and prints the outcome. Facet flags go through the
//! same [`FilterPanel`] an interactive frontend uses, so the CLI and the
//! site build identical [`SearchFilters`].

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::collections::HashSet;

use workbench_search_core::history::RecentQueries;
use workbench_search_core::interface::FilterPanel;
use workbench_search_core::manager::SearchManager;
use workbench_search_core::models::{ContentKind, DateRange, SearchFilters, SearchResult};

use crate::config::Config;
use crate::display::{self, Style};
use crate::file_store::FileStore;
use crate::sources::build_manager;

/// Facet and output flags of `wbs search`.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub types: Vec<ContentKind>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    pub featured: Option<bool>,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    pub since: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    pub until: Option<String>,
    pub limit: Option<usize>,
    pub json: bool,
}

fn parse_date(flag: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid --{} date '{}' (expected YYYY-MM-DD)", flag, value))
}

/// Date range from `--since`/`--until`. A missing side is unbounded.
pub fn parse_date_range(since: Option<&str>, until: Option<&str>) -> Result<Option<DateRange>> {
    let start = since.map(|s| parse_date("since", s)).transpose()?;
    let end = until.map(|s| parse_date("until", s)).transpose()?;
    match (start, end) {
        (None, None) => Ok(None),
        (Some(s), Some(e)) if s > e => bail!("--since {} is after --until {}", s, e),
        (s, e) => Ok(Some(DateRange::new(
            s.unwrap_or(NaiveDate::MIN),
            e.unwrap_or(NaiveDate::MAX),
        ))),
    }
}

/// Select every flag value in a [`FilterPanel`]. Repeated values are
/// selected once rather than toggled back off.
pub fn build_filters(opts: &SearchOptions) -> Result<SearchFilters> {
    let mut panel = FilterPanel::new();

    let mut seen = HashSet::new();
    for kind in &opts.types {
        if seen.insert(*kind) {
            panel.toggle_type(*kind);
        }
    }
    for category in unique(&opts.categories) {
        panel.toggle_category(category);
    }
    for tag in unique(&opts.tags) {
        panel.toggle_tag(tag);
    }
    for tech in unique(&opts.technologies) {
        panel.toggle_technology(tech);
    }
    panel.set_featured(opts.featured);
    panel.set_date_range(parse_date_range(
        opts.since.as_deref(),
        opts.until.as_deref(),
    )?);

    Ok(panel.to_filters())
}

fn unique(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|v| v.as_str())
        .filter(|v| seen.insert(*v))
        .collect()
}

fn record_query(config: &Config, query: &str) {
    let store = FileStore::new(&config.history.path);
    let mut history = RecentQueries::load(store, config.history.limit);
    history.record(query);
}

pub fn run_search(config: &Config, query: &str, opts: &SearchOptions) -> Result<()> {
    let filters = build_filters(opts)?;
    let manager = build_manager(config)?;

    let mut results = manager.search(query, &filters);
    record_query(config, query);

    let limit = opts.limit.unwrap_or(config.search.result_limit);
    results.truncate(limit);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    print_results(&manager, &results, Style::for_stdout());
    Ok(())
}

fn print_results(manager: &SearchManager, results: &[SearchResult], style: Style) {
    let marker = &manager.settings().marker;
    let render = |s: &str| display::render(s, marker, style);

    for (i, result) in results.iter().enumerate() {
        let item = &result.item;
        let highlights = result.highlights.as_ref();

        let title = highlights
            .and_then(|h| h.title.as_deref())
            .map(render)
            .unwrap_or_else(|| item.title.clone());
        println!("{}. [{:.2}] {} / {}", i + 1, result.score, item.kind, title);

        let featured = if item.featured { "  (featured)" } else { "" };
        println!("    date: {}  category: {}{}", item.date, item.category, featured);

        let description = highlights
            .and_then(|h| h.description.as_deref())
            .map(render)
            .unwrap_or_else(|| item.description.clone());
        println!("    description: {}", description.replace('\n', " ").trim());

        if let Some(excerpt) = highlights.and_then(|h| h.content.as_deref()) {
            println!("    excerpt: \"{}\"", render(excerpt).replace('\n', " ").trim());
        }
        if !item.tags.is_empty() {
            println!("    tags: {}", item.tags.join(", "));
        }
        if !item.technologies.is_empty() {
            println!("    tech: {}", item.technologies.join(", "));
        }
        println!("    id: {}", item.id);
        println!();
    }
}

pub fn run_suggest(config: &Config, partial: &str, limit: Option<usize>) -> Result<()> {
    let manager = build_manager(config)?;
    let suggestions = match limit {
        Some(n) => manager.suggestions(partial, n),
        None => manager.suggest(partial),
    };
    for s in suggestions {
        println!("{}", s);
    }
    Ok(())
}

pub fn run_facets(config: &Config, json: bool) -> Result<()> {
    let manager = build_manager(config)?;
    let options = manager.filter_options();

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    let kinds: Vec<&str> = options.types.iter().map(|k| k.as_str()).collect();
    println!("types:        {}", kinds.join(", "));
    println!("categories:   {}", options.categories.join(", "));
    println!("tags:         {}", options.tags.join(", "));
    println!("technologies: {}", options.technologies.join(", "));
    match options.date_bounds {
        Some(range) => println!("dates:        {} .. {}", range.start, range.end),
        None => println!("dates:        -"),
    }
    Ok(())
}
