//! Corpus statistics.
//!
//! A quick summary of what `wbs` will search: item counts per kind, how much
//! is featured, the date span, and how many distinct facet values exist.
//! Used by `wbs stats` to sanity-check content files after an edit.

use anyhow::Result;
use std::collections::BTreeMap;

use workbench_search_core::models::{ContentKind, FilterOptions, SearchableItem};

use crate::config::Config;
use crate::sources::build_manager;

#[derive(Debug, Default, PartialEq)]
pub struct CorpusStats {
    pub total: usize,
    pub by_kind: BTreeMap<ContentKind, usize>,
    pub featured: usize,
    pub facets: FilterOptions,
}

impl CorpusStats {
    pub fn collect(items: &[SearchableItem], facets: FilterOptions) -> Self {
        let mut by_kind = BTreeMap::new();
        for item in items {
            *by_kind.entry(item.kind).or_insert(0) += 1;
        }
        Self {
            total: items.len(),
            by_kind,
            featured: items.iter().filter(|i| i.featured).count(),
            facets,
        }
    }
}

pub fn run_stats(config: &Config) -> Result<()> {
    let manager = build_manager(config)?;
    let stats = CorpusStats::collect(&manager.items(), manager.filter_options());

    println!("Workbench Search: Corpus Stats");
    println!("============================");
    println!();
    println!("  Sources:      {}", config.sources.len());
    println!("  Items:        {}", stats.total);
    for kind in ContentKind::ALL {
        let n = stats.by_kind.get(&kind).copied().unwrap_or(0);
        println!("    {:<12} {}", kind.as_str(), n);
    }
    println!("  Featured:     {}", stats.featured);
    match stats.facets.date_bounds {
        Some(range) => println!("  Date span:    {} .. {}", range.start, range.end),
        None => println!("  Date span:    -"),
    }
    println!();
    println!("  Categories:   {}", stats.facets.categories.len());
    println!("  Tags:         {}", stats.facets.tags.len());
    println!("  Technologies: {}", stats.facets.technologies.len());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: &str, kind: ContentKind, featured: bool) -> SearchableItem {
        SearchableItem {
            id: id.to_string(),
            kind,
            title: "T".to_string(),
            description: "D".to_string(),
            content: "C".to_string(),
            tags: Vec::new(),
            category: "C".to_string(),
            technologies: Vec::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            featured,
            searchable_text: String::new(),
        }
    }

    #[test]
    fn counts_per_kind_and_featured() {
        let items = vec![
            item("a", ContentKind::Article, false),
            item("b", ContentKind::Article, true),
            item("p", ContentKind::Project, true),
        ];
        let stats = CorpusStats::collect(&items, FilterOptions::default());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_kind.get(&ContentKind::Article), Some(&2));
        assert_eq!(stats.by_kind.get(&ContentKind::CaseStudy), None);
        assert_eq!(stats.featured, 2);
    }

    #[test]
    fn empty_corpus() {
        let stats = CorpusStats::collect(&[], FilterOptions::default());
        assert_eq!(stats, CorpusStats::default());
    }
}
