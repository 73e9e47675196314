//! Weighted heuristic scoring and highlight extraction.
//!
//! # Scoring
//!
//! For every whitespace-separated query term (duplicates count again):
//!
//! | Field | Contribution |
//! |-------|--------------|
//! | title | occurrences × `title` |
//! | description | occurrences × `description` |
//! | content | occurrences × `content` |
//! | tags | `tag` per tag containing the term |
//! | technologies | `technology` per technology containing the term |
//!
//! The sum is multiplied by `featured_boost` for featured items, then by
//! `phrase_boost` when the query has several terms and appears verbatim in
//! the item's searchable text.

use crate::models::{Highlights, SearchableItem};
use crate::text::{self, HighlightMarker};

/// Tuning knobs for [`score`], decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingWeights {
    pub title: f64,
    pub description: f64,
    pub content: f64,
    pub tag: f64,
    pub technology: f64,
    pub featured_boost: f64,
    pub phrase_boost: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            title: 10.0,
            description: 5.0,
            content: 2.0,
            tag: 8.0,
            technology: 6.0,
            featured_boost: 1.2,
            phrase_boost: 1.5,
        }
    }
}

/// A parsed query: the folded full string plus its terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub terms: Vec<String>,
}

impl Query {
    /// Fold `raw` and split it on whitespace. `text` is the terms joined by
    /// single spaces. Whitespace-only input yields an empty query.
    pub fn parse(raw: &str) -> Self {
        let terms: Vec<String> = text::fold(raw)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self {
            text: terms.join(" "),
            terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term_refs(&self) -> Vec<&str> {
        self.terms.iter().map(String::as_str).collect()
    }
}

/// An item plus the folded copies of its fields that matching runs against.
#[derive(Debug, Clone)]
pub struct IndexedItem {
    pub item: SearchableItem,
    title: String,
    description: String,
    content: String,
    tags: Vec<String>,
    technologies: Vec<String>,
}

impl IndexedItem {
    pub fn new(mut item: SearchableItem) -> Self {
        item.searchable_text = searchable_text(&item);
        Self {
            title: text::fold(&item.title),
            description: text::fold(&item.description),
            content: text::fold(&item.content),
            tags: item.tags.iter().map(|t| text::fold(t)).collect(),
            technologies: item.technologies.iter().map(|t| text::fold(t)).collect(),
            item,
        }
    }
}

/// Folded concatenation of title, description, content, tags, and
/// technologies, separated by single spaces.
pub fn searchable_text(item: &SearchableItem) -> String {
    let mut parts: Vec<&str> = vec![
        item.title.as_str(),
        item.description.as_str(),
        item.content.as_str(),
    ];
    parts.extend(item.tags.iter().map(String::as_str));
    parts.extend(item.technologies.iter().map(String::as_str));
    text::fold(&parts.join(" "))
}

/// Relevance of `indexed` for a non-empty `query`. Zero means no term
/// matched anywhere.
pub fn score(indexed: &IndexedItem, query: &Query, weights: &RankingWeights) -> f64 {
    let mut score = 0.0;
    for term in &query.terms {
        score += text::count_occurrences(&indexed.title, term) as f64 * weights.title;
        score += text::count_occurrences(&indexed.description, term) as f64 * weights.description;
        score += text::count_occurrences(&indexed.content, term) as f64 * weights.content;
        score += indexed.tags.iter().filter(|t| t.contains(term.as_str())).count() as f64 * weights.tag;
        score += indexed
            .technologies
            .iter()
            .filter(|t| t.contains(term.as_str()))
            .count() as f64
            * weights.technology;
    }

    if indexed.item.featured {
        score *= weights.featured_boost;
    }
    if query.terms.len() > 1 && indexed.item.searchable_text.contains(&query.text) {
        score *= weights.phrase_boost;
    }
    score
}

/// Marked-up title, description, and content snippet for the matched terms.
pub fn highlights(
    item: &SearchableItem,
    query: &Query,
    marker: &HighlightMarker,
    snippet_context: usize,
) -> Option<Highlights> {
    let terms = query.term_refs();
    let h = Highlights {
        title: text::highlight(&item.title, &terms, marker),
        description: text::highlight(&item.description, &terms, marker),
        content: text::snippet(&item.content, &terms, snippet_context, marker),
    };
    if h.is_empty() {
        None
    } else {
        Some(h)
    }
}
