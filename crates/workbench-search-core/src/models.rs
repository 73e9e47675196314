//! Core data models shared by the corpus adapter, the search manager, and
//! every frontend.
//!
//! Field names serialize in camelCase so that content files and `--json`
//! output line up with what the site's frontend already consumes.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The closed set of content kinds the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    Article,
    CaseStudy,
    Project,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [
        ContentKind::Article,
        ContentKind::CaseStudy,
        ContentKind::Project,
    ];

    /// Wire name, e.g. `"case-study"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::CaseStudy => "case-study",
            ContentKind::Project => "project",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "article" => Ok(ContentKind::Article),
            "case-study" | "case_study" => Ok(ContentKind::CaseStudy),
            "project" => Ok(ContentKind::Project),
            other => anyhow::bail!(
                "Unknown content kind: '{}'. Must be project, article, or case-study.",
                other
            ),
        }
    }
}

/// One piece of indexable content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
    /// Stable identifier, unique within a corpus.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    /// Long-form body; equals `description` when the source has none.
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
    /// Case-folded concatenation of the text fields. Derived by
    /// [`SearchManager::initialize`](crate::manager::SearchManager::initialize);
    /// never read from input.
    #[serde(skip)]
    pub searchable_text: String,
}

/// Marked-up copies of the text fields that matched a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Highlights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Bounded snippet around the first match, not the full field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Highlights {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.content.is_none()
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub item: SearchableItem,
    /// Relative relevance. Only comparable within one result list.
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Highlights>,
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A facet selection.
///
/// Facets combine with AND; values inside one facet combine with OR. An
/// empty list places no constraint on its facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    #[serde(rename = "type")]
    pub types: Vec<ContentKind>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    pub featured: Option<bool>,
    pub date_range: Option<DateRange>,
}

impl SearchFilters {
    /// True when no facet constrains anything.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.categories.is_empty()
            && self.tags.is_empty()
            && self.technologies.is_empty()
            && self.featured.is_none()
            && self.date_range.is_none()
    }

    /// Canonical form: every value list sorted and de-duplicated, so that
    /// selections differing only in order compare (and hash) equal.
    pub fn normalized(&self) -> SearchFilters {
        fn canon<T: Ord + Clone>(values: &[T]) -> Vec<T> {
            let mut v = values.to_vec();
            v.sort();
            v.dedup();
            v
        }
        SearchFilters {
            types: canon(&self.types),
            categories: canon(&self.categories),
            tags: canon(&self.tags),
            technologies: canon(&self.technologies),
            featured: self.featured,
            date_range: self.date_range,
        }
    }

    /// Whether `item` satisfies every specified facet.
    pub fn matches(&self, item: &SearchableItem) -> bool {
        if !self.types.is_empty() && !self.types.contains(&item.kind) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&item.category) {
            return false;
        }
        if !self.tags.is_empty() && !item.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if !self.technologies.is_empty()
            && !item
                .technologies
                .iter()
                .any(|t| self.technologies.contains(t))
        {
            return false;
        }
        if let Some(featured) = self.featured {
            if item.featured != featured {
                return false;
            }
        }
        if let Some(range) = self.date_range {
            if !range.contains(item.date) {
                return false;
            }
        }
        true
    }
}

/// Distinct facet values observed across a corpus, each sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub types: Vec<ContentKind>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub technologies: Vec<String>,
    /// Oldest and newest item dates; `None` for an empty corpus.
    pub date_bounds: Option<DateRange>,
}
