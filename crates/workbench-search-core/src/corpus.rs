//! Content corpus adapter.
//!
//! Normalizes the site's heterogeneous content collections (projects,
//! articles, case studies) into uniform [`SearchableItem`]s. This is a
//! pass-through layer: nothing is filtered or deduplicated here, and a
//! malformed record fails at deserialization rather than being skipped.

use std::collections::HashSet;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{ContentKind, SearchableItem};

/// A portfolio project as stored in `projects.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(alias = "slug")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
}

/// A blog article. Bodies are optional; listings often carry only the excerpt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(alias = "id")]
    pub slug: String,
    pub title: String,
    #[serde(alias = "summary", alias = "description")]
    pub excerpt: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    #[serde(alias = "publishedAt")]
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
}

/// A long-form case study.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyRecord {
    #[serde(alias = "id")]
    pub slug: String,
    pub title: String,
    #[serde(alias = "description")]
    pub summary: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, alias = "techStack")]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
}

impl From<ProjectRecord> for SearchableItem {
    fn from(r: ProjectRecord) -> Self {
        let content = r.long_description.unwrap_or_else(|| r.description.clone());
        SearchableItem {
            id: r.id,
            kind: ContentKind::Project,
            title: r.title,
            description: r.description,
            content,
            tags: r.tags,
            category: r.category,
            technologies: r.tech_stack,
            date: r.date,
            featured: r.featured,
            searchable_text: String::new(),
        }
    }
}

impl From<ArticleRecord> for SearchableItem {
    fn from(r: ArticleRecord) -> Self {
        let content = r.content.unwrap_or_else(|| r.excerpt.clone());
        SearchableItem {
            id: r.slug,
            kind: ContentKind::Article,
            title: r.title,
            description: r.excerpt,
            content,
            tags: r.tags,
            category: r.category,
            technologies: Vec::new(),
            date: r.date,
            featured: r.featured,
            searchable_text: String::new(),
        }
    }
}

impl From<CaseStudyRecord> for SearchableItem {
    fn from(r: CaseStudyRecord) -> Self {
        let content = r.body.unwrap_or_else(|| r.summary.clone());
        SearchableItem {
            id: r.slug,
            kind: ContentKind::CaseStudy,
            title: r.title,
            description: r.summary,
            content,
            tags: r.tags,
            category: r.category,
            technologies: r.technologies,
            date: r.date,
            featured: r.featured,
            searchable_text: String::new(),
        }
    }
}

/// Parse a JSON array of records of the given kind into searchable items.
pub fn parse_collection(kind: ContentKind, json: &str) -> Result<Vec<SearchableItem>> {
    let items = match kind {
        ContentKind::Project => {
            let records: Vec<ProjectRecord> = serde_json::from_str(json)?;
            records.into_iter().map(SearchableItem::from).collect()
        }
        ContentKind::Article => {
            let records: Vec<ArticleRecord> = serde_json::from_str(json)?;
            records.into_iter().map(SearchableItem::from).collect()
        }
        ContentKind::CaseStudy => {
            let records: Vec<CaseStudyRecord> = serde_json::from_str(json)?;
            records.into_iter().map(SearchableItem::from).collect()
        }
    };
    Ok(items)
}

/// Collects items from several collections, in registration order.
///
/// Registration is the one place an id collision can be caught before the
/// corpus reaches the index, so a duplicate id is an error here.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    items: Vec<SearchableItem>,
    ids: HashSet<String>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a collection. Nothing is registered if any id collides.
    pub fn register(&mut self, items: Vec<SearchableItem>) -> Result<usize> {
        {
            let mut incoming = HashSet::new();
            for item in &items {
                if self.ids.contains(&item.id) || !incoming.insert(item.id.as_str()) {
                    bail!("duplicate content id: {}", item.id);
                }
            }
        }
        let n = items.len();
        for item in items {
            self.ids.insert(item.id.clone());
            self.items.push(item);
        }
        Ok(n)
    }

    pub fn items(&self) -> &[SearchableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<SearchableItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECTS: &str = r#"[
        {
            "slug": "digital-workbench",
            "title": "Digital Workbench Portfolio",
            "description": "Modern React portfolio",
            "techStack": ["React", "TypeScript"],
            "tags": ["Portfolio"],
            "category": "Web Development",
            "date": "2025-01-15",
            "featured": true
        }
    ]"#;

    #[test]
    fn project_maps_tech_stack_and_defaults_content() {
        let items = parse_collection(ContentKind::Project, PROJECTS).unwrap();
        assert_eq!(items.len(), 1);
        let p = &items[0];
        assert_eq!(p.id, "digital-workbench");
        assert_eq!(p.kind, ContentKind::Project);
        assert_eq!(p.content, p.description);
        assert_eq!(p.technologies, vec!["React", "TypeScript"]);
        assert!(p.featured);
    }

    #[test]
    fn article_uses_body_when_present() {
        let json = r#"[{
            "slug": "web-vitals",
            "title": "Core Web Vitals",
            "summary": "Measuring what matters",
            "content": "LCP, CLS and INP explained.",
            "category": "Performance",
            "publishedAt": "2024-11-02"
        }]"#;
        let items = parse_collection(ContentKind::Article, json).unwrap();
        assert_eq!(items[0].kind, ContentKind::Article);
        assert_eq!(items[0].description, "Measuring what matters");
        assert_eq!(items[0].content, "LCP, CLS and INP explained.");
        assert!(items[0].technologies.is_empty());
        assert!(!items[0].featured);
    }

    #[test]
    fn malformed_date_is_an_error() {
        let json = r#"[{"slug":"a","title":"A","excerpt":"e","category":"c","date":"yesterday"}]"#;
        assert!(parse_collection(ContentKind::Article, json).is_err());
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let mut registry = ContentRegistry::new();
        let items = parse_collection(ContentKind::Project, PROJECTS).unwrap();
        assert_eq!(registry.register(items.clone()).unwrap(), 1);
        let err = registry.register(items).unwrap_err();
        assert!(err.to_string().contains("digital-workbench"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_preserves_registration_order() {
        let cs = vec![CaseStudyRecord {
            slug: "cs-1".into(),
            title: "Checkout rewrite".into(),
            summary: "Halved checkout latency".into(),
            body: None,
            technologies: vec!["Rust".into()],
            tags: vec![],
            category: "Performance".into(),
            date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            featured: false,
        }];
        let mut registry = ContentRegistry::new();
        registry
            .register(parse_collection(ContentKind::Project, PROJECTS).unwrap())
            .unwrap();
        registry
            .register(cs.into_iter().map(SearchableItem::from).collect())
            .unwrap();
        let ids: Vec<&str> = registry.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["digital-workbench", "cs-1"]);
        assert_eq!(registry.items()[1].kind, ContentKind::CaseStudy);
    }
}
