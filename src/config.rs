//! TOML configuration.
//!
//! Relative paths (content sources, history file) are resolved against the
//! directory containing the config file, so a site can keep `config/`,
//! `content/`, and `data/` side by side and run `wbs` from anywhere.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use workbench_search_core::manager::SearchSettings;
use workbench_search_core::models::ContentKind;
use workbench_search_core::scoring::RankingWeights;
use workbench_search_core::text::HighlightMarker;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// One JSON content collection.
#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub name: String,
    pub kind: ContentKind,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_snippet_context")]
    pub snippet_context: usize,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_highlight_open")]
    pub highlight_open: String,
    #[serde(default = "default_highlight_close")]
    pub highlight_close: String,
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_context: default_snippet_context(),
            suggestion_limit: default_suggestion_limit(),
            cache_capacity: default_cache_capacity(),
            highlight_open: default_highlight_open(),
            highlight_close: default_highlight_close(),
            result_limit: default_result_limit(),
        }
    }
}

fn default_snippet_context() -> usize {
    50
}
fn default_suggestion_limit() -> usize {
    5
}
fn default_cache_capacity() -> usize {
    128
}
fn default_highlight_open() -> String {
    "<mark>".to_string()
}
fn default_highlight_close() -> String {
    "</mark>".to_string()
}
fn default_result_limit() -> usize {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default = "default_title_weight")]
    pub title: f64,
    #[serde(default = "default_description_weight")]
    pub description: f64,
    #[serde(default = "default_content_weight")]
    pub content: f64,
    #[serde(default = "default_tag_weight")]
    pub tag: f64,
    #[serde(default = "default_technology_weight")]
    pub technology: f64,
    #[serde(default = "default_featured_boost")]
    pub featured_boost: f64,
    #[serde(default = "default_phrase_boost")]
    pub phrase_boost: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            description: default_description_weight(),
            content: default_content_weight(),
            tag: default_tag_weight(),
            technology: default_technology_weight(),
            featured_boost: default_featured_boost(),
            phrase_boost: default_phrase_boost(),
        }
    }
}

fn default_title_weight() -> f64 {
    10.0
}
fn default_description_weight() -> f64 {
    5.0
}
fn default_content_weight() -> f64 {
    2.0
}
fn default_tag_weight() -> f64 {
    8.0
}
fn default_technology_weight() -> f64 {
    6.0
}
fn default_featured_boost() -> f64 {
    1.2
}
fn default_phrase_boost() -> f64 {
    1.5
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            limit: default_history_limit(),
        }
    }
}

fn default_history_path() -> PathBuf {
    PathBuf::from("data/history.json")
}
fn default_history_limit() -> usize {
    5
}

impl Config {
    /// No sources, every default.
    #[cfg(test)]
    pub fn minimal() -> Self {
        Self {
            sources: Vec::new(),
            search: SearchConfig::default(),
            ranking: RankingConfig::default(),
            history: HistoryConfig::default(),
        }
    }

    /// Manager settings derived from `[search]` and `[ranking]`.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            weights: RankingWeights {
                title: self.ranking.title,
                description: self.ranking.description,
                content: self.ranking.content,
                tag: self.ranking.tag,
                technology: self.ranking.technology,
                featured_boost: self.ranking.featured_boost,
                phrase_boost: self.ranking.phrase_boost,
            },
            marker: HighlightMarker {
                open: self.search.highlight_open.clone(),
                close: self.search.highlight_close.clone(),
            },
            snippet_context: self.search.snippet_context,
            cache_capacity: self.search.cache_capacity,
            suggestion_limit: self.search.suggestion_limit,
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        for source in &mut self.sources {
            if source.path.is_relative() {
                source.path = base.join(&source.path);
            }
        }
        if self.history.path.is_relative() {
            self.history.path = base.join(&self.history.path);
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    config.resolve_paths(base);

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    // Validate sources
    let mut names = HashSet::new();
    for source in &config.sources {
        if source.name.trim().is_empty() {
            bail!("sources.name must not be empty");
        }
        if !names.insert(source.name.as_str()) {
            bail!("duplicate source name: '{}'", source.name);
        }
    }

    // Validate ranking
    let r = &config.ranking;
    for (name, value) in [
        ("title", r.title),
        ("description", r.description),
        ("content", r.content),
        ("tag", r.tag),
        ("technology", r.technology),
    ] {
        if !value.is_finite() || value < 0.0 {
            bail!("ranking.{} must be a finite number >= 0", name);
        }
    }
    for (name, value) in [
        ("featured_boost", r.featured_boost),
        ("phrase_boost", r.phrase_boost),
    ] {
        if !value.is_finite() || value < 1.0 {
            bail!("ranking.{} must be a finite number >= 1.0", name);
        }
    }

    // Validate search
    if config.search.cache_capacity < 1 {
        bail!("search.cache_capacity must be >= 1");
    }
    if config.search.result_limit < 1 {
        bail!("search.result_limit must be >= 1");
    }

    // Validate history
    if config.history.limit < 1 {
        bail!("history.limit must be >= 1");
    }

    Ok(())
}
