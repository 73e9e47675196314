//! The search manager: corpus ownership, query execution, and caching.
//!
//! # Query pipeline
//!
//! 1. Look up `(generation, folded query, canonical filters)` in the cache.
//! 2. Keep items that satisfy every facet of the filters.
//! 3. For a non-empty query, score each item and drop zero scores.
//! 4. Sort by score (desc), then date (newest first); remaining ties keep
//!    corpus order.
//! 5. Cache and return.
//!
//! The corpus is an immutable snapshot replaced wholesale by
//! [`initialize`](SearchManager::initialize). A search holds the snapshot it
//! started with, and results are cached under that snapshot's generation, so
//! a re-initialize can never serve results computed for an older corpus.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::events::{SearchEvent, SearchObserver};
use crate::models::{DateRange, FilterOptions, SearchFilters, SearchResult, SearchableItem};
use crate::scoring::{self, IndexedItem, Query, RankingWeights};
use crate::text::{self, HighlightMarker};

/// Manager configuration.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub weights: RankingWeights,
    pub marker: HighlightMarker,
    /// Characters of context kept on each side of a content match.
    pub snippet_context: usize,
    /// Maximum cached result lists; the oldest entry is evicted first.
    pub cache_capacity: usize,
    /// Default limit for [`SearchManager::suggest`].
    pub suggestion_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            marker: HighlightMarker::default(),
            snippet_context: 50,
            cache_capacity: 128,
            suggestion_limit: 5,
        }
    }
}

struct Corpus {
    generation: u64,
    items: Vec<IndexedItem>,
}

type CacheKey = (u64, String, SearchFilters);

struct ResultCache {
    entries: HashMap<CacheKey, Arc<Vec<SearchResult>>>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl ResultCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn get(&self, key: &CacheKey) -> Option<Arc<Vec<SearchResult>>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: CacheKey, results: Arc<Vec<SearchResult>>) {
        if self.entries.insert(key.clone(), results).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Owns a corpus and answers queries over it.
///
/// Construct one per index at the composition root and hand out references;
/// there is no global instance.
pub struct SearchManager {
    settings: SearchSettings,
    corpus: RwLock<Arc<Corpus>>,
    cache: RwLock<ResultCache>,
    observers: Vec<Box<dyn SearchObserver>>,
}

impl SearchManager {
    pub fn new(settings: SearchSettings) -> Self {
        let cache = ResultCache::new(settings.cache_capacity);
        Self {
            settings,
            corpus: RwLock::new(Arc::new(Corpus {
                generation: 0,
                items: Vec::new(),
            })),
            cache: RwLock::new(cache),
            observers: Vec::new(),
        }
    }

    /// Attach an observer that is notified after every search.
    pub fn with_observer(mut self, observer: impl SearchObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Replace the corpus, derive searchable text, and start a new
    /// generation. Cached results from earlier generations are dropped.
    pub fn initialize(&self, items: Vec<SearchableItem>) {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                warn!(id = %item.id, "duplicate content id in corpus");
            }
        }

        let indexed: Vec<IndexedItem> = items.into_iter().map(IndexedItem::new).collect();
        let count = indexed.len();

        let generation = {
            let mut corpus = write(&self.corpus);
            let generation = corpus.generation + 1;
            *corpus = Arc::new(Corpus {
                generation,
                items: indexed,
            });
            generation
        };
        write(&self.cache).clear();

        debug!(generation, items = count, "search index built");
    }

    fn snapshot(&self) -> Arc<Corpus> {
        Arc::clone(&read(&self.corpus))
    }

    /// Current corpus generation. Zero before the first `initialize`.
    pub fn generation(&self) -> u64 {
        read(&self.corpus).generation
    }

    pub fn len(&self) -> usize {
        read(&self.corpus).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cached result lists.
    pub fn cache_len(&self) -> usize {
        read(&self.cache).len()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<SearchableItem> {
        self.snapshot()
            .items
            .iter()
            .find(|i| i.item.id == id)
            .map(|i| i.item.clone())
    }

    /// All items in corpus order, with searchable text populated.
    pub fn items(&self) -> Vec<SearchableItem> {
        self.snapshot().items.iter().map(|i| i.item.clone()).collect()
    }

    /// Run a query. Never fails: an empty or whitespace-only query applies
    /// no text constraint, and any other text is matched literally.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<SearchResult> {
        let corpus = self.snapshot();
        let parsed = Query::parse(query);
        let filters = filters.normalized();
        let key: CacheKey = (corpus.generation, parsed.text.clone(), filters.clone());

        let cached = read(&self.cache).get(&key);
        let (results, cache_hit) = match cached {
            Some(hit) => {
                debug!(query = %parsed.text, "search cache hit");
                (hit.as_ref().clone(), true)
            }
            None => {
                let results = self.execute(&corpus, &parsed, &filters);
                // A concurrent initialize may have replaced the corpus; its
                // generation is newer, so there is nothing to cache for.
                if self.generation() == corpus.generation {
                    write(&self.cache).insert(key, Arc::new(results.clone()));
                }
                (results, false)
            }
        };

        if !self.observers.is_empty() {
            let event = SearchEvent {
                query: query.trim().to_string(),
                filters,
                result_count: results.len(),
                cache_hit,
                generation: corpus.generation,
            };
            for observer in &self.observers {
                observer.on_search(&event);
            }
        }

        results
    }

    fn execute(&self, corpus: &Corpus, query: &Query, filters: &SearchFilters) -> Vec<SearchResult> {
        let s = &self.settings;
        let filtered = corpus.items.iter().filter(|i| filters.matches(&i.item));

        let mut results: Vec<SearchResult> = if query.is_empty() {
            filtered
                .map(|i| SearchResult {
                    item: i.item.clone(),
                    score: 0.0,
                    highlights: None,
                })
                .collect()
        } else {
            filtered
                .filter_map(|i| {
                    let score = scoring::score(i, query, &s.weights);
                    if score <= 0.0 {
                        return None;
                    }
                    Some(SearchResult {
                        item: i.item.clone(),
                        score,
                        highlights: scoring::highlights(&i.item, query, &s.marker, s.snippet_context),
                    })
                })
                .collect()
        };

        results.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(b.item.date.cmp(&a.item.date))
        });

        debug!(
            query = %query.text,
            results = results.len(),
            generation = corpus.generation,
            "search executed"
        );
        results
    }

    /// Suggestions with the configured default limit.
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        self.suggestions(partial, self.settings.suggestion_limit)
    }

    /// Titles, tags, and technologies containing `partial`, across the whole
    /// corpus, first-seen order, de-duplicated, at most `limit` entries.
    pub fn suggestions(&self, partial: &str, limit: usize) -> Vec<String> {
        let needle = text::fold(partial.trim());
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let corpus = self.snapshot();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();

        for indexed in &corpus.items {
            let item = &indexed.item;
            let candidates = std::iter::once(&item.title)
                .chain(item.tags.iter())
                .chain(item.technologies.iter());
            for candidate in candidates {
                if text::fold(candidate).contains(&needle) && seen.insert(candidate.as_str()) {
                    out.push(candidate.clone());
                    if out.len() == limit {
                        return out;
                    }
                }
            }
        }
        out
    }

    /// Distinct facet values across the whole corpus, each sorted.
    pub fn filter_options(&self) -> FilterOptions {
        let corpus = self.snapshot();
        let mut types = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();
        let mut technologies = BTreeSet::new();
        let mut date_bounds: Option<DateRange> = None;

        for indexed in &corpus.items {
            let item = &indexed.item;
            types.insert(item.kind);
            categories.insert(item.category.clone());
            tags.extend(item.tags.iter().cloned());
            technologies.extend(item.technologies.iter().cloned());
            date_bounds = Some(match date_bounds {
                None => DateRange::new(item.date, item.date),
                Some(r) => DateRange::new(r.start.min(item.date), r.end.max(item.date)),
            });
        }

        FilterOptions {
            types: types.into_iter().collect(),
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
            technologies: technologies.into_iter().collect(),
            date_bounds,
        }
    }
}

impl Default for SearchManager {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}
