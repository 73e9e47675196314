//! Query interface state: input debouncing, keyboard navigation over a
//! result list, and filter-panel selection.
//!
//! These are plain state machines with injected time, so a host (a WASM
//! widget, a terminal UI, a test) drives them from its own event loop.

use std::time::{Duration, Instant};

use crate::models::{ContentKind, DateRange, SearchFilters};

/// Default quiet period before a typed query is searched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delays a query until input has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a keystroke. Replaces any pending query and restarts the timer.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some((query.into(), now));
    }

    /// The pending query, once, if the quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(q, _)| q)
            }
            _ => None,
        }
    }

    /// Fire immediately (e.g. on Enter).
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(q, _)| q)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending query becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Keys the result list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// What the host should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Selection moved to this index.
    Select(usize),
    /// Open the result at this index.
    Open(usize),
    /// Dismiss the result list.
    Close,
}

/// Selection cursor over a result list of known length. Movement wraps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultCursor {
    len: usize,
    selected: Option<usize>,
}

impl ResultCursor {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selected: None,
        }
    }

    /// New result list: forget the selection.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn handle(&mut self, key: NavKey) -> Option<NavAction> {
        match key {
            NavKey::Escape => {
                self.selected = None;
                Some(NavAction::Close)
            }
            NavKey::Enter => self.selected.map(NavAction::Open),
            _ if self.len == 0 => None,
            NavKey::ArrowDown => {
                let next = match self.selected {
                    Some(i) if i + 1 < self.len => i + 1,
                    _ => 0,
                };
                self.selected = Some(next);
                Some(NavAction::Select(next))
            }
            NavKey::ArrowUp => {
                let prev = match self.selected {
                    Some(i) if i > 0 => i - 1,
                    _ => self.len - 1,
                };
                self.selected = Some(prev);
                Some(NavAction::Select(prev))
            }
        }
    }
}

/// Checkbox-style facet selection that produces [`SearchFilters`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanel {
    filters: SearchFilters,
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T) -> bool {
    if let Some(pos) = values.iter().position(|v| *v == value) {
        values.remove(pos);
        false
    } else {
        values.push(value);
        true
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a kind; returns whether it is now selected.
    pub fn toggle_type(&mut self, kind: ContentKind) -> bool {
        toggle(&mut self.filters.types, kind)
    }

    pub fn toggle_category(&mut self, category: impl Into<String>) -> bool {
        toggle(&mut self.filters.categories, category.into())
    }

    pub fn toggle_tag(&mut self, tag: impl Into<String>) -> bool {
        toggle(&mut self.filters.tags, tag.into())
    }

    pub fn toggle_technology(&mut self, technology: impl Into<String>) -> bool {
        toggle(&mut self.filters.technologies, technology.into())
    }

    pub fn set_featured(&mut self, featured: Option<bool>) {
        self.filters.featured = featured;
    }

    pub fn set_date_range(&mut self, range: Option<DateRange>) {
        self.filters.date_range = range;
    }

    pub fn clear(&mut self) {
        self.filters = SearchFilters::default();
    }

    /// Number of selected values across all facets, for a "Filters (n)" badge.
    pub fn active_count(&self) -> usize {
        let f = &self.filters;
        f.types.len()
            + f.categories.len()
            + f.tags.len()
            + f.technologies.len()
            + usize::from(f.featured.is_some())
            + usize::from(f.date_range.is_some())
    }

    pub fn to_filters(&self) -> SearchFilters {
        self.filters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debouncer_waits_for_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.input("r", t0);
        d.input("ru", t0 + Duration::from_millis(100));
        assert_eq!(d.poll(t0 + Duration::from_millis(350)), None);
        assert_eq!(d.deadline(), Some(t0 + Duration::from_millis(400)));
        assert_eq!(d.poll(t0 + Duration::from_millis(400)).as_deref(), Some("ru"));
        assert_eq!(d.poll(t0 + Duration::from_millis(900)), None);
    }

    #[test]
    fn debouncer_flush_and_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_secs(1));
        d.input("rust", t0);
        assert_eq!(d.flush().as_deref(), Some("rust"));
        assert!(!d.is_pending());
        d.input("wasm", t0);
        d.cancel();
        assert_eq!(d.poll(t0 + Duration::from_secs(2)), None);
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut c = ResultCursor::new(3);
        assert_eq!(c.handle(NavKey::ArrowUp), Some(NavAction::Select(2)));
        assert_eq!(c.handle(NavKey::ArrowDown), Some(NavAction::Select(0)));
        assert_eq!(c.handle(NavKey::ArrowDown), Some(NavAction::Select(1)));
        assert_eq!(c.handle(NavKey::Enter), Some(NavAction::Open(1)));
        assert_eq!(c.handle(NavKey::Escape), Some(NavAction::Close));
        assert_eq!(c.selected(), None);
    }

    #[test]
    fn cursor_on_empty_list() {
        let mut c = ResultCursor::new(0);
        assert_eq!(c.handle(NavKey::ArrowDown), None);
        assert_eq!(c.handle(NavKey::Enter), None);
        c.reset(1);
        assert_eq!(c.handle(NavKey::ArrowDown), Some(NavAction::Select(0)));
        assert_eq!(c.handle(NavKey::ArrowDown), Some(NavAction::Select(0)));
    }

    #[test]
    fn filter_panel_toggles_and_counts() {
        let mut p = FilterPanel::new();
        assert!(p.toggle_type(ContentKind::Article));
        assert!(p.toggle_tag("Rust"));
        assert!(!p.toggle_tag("Rust"));
        p.set_featured(Some(true));
        assert_eq!(p.active_count(), 2);
        let f = p.to_filters();
        assert_eq!(f.types, vec![ContentKind::Article]);
        assert!(f.tags.is_empty());
        p.clear();
        assert!(p.to_filters().is_empty());
    }
}
