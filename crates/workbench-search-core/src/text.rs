//! Literal, case-insensitive text matching and highlight markup.
//!
//! Nothing in this module builds a pattern from user input: queries are
//! compared as plain character sequences after per-character Unicode
//! lower-casing, so `.`, `*`, `(` and friends only ever match themselves.

use std::ops::Range;

/// Per-character lower-casing. Used for both corpus text and queries so the
/// two sides always fold identically.
pub fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
///
/// Both arguments are expected to be folded already.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Wrappers placed around highlighted spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self {
            open: "<mark>".to_string(),
            close: "</mark>".to_string(),
        }
    }
}

struct Unit {
    ch: char,
    start: usize,
    end: usize,
}

/// A folded view of some original text that remembers, for every folded
/// character, the byte span of the original character it came from.
pub struct FoldedText<'a> {
    text: &'a str,
    units: Vec<Unit>,
}

impl<'a> FoldedText<'a> {
    pub fn new(text: &'a str) -> Self {
        let units = text
            .char_indices()
            .flat_map(|(start, c)| {
                let end = start + c.len_utf8();
                c.to_lowercase().map(move |ch| Unit { ch, start, end })
            })
            .collect();
        Self { text, units }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Byte range in the original text of the first occurrence of the
    /// (already folded) `needle`.
    pub fn find(&self, needle: &str) -> Option<Range<usize>> {
        let needle: Vec<char> = needle.chars().collect();
        if needle.is_empty() || needle.len() > self.units.len() {
            return None;
        }
        (0..=self.units.len() - needle.len())
            .find(|&i| {
                self.units[i..i + needle.len()]
                    .iter()
                    .zip(&needle)
                    .all(|(u, c)| u.ch == *c)
            })
            .map(|i| self.units[i].start..self.units[i + needle.len() - 1].end)
    }
}

/// Wrap every range with the marker. Overlapping ranges are merged first.
pub fn mark(text: &str, ranges: &[Range<usize>], marker: &HighlightMarker) -> String {
    let mut sorted: Vec<Range<usize>> = ranges.to_vec();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(sorted.len());
    for r in sorted {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }

    let mut out = String::with_capacity(text.len() + merged.len() * (marker.open.len() + marker.close.len()));
    let mut cursor = 0;
    for r in merged {
        out.push_str(&text[cursor..r.start]);
        out.push_str(&marker.open);
        out.push_str(&text[r.start..r.end]);
        out.push_str(&marker.close);
        cursor = r.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Highlight the first occurrence of each term. `None` when no term occurs.
pub fn highlight(text: &str, terms: &[&str], marker: &HighlightMarker) -> Option<String> {
    let folded = FoldedText::new(text);
    let ranges: Vec<Range<usize>> = terms.iter().filter_map(|t| folded.find(t)).collect();
    if ranges.is_empty() {
        None
    } else {
        Some(mark(text, &ranges, marker))
    }
}

/// A window of `text` around its earliest term match, with `context`
/// characters on either side, terms highlighted, and `...` where the window
/// was cut. `None` when no term occurs.
pub fn snippet(text: &str, terms: &[&str], context: usize, marker: &HighlightMarker) -> Option<String> {
    let folded = FoldedText::new(text);
    let first = terms
        .iter()
        .filter_map(|t| folded.find(t))
        .min_by_key(|r| r.start)?;

    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total = offsets.len();
    let byte_at = |char_idx: usize| offsets.get(char_idx).copied().unwrap_or(text.len());

    let match_start = offsets.partition_point(|&b| b < first.start);
    let match_end = offsets.partition_point(|&b| b < first.end);
    let start = match_start.saturating_sub(context);
    let end = (match_end + context).min(total);

    let window = &text[byte_at(start)..byte_at(end)];
    let body = highlight(window, terms, marker).unwrap_or_else(|| window.to_string());

    let mut out = String::with_capacity(body.len() + 6);
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(&body);
    if end < total {
        out.push_str("...");
    }
    Some(out)
}
