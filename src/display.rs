//! Terminal rendering of highlighted text.
//!
//! Highlights arrive wrapped in the configured marker. On a terminal the
//! marker becomes ANSI bold; when stdout is piped it is stripped so the
//! output stays plain text.

use workbench_search_core::text::HighlightMarker;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Ansi,
    Plain,
}

impl Style {
    pub fn for_stdout() -> Self {
        if atty::is(atty::Stream::Stdout) {
            Style::Ansi
        } else {
            Style::Plain
        }
    }
}

/// Replace marker pairs in `text` according to `style`.
pub fn render(text: &str, marker: &HighlightMarker, style: Style) -> String {
    if marker.open.is_empty() || marker.close.is_empty() {
        return text.to_string();
    }
    let (open, close) = match style {
        Style::Ansi => (BOLD, RESET),
        Style::Plain => ("", ""),
    };

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(&marker.open) {
        let after_open = &rest[start + marker.open.len()..];
        match after_open.find(&marker.close) {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(open);
                out.push_str(&after_open[..end]);
                out.push_str(close);
                rest = &after_open[end + marker.close.len()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
