//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::HashSet;
use std::time::{Duration, Instant};

use richedit::config::EngineConfig;
use richedit::editable::RichText;
use richedit::format::AttributeKind;

/// Create a document with default configuration
pub fn doc(text: &str) -> RichText {
    RichText::with_text(text, EngineConfig::default())
}

/// Create a document whose history holds at most `capacity` snapshots
pub fn doc_with_capacity(text: &str, capacity: usize) -> RichText {
    let mut config = EngineConfig::default();
    config.history.capacity = capacity;
    RichText::with_text(text, config)
}

/// Create a document from markup, panicking on malformed input
pub fn doc_from_markup(markup: &str) -> RichText {
    RichText::from_markup(markup, EngineConfig::default()).expect("valid markup")
}

/// `(start, end)` of every span of `kind`, in order
pub fn ranges(doc: &RichText, kind: AttributeKind) -> Vec<(usize, usize)> {
    doc.spans()
        .spans(kind)
        .iter()
        .map(|s| (s.start, s.end))
        .collect()
}

/// `(start, end, url)` of every link
pub fn links(doc: &RichText) -> Vec<(usize, usize, String)> {
    doc.spans()
        .spans(AttributeKind::Link)
        .iter()
        .map(|s| (s.start, s.end, s.payload.clone().unwrap_or_default()))
        .collect()
}

/// An instant far enough ahead that any pending capture is due
pub fn after_debounce() -> Instant {
    Instant::now() + Duration::from_secs(60)
}

/// Assert that every paragraph span covers exactly one whole, non-empty line
pub fn assert_line_aligned(doc: &RichText) {
    let text: Vec<char> = doc.text().chars().collect();
    for kind in [AttributeKind::Bullet, AttributeKind::Quote] {
        for span in doc.spans().spans(kind) {
            assert!(span.start < span.end, "empty {} span {:?}", kind, span);
            assert!(
                span.start == 0 || text[span.start - 1] == '\n',
                "{} span {:?} starts mid-line in {:?}",
                kind,
                span,
                doc.text()
            );
            assert!(
                span.end == text.len() || text[span.end] == '\n',
                "{} span {:?} ends mid-line in {:?}",
                kind,
                span,
                doc.text()
            );
            assert!(
                !text[span.start..span.end].contains(&'\n'),
                "{} span {:?} crosses a line break",
                kind,
                span
            );
        }
    }
}

/// Assert that no two same-kind spans overlap, or abut with equal payload,
/// and that at most one span of a kind extends over text typed at any point
pub fn assert_coalesced(doc: &RichText) {
    for kind in AttributeKind::ALL {
        let spans = doc.spans().spans(kind);
        let mut claimed = HashSet::new();
        for span in spans.iter().filter(|s| s.sticky_at_end) {
            assert!(
                claimed.insert(span.end),
                "{} spans both extend at {}: {:?}",
                kind,
                span.end,
                spans
            );
        }
        for pair in spans.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.end <= b.start, "{} spans overlap: {:?} {:?}", kind, a, b);
            if a.end == b.start && !a.is_empty() && !b.is_empty() {
                assert_ne!(
                    a.payload, b.payload,
                    "{} spans not merged: {:?} {:?}",
                    kind, a, b
                );
            }
        }
    }
}
