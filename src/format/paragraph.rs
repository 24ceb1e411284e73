//! Line-aligned attributes: bullet and quote.
//!
//! Every paragraph span covers exactly one non-empty line. Ranges passed in
//! are widened to whole lines first, and `normalize` restores the alignment
//! after raw text edits moved span bounds.

use crate::editable::TextBuffer;

use super::kind::AttributeKind;
use super::span::Span;
use super::store::SpanStore;

/// Format every non-empty line touched by `[start, end)` that is not
/// already formatted
pub fn apply(
    buffer: &TextBuffer,
    store: &mut SpanStore,
    kind: AttributeKind,
    start: usize,
    end: usize,
) {
    debug_assert!(kind.is_paragraph());
    for line in buffer.lines_in(start, end) {
        if line.is_empty() || store.covers_any(kind, line.start, line.end) {
            continue;
        }
        store.insert(Span::new(kind, line.start, line.end));
    }
}

/// Remove `kind` from every line touched by `[start, end)`
pub fn clear(
    buffer: &TextBuffer,
    store: &mut SpanStore,
    kind: AttributeKind,
    start: usize,
    end: usize,
) {
    debug_assert!(kind.is_paragraph());
    let from = buffer.line_start(start);
    let to = buffer.line_end(end);
    let hits: Vec<Span> = store.overlapping(kind, from, to).cloned().collect();
    for span in &hits {
        store.remove(span);
    }
}

/// Whether every non-empty line touched by `[start, end)` carries `kind`.
///
/// False when the touched lines are all empty.
pub fn query(
    buffer: &TextBuffer,
    store: &SpanStore,
    kind: AttributeKind,
    start: usize,
    end: usize,
) -> bool {
    let mut saw_line = false;
    for line in buffer.lines_in(start, end) {
        if line.is_empty() {
            continue;
        }
        if !store.covers_any(kind, line.start, line.end) {
            return false;
        }
        saw_line = true;
    }
    saw_line
}

/// Clear if every line is formatted, apply otherwise
pub fn toggle(
    buffer: &TextBuffer,
    store: &mut SpanStore,
    kind: AttributeKind,
    start: usize,
    end: usize,
) {
    if query(buffer, store, kind, start, end) {
        clear(buffer, store, kind, start, end);
    } else {
        apply(buffer, store, kind, start, end);
    }
}

/// Whether `span` covers exactly one whole, non-empty line
fn is_aligned(buffer: &TextBuffer, span: &Span) -> bool {
    !span.is_empty()
        && buffer.line_start(span.start) == span.start
        && buffer.line_end(span.start) == span.end
}

/// Re-align spans of `kind` after a text edit.
///
/// A misaligned span is replaced by one span per non-empty line across its
/// widened extent. Returns the number of spans repaired.
pub fn normalize(buffer: &TextBuffer, store: &mut SpanStore, kind: AttributeKind) -> usize {
    debug_assert!(kind.is_paragraph());
    let stale: Vec<Span> = store
        .spans(kind)
        .iter()
        .filter(|s| !is_aligned(buffer, s))
        .cloned()
        .collect();

    for span in &stale {
        tracing::trace!(
            kind = %kind,
            start = span.start,
            end = span.end,
            "re-aligning paragraph span"
        );
        store.remove(span);
        if span.is_empty() {
            continue;
        }
        apply(buffer, store, kind, span.start, span.end);
    }
    stale.len()
}
