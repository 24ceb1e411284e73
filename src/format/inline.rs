//! Character-range attributes: bold, italic, underline, strikethrough, link.
//!
//! Callers validate the range and payload; these functions only maintain the
//! store invariants.

use super::kind::AttributeKind;
use super::span::Span;
use super::store::SpanStore;

/// Apply `kind` over `[start, end)`.
///
/// A zero-width range only arms the caret: a span ending there becomes
/// sticky, or a sticky marker is placed if nothing ends there. Spans of the
/// same kind with another payload lose their claim on that caret.
pub fn apply(
    store: &mut SpanStore,
    kind: AttributeKind,
    start: usize,
    end: usize,
    payload: Option<String>,
) {
    debug_assert!(!kind.is_paragraph());

    if start == end {
        disarm_others(store, kind, start, payload.as_deref());
        let ending: Vec<Span> = store
            .ending_at(kind, start)
            .filter(|s| s.payload == payload)
            .cloned()
            .collect();
        if !ending.is_empty() {
            for span in &ending {
                store.reflag(span, true);
            }
            return;
        }
        if store.touching(kind, start).any(|s| s.strictly_contains(start)) {
            return;
        }
        store.insert(Span::new(kind, start, start).with_payload(payload).sticky(true));
        return;
    }

    clear(store, kind, start, end);

    // Inserting coalesces with abutting spans of the same kind and payload,
    // which absorbs neighbours for the splittable kinds. Links never abut a
    // same-payload neighbour after the clear unless the URL matches.
    disarm_others(store, kind, end, payload.as_deref());
    store.insert(Span::new(kind, start, end).with_payload(payload).sticky(true));
}

/// Only one payload of a kind may extend over text typed at `pos`: drop
/// other-payload markers there and stop other-payload spans ending there
/// from growing.
fn disarm_others(store: &mut SpanStore, kind: AttributeKind, pos: usize, payload: Option<&str>) {
    let others: Vec<Span> = store
        .ending_at(kind, pos)
        .filter(|s| s.payload.as_deref() != payload)
        .cloned()
        .collect();
    for span in &others {
        if span.is_empty() {
            store.remove(span);
        } else {
            store.reflag(span, false);
        }
    }
}

/// Remove `kind` from `[start, end)`.
///
/// A zero-width range disarms the caret instead: spans ending there stop
/// being sticky and a marker there is dropped. Enclosing spans are kept.
pub fn clear(store: &mut SpanStore, kind: AttributeKind, start: usize, end: usize) {
    debug_assert!(!kind.is_paragraph());

    if start == end {
        let ending: Vec<Span> = store.ending_at(kind, start).cloned().collect();
        for span in &ending {
            if span.is_empty() {
                store.remove(span);
            } else {
                store.reflag(span, false);
            }
        }
        return;
    }

    let hits: Vec<Span> = store.overlapping(kind, start, end).cloned().collect();
    for span in hits {
        store.remove(&span);
        if !kind.is_splittable() || span.is_empty() {
            continue;
        }
        if span.start < start {
            store.insert(
                Span::new(kind, span.start, start)
                    .with_payload(span.payload.clone())
                    .sticky(true),
            );
        }
        if end < span.end {
            store.insert(
                Span::new(kind, end, span.end)
                    .with_payload(span.payload.clone())
                    .sticky(span.sticky_at_end),
            );
        }
    }
}

/// Whether `[start, end)` is fully formatted with `kind`.
///
/// At a caret, true when a span strictly contains it or a sticky span ends
/// there. A span merely starting at the caret does not count.
pub fn query(store: &SpanStore, kind: AttributeKind, start: usize, end: usize) -> bool {
    if start == end {
        return store
            .ending_at(kind, start)
            .any(|s| s.sticky_at_end)
            || store.touching(kind, start).any(|s| s.strictly_contains(start));
    }

    let mut covered = start;
    for span in store.overlapping(kind, start, end) {
        if span.is_empty() {
            continue;
        }
        if span.start > covered {
            return false;
        }
        covered = covered.max(span.end);
        if covered >= end {
            return true;
        }
    }
    covered >= end
}

/// Clear if fully formatted, apply otherwise
pub fn toggle(
    store: &mut SpanStore,
    kind: AttributeKind,
    start: usize,
    end: usize,
    payload: Option<String>,
) {
    if query(store, kind, start, end) {
        clear(store, kind, start, end);
    } else {
        apply(store, kind, start, end, payload);
    }
}
