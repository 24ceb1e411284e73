//! Ordered storage of formatting spans, one lane per attribute kind.
//!
//! Each lane is a `Vec<Span>` sorted by `(start, end)`. Within a lane
//! non-empty spans never overlap and zero-width markers never sit strictly
//! inside a non-empty span, so span ends are sorted as well. That lets every
//! query binary-search to the first candidate and stop after the last one.

use super::kind::AttributeKind;
use super::span::Span;

/// The interval store shared by the inline and paragraph managers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanStore {
    lanes: [Vec<Span>; AttributeKind::COUNT],
}

impl SpanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All spans of one kind, ordered by start
    pub fn spans(&self, kind: AttributeKind) -> &[Span] {
        &self.lanes[kind.lane()]
    }

    /// Every span in the store, grouped by kind
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.lanes.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Vec::is_empty)
    }

    /// Index of the first span whose end is at or past `pos`
    fn first_candidate(lane: &[Span], pos: usize) -> usize {
        lane.partition_point(|s| s.end < pos)
    }

    /// Spans of `kind` whose closed extent meets `[start, end]`
    fn window(&self, kind: AttributeKind, start: usize, end: usize) -> &[Span] {
        let lane = &self.lanes[kind.lane()];
        let first = Self::first_candidate(lane, start);
        let last = first + lane[first..].partition_point(|s| s.start <= end);
        &lane[first..last]
    }

    /// Spans of `kind` sharing at least one character with `[start, end)`,
    /// plus markers inside it
    pub fn overlapping(
        &self,
        kind: AttributeKind,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = &Span> + '_ {
        self.window(kind, start, end)
            .iter()
            .filter(move |s| s.intersects(start, end))
    }

    /// Spans of `kind` whose `[start, end)` contains `pos`, plus markers at `pos`
    pub fn touching(&self, kind: AttributeKind, pos: usize) -> impl Iterator<Item = &Span> + '_ {
        self.window(kind, pos, pos)
            .iter()
            .filter(move |s| (s.start <= pos && pos < s.end) || (s.is_empty() && s.start == pos))
    }

    /// Spans of `kind` whose end is exactly `pos`
    pub fn ending_at(&self, kind: AttributeKind, pos: usize) -> impl Iterator<Item = &Span> + '_ {
        self.window(kind, pos, pos)
            .iter()
            .filter(move |s| s.end == pos)
    }

    /// Whether any span of `kind` shares a character with `[start, end)`
    pub fn covers_any(&self, kind: AttributeKind, start: usize, end: usize) -> bool {
        self.window(kind, start, end)
            .iter()
            .any(|s| !s.is_empty() && s.intersects(start, end))
    }

    /// Insert a span, coalescing it with touching or overlapping spans of
    /// the same kind and payload.
    ///
    /// Callers are responsible for clearing spans of the same kind with a
    /// different payload out of the way first.
    pub fn insert(&mut self, span: Span) {
        let lane = &mut self.lanes[span.kind.lane()];

        if span.is_empty() {
            // Markers only ever merge with an identical marker
            if let Some(existing) = lane
                .iter_mut()
                .find(|s| s.is_empty() && s.start == span.start && s.same_attribute(&span))
            {
                existing.sticky_at_end |= span.sticky_at_end;
                return;
            }
            let idx = lane.partition_point(|s| (s.start, s.end) <= (span.start, span.end));
            tracing::trace!(kind = %span.kind, pos = span.start, "insert marker");
            lane.insert(idx, span);
            return;
        }

        let mut merged = span;
        let mut sticky_candidates = vec![(merged.end, merged.sticky_at_end)];
        let first = Self::first_candidate(lane, merged.start);
        let mut idx = first;
        while idx < lane.len() && lane[idx].start <= merged.end {
            let candidate = &lane[idx];
            if candidate.same_attribute(&merged) && candidate.end >= merged.start {
                let absorbed = lane.remove(idx);
                merged.start = merged.start.min(absorbed.start);
                merged.end = merged.end.max(absorbed.end);
                sticky_candidates.push((absorbed.end, absorbed.sticky_at_end));
                continue;
            }
            idx += 1;
        }
        merged.sticky_at_end = sticky_candidates
            .iter()
            .any(|&(end, sticky)| end == merged.end && sticky);

        tracing::trace!(
            kind = %merged.kind,
            start = merged.start,
            end = merged.end,
            "insert span"
        );
        let idx = lane.partition_point(|s| (s.start, s.end) <= (merged.start, merged.end));
        lane.insert(idx, merged);
    }

    /// Remove a span equal to `span`. Returns whether one was found.
    pub fn remove(&mut self, span: &Span) -> bool {
        let lane = &mut self.lanes[span.kind.lane()];
        match lane.iter().position(|s| s == span) {
            Some(idx) => {
                lane.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Change the end-stickiness of a stored span
    pub fn reflag(&mut self, span: &Span, sticky_at_end: bool) -> bool {
        let lane = &mut self.lanes[span.kind.lane()];
        match lane.iter_mut().find(|s| *s == span) {
            Some(existing) => {
                existing.sticky_at_end = sticky_at_end;
                true
            }
            None => false,
        }
    }

    /// Drop every span of `kind`
    pub fn clear_kind(&mut self, kind: AttributeKind) {
        self.lanes[kind.lane()].clear();
    }

    // =========================================================================
    // Text edit adjustment
    // =========================================================================

    /// Move span bounds to account for `len` chars inserted at `pos`
    pub fn shift_for_insert(&mut self, pos: usize, len: usize) {
        if len == 0 {
            return;
        }
        for span in self.lanes.iter_mut().flatten() {
            if span.is_empty() {
                if span.start > pos {
                    span.start += len;
                    span.end += len;
                } else if span.start == pos {
                    if span.sticky_at_end {
                        span.end += len;
                    } else {
                        span.start += len;
                        span.end += len;
                    }
                }
                continue;
            }

            if span.start >= pos {
                span.start += len;
                span.end += len;
            } else if pos < span.end || (pos == span.end && span.sticky_at_end) {
                span.end += len;
            }
        }
        self.settle();
    }

    /// Collapse span bounds to account for `[start, end)` being deleted
    pub fn collapse_for_delete(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let removed = end - start;
        let map = |x: usize| {
            if x <= start {
                x
            } else if x >= end {
                x - removed
            } else {
                start
            }
        };
        for lane in &mut self.lanes {
            for span in lane.iter_mut() {
                let was_empty = span.is_empty();
                span.start = map(span.start);
                span.end = map(span.end);
                if !was_empty && span.is_empty() && span.kind.is_paragraph() {
                    span.sticky_at_end = false;
                }
            }
        }
        self.settle();
    }

    /// Restore lane ordering and coalescing after bounds moved.
    ///
    /// Empty spans survive only as sticky inline markers, and a marker at
    /// the end of a same-attribute span folds into that span. A marker
    /// inside a span of its kind, or at a position another span of its kind
    /// already extends over, is dropped whatever its payload.
    fn settle(&mut self) {
        for lane in &mut self.lanes {
            lane.retain(|s| !s.is_empty() || (s.sticky_at_end && !s.kind.is_paragraph()));
            lane.sort_by_key(|s| (s.start, s.end));

            let mut settled: Vec<Span> = Vec::with_capacity(lane.len());
            for span in lane.drain(..) {
                let Some(prev) = settled
                    .iter_mut()
                    .rev()
                    .find(|p| p.same_attribute(&span) && !p.is_empty())
                else {
                    settled.push(span);
                    continue;
                };
                if span.is_empty() {
                    if prev.end == span.start {
                        prev.sticky_at_end |= span.sticky_at_end;
                    } else {
                        settled.push(span);
                    }
                } else if span.start <= prev.end {
                    if span.end >= prev.end {
                        prev.sticky_at_end = span.sticky_at_end
                            || (span.end == prev.end && prev.sticky_at_end);
                        prev.end = span.end;
                    }
                } else {
                    settled.push(span);
                }
            }
            settled.sort_by_key(|s| (s.start, s.end));

            let mut reach = 0;
            let mut claimed = None;
            settled.retain(|span| {
                if !span.is_empty() {
                    reach = reach.max(span.end);
                    if span.sticky_at_end {
                        claimed = Some(span.end);
                    }
                    return true;
                }
                if span.start < reach || claimed == Some(span.start) {
                    tracing::trace!(kind = %span.kind, pos = span.start, "drop shadowed marker");
                    return false;
                }
                claimed = Some(span.start);
                true
            });
            *lane = settled;
        }
    }
}
