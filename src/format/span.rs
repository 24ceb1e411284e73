//! A single formatting range over the buffer

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::kind::AttributeKind;

/// Half-open `[start, end)` range carrying one attribute.
///
/// Zero-width spans are caret markers: they hold formatting that applies to
/// the next character typed at `start` when `sticky_at_end` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub kind: AttributeKind,
    pub start: usize,
    pub end: usize,
    /// URL for links, `None` for every other kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Text inserted exactly at `end` extends the span
    #[serde(default)]
    pub sticky_at_end: bool,
}

impl Span {
    pub fn new(kind: AttributeKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            payload: None,
            sticky_at_end: false,
        }
    }

    pub fn with_payload(mut self, payload: Option<String>) -> Self {
        self.payload = payload;
        self
    }

    pub fn sticky(mut self, sticky_at_end: bool) -> Self {
        self.sticky_at_end = sticky_at_end;
        self
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `pos` lies strictly inside the span
    pub fn strictly_contains(&self, pos: usize) -> bool {
        self.start < pos && pos < self.end
    }

    /// Overlaps `[start, end)` by at least one character, or is a marker
    /// sitting inside it
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        if self.is_empty() {
            return start <= self.start && self.start < end;
        }
        self.start < end && self.end > start
    }

    /// Same kind and payload, so the two may be merged when they touch
    pub fn same_attribute(&self, other: &Span) -> bool {
        self.kind == other.kind && self.payload == other.payload
    }
}
