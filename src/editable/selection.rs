//! Selection bounds supplied by the host.

use serde::{Deserialize, Serialize};

/// A text selection with anchor (start point) and head (cursor position),
/// both character offsets. The anchor stays fixed while the head moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the cursor is (moving point)
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (cursor with no selection)
    pub fn collapsed(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start offset (minimum of anchor and head)
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Get the end offset (maximum of anchor and head)
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    /// Move both ends through a text insertion of `len` chars at `pos`
    pub fn shift_for_insert(&mut self, pos: usize, len: usize) {
        let shift = |x: usize| if x >= pos { x + len } else { x };
        self.anchor = shift(self.anchor);
        self.head = shift(self.head);
    }

    /// Move both ends through the deletion of `[start, end)`
    pub fn collapse_for_delete(&mut self, start: usize, end: usize) {
        let map = |x: usize| {
            if x <= start {
                x
            } else if x >= end {
                x - (end - start)
            } else {
                start
            }
        };
        self.anchor = map(self.anchor);
        self.head = map(self.head);
    }
}
