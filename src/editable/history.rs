//! Snapshot history (undo/redo) with a debounced capture.
//!
//! Edits only schedule a capture; the capture itself happens once the
//! quiet interval has elapsed without further edits. The caller's event
//! loop drives time through [`HistoryLog::take_due`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::HistoryConfig;
use crate::format::SpanStore;

use super::buffer::TextBuffer;
use super::selection::Selection;

/// Full copy of the buffer, its spans and the selection
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub buffer: TextBuffer,
    pub spans: SpanStore,
    pub selection: Selection,
}

/// Bounded, linear history of snapshots with a cursor at the current one
#[derive(Debug, Clone)]
pub struct HistoryLog {
    snapshots: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
    debounce: Duration,
    /// Deadline of the single pending capture, if any
    pending: Option<Instant>,
}

impl HistoryLog {
    /// Create a history holding at most `capacity` snapshots (minimum 1)
    pub fn new(capacity: usize, debounce: Duration) -> Self {
        Self {
            snapshots: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
            debounce,
            pending: None,
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity, config.debounce())
    }

    /// Schedule a capture `debounce` after `now`, replacing any pending one
    pub fn note_edit(&mut self, now: Instant) {
        self.pending = Some(now + self.debounce);
    }

    /// Whether a capture is scheduled
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending capture without running it
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consume the pending capture if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(deadline) if deadline <= now => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Store a snapshot after the cursor, discarding the redo branch and
    /// evicting the oldest snapshot on overflow
    pub fn capture(&mut self, snapshot: Snapshot) {
        self.pending = None;
        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            tracing::trace!(capacity = self.capacity, "evicted oldest snapshot");
        }
        self.cursor = self.snapshots.len() - 1;
        tracing::debug!(
            cursor = self.cursor,
            len = self.snapshots.len(),
            "captured history snapshot"
        );
    }

    /// Step back one snapshot. `None` at the earliest one.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward one snapshot. `None` at the latest one.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot the cursor points at
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
        self.pending = None;
    }
}
