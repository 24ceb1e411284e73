//! RichText - the engine facade that owns the buffer, its spans, the
//! selection, the history and the change listener.
//!
//! Every public mutation validates first and mutates second, so a returned
//! error never leaves a partial change behind.

use std::fmt;
use std::time::Instant;

use crate::config::{EngineConfig, StyleConfig};
use crate::error::{check_range, EditError, MarkupError};
use crate::format::{inline, paragraph, AttributeKind, Category, Span, SpanStore};
use crate::markup;

use super::buffer::TextBuffer;
use super::history::{HistoryLog, Snapshot};
use super::listener::FormatListener;
use super::selection::Selection;

/// A link found under a position, as reported by [`RichText::link_at`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan {
    pub url: String,
    pub start: usize,
    pub end: usize,
}

/// Rich-text engine: a character buffer annotated with formatting spans
pub struct RichText {
    buffer: TextBuffer,
    spans: SpanStore,
    selection: Selection,
    /// `None` when history is disabled in the configuration
    history: Option<HistoryLog>,
    config: EngineConfig,
    listener: Option<Box<dyn FormatListener>>,
}

impl fmt::Debug for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichText")
            .field("buffer", &self.buffer)
            .field("spans", &self.spans)
            .field("selection", &self.selection)
            .field("history", &self.history)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl Default for RichText {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RichText {
    /// Create an empty engine
    pub fn new(config: EngineConfig) -> Self {
        Self::with_text("", config)
    }

    /// Create an engine holding unformatted `text`
    pub fn with_text(text: &str, config: EngineConfig) -> Self {
        Self::build(TextBuffer::from_text(text), Vec::new(), config)
    }

    /// Create an engine from markup
    pub fn from_markup(markup: &str, config: EngineConfig) -> Result<Self, MarkupError> {
        let decoded = markup::decode(markup)?;
        Ok(Self::build(
            TextBuffer::from_text(&decoded.text),
            decoded.spans,
            config,
        ))
    }

    fn build(buffer: TextBuffer, spans: Vec<Span>, config: EngineConfig) -> Self {
        let history = config
            .history
            .enabled
            .then(|| HistoryLog::from_config(&config.history));
        let mut engine = Self {
            buffer,
            spans: SpanStore::new(),
            selection: Selection::collapsed(0),
            history,
            config,
            listener: None,
        };
        engine.load_spans(spans);
        engine.capture();
        engine
    }

    /// Route raw spans through the managers so the store invariants hold
    fn load_spans(&mut self, spans: Vec<Span>) {
        let len = self.buffer.len_chars();
        for span in spans {
            let start = span.start.min(len);
            let end = span.end.min(len).max(start);
            match span.kind.category() {
                Category::Inline => {
                    if start < end {
                        inline::apply(&mut self.spans, span.kind, start, end, span.payload);
                    }
                }
                Category::Paragraph => {
                    // A block ending right after a newline does not reach
                    // into the following line
                    let end = if end > start && self.buffer.char_at(end - 1) == Some('\n') {
                        end - 1
                    } else {
                        end
                    };
                    paragraph::apply(&self.buffer, &mut self.spans, span.kind, start, end);
                }
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the text content as a String
    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn spans(&self) -> &SpanStore {
        &self.spans
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Presentation settings for the rendering layer
    pub fn style(&self) -> &StyleConfig {
        &self.config.style
    }

    pub fn history(&self) -> Option<&HistoryLog> {
        self.history.as_ref()
    }

    fn check(&self, start: usize, end: usize) -> Result<(), EditError> {
        check_range(start, end, self.buffer.len_chars())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the selection; `anchor` may be after `head`
    pub fn set_selection(&mut self, anchor: usize, head: usize) -> Result<(), EditError> {
        self.check(anchor.min(head), anchor.max(head))?;
        self.selection = Selection::new(anchor, head);
        self.notify();
        Ok(())
    }

    fn bounds(&self) -> (usize, usize) {
        (self.selection.start(), self.selection.end())
    }

    // =========================================================================
    // Listener
    // =========================================================================

    pub fn set_listener(&mut self, listener: impl FormatListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_active_attributes_may_have_changed();
        }
    }
}

// =============================================================================
// Attribute Operations
// =============================================================================

impl RichText {
    /// Apply a non-link attribute to the selection
    pub fn set(&mut self, kind: AttributeKind) -> Result<(), EditError> {
        let (start, end) = self.bounds();
        self.set_in(kind, start, end)
    }

    /// Apply a non-link attribute to `[start, end)`
    pub fn set_in(&mut self, kind: AttributeKind, start: usize, end: usize) -> Result<(), EditError> {
        self.check(start, end)?;
        if kind.takes_payload() {
            return Err(EditError::InvalidAttributeArgument(
                "links must be created with set_link".to_string(),
            ));
        }
        tracing::debug!(kind = %kind, start, end, "set attribute");
        match kind.category() {
            Category::Inline => inline::apply(&mut self.spans, kind, start, end, None),
            Category::Paragraph => {
                paragraph::apply(&self.buffer, &mut self.spans, kind, start, end)
            }
        }
        self.after_format_change();
        Ok(())
    }

    /// Link the selection to `url`
    pub fn set_link(&mut self, url: &str) -> Result<(), EditError> {
        let (start, end) = self.bounds();
        self.set_link_in(url, start, end)
    }

    /// Link `[start, end)` to `url`, replacing any link already there
    pub fn set_link_in(&mut self, url: &str, start: usize, end: usize) -> Result<(), EditError> {
        self.check(start, end)?;
        if url.is_empty() {
            return Err(EditError::InvalidAttributeArgument(
                "link URL must not be empty".to_string(),
            ));
        }
        tracing::debug!(url, start, end, "set link");
        inline::apply(
            &mut self.spans,
            AttributeKind::Link,
            start,
            end,
            Some(url.to_string()),
        );
        self.after_format_change();
        Ok(())
    }

    /// Remove an attribute from the selection
    pub fn remove(&mut self, kind: AttributeKind) -> Result<(), EditError> {
        let (start, end) = self.bounds();
        self.remove_in(kind, start, end)
    }

    /// Remove an attribute from `[start, end)`
    pub fn remove_in(
        &mut self,
        kind: AttributeKind,
        start: usize,
        end: usize,
    ) -> Result<(), EditError> {
        self.check(start, end)?;
        tracing::debug!(kind = %kind, start, end, "remove attribute");
        self.clear_unchecked(kind, start, end);
        self.after_format_change();
        Ok(())
    }

    fn clear_unchecked(&mut self, kind: AttributeKind, start: usize, end: usize) {
        match kind.category() {
            Category::Inline => inline::clear(&mut self.spans, kind, start, end),
            Category::Paragraph => {
                paragraph::clear(&self.buffer, &mut self.spans, kind, start, end)
            }
        }
    }

    /// Toggle an attribute on the selection
    pub fn toggle(&mut self, kind: AttributeKind) -> Result<(), EditError> {
        let (start, end) = self.bounds();
        self.toggle_in(kind, start, end)
    }

    /// Remove `kind` if `[start, end)` is fully formatted, apply it otherwise.
    ///
    /// Toggling links off works here; toggling them on needs a URL, see
    /// [`RichText::toggle_link_in`].
    pub fn toggle_in(
        &mut self,
        kind: AttributeKind,
        start: usize,
        end: usize,
    ) -> Result<(), EditError> {
        self.check(start, end)?;
        if kind.takes_payload() && !self.query(kind, start, end) {
            return Err(EditError::InvalidAttributeArgument(
                "links must be created with set_link".to_string(),
            ));
        }
        tracing::debug!(kind = %kind, start, end, "toggle attribute");
        match kind.category() {
            Category::Inline => inline::toggle(&mut self.spans, kind, start, end, None),
            Category::Paragraph => {
                paragraph::toggle(&self.buffer, &mut self.spans, kind, start, end)
            }
        }
        self.after_format_change();
        Ok(())
    }

    /// Toggle a link to `url` on the selection
    pub fn toggle_link(&mut self, url: &str) -> Result<(), EditError> {
        let (start, end) = self.bounds();
        self.toggle_link_in(url, start, end)
    }

    pub fn toggle_link_in(&mut self, url: &str, start: usize, end: usize) -> Result<(), EditError> {
        self.check(start, end)?;
        if url.is_empty() {
            return Err(EditError::InvalidAttributeArgument(
                "link URL must not be empty".to_string(),
            ));
        }
        inline::toggle(
            &mut self.spans,
            AttributeKind::Link,
            start,
            end,
            Some(url.to_string()),
        );
        self.after_format_change();
        Ok(())
    }

    /// Whether the selection is fully formatted with `kind`
    pub fn has(&self, kind: AttributeKind) -> bool {
        let (start, end) = self.bounds();
        self.query(kind, start, end)
    }

    /// Whether `[start, end)` is fully formatted with `kind`
    pub fn has_in(&self, kind: AttributeKind, start: usize, end: usize) -> Result<bool, EditError> {
        self.check(start, end)?;
        Ok(self.query(kind, start, end))
    }

    fn query(&self, kind: AttributeKind, start: usize, end: usize) -> bool {
        match kind.category() {
            Category::Inline => inline::query(&self.spans, kind, start, end),
            Category::Paragraph => paragraph::query(&self.buffer, &self.spans, kind, start, end),
        }
    }

    /// Every attribute active at the selection
    pub fn active_attributes(&self) -> Vec<AttributeKind> {
        AttributeKind::ALL
            .into_iter()
            .filter(|&kind| self.has(kind))
            .collect()
    }

    /// Remove every attribute from the selection
    pub fn clear_format(&mut self) {
        let (start, end) = self.bounds();
        tracing::debug!(start, end, "clear format");
        for kind in AttributeKind::ALL {
            self.clear_unchecked(kind, start, end);
        }
        self.after_format_change();
    }

    /// The link under `pos`, including one ending exactly there
    pub fn link_at(&self, pos: usize) -> Option<LinkSpan> {
        self.spans
            .touching(AttributeKind::Link, pos)
            .chain(self.spans.ending_at(AttributeKind::Link, pos))
            .find(|s| !s.is_empty())
            .map(|s| LinkSpan {
                url: s.payload.clone().unwrap_or_default(),
                start: s.start,
                end: s.end,
            })
    }

    fn after_format_change(&mut self) {
        self.normalize_paragraphs();
        self.note_edit();
        self.notify();
    }
}

// =============================================================================
// Text Editing
// =============================================================================

impl RichText {
    /// Insert `text` at `pos`
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<(), EditError> {
        self.check(pos, pos)?;
        let before = self.selection;
        self.insert_unchecked(pos, text);
        self.after_text_change(before);
        Ok(())
    }

    /// Delete `[start, end)`
    pub fn delete(&mut self, start: usize, end: usize) -> Result<(), EditError> {
        self.check(start, end)?;
        let before = self.selection;
        self.delete_unchecked(start, end);
        self.after_text_change(before);
        Ok(())
    }

    /// Replace `[start, end)` with `text`
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<(), EditError> {
        self.check(start, end)?;
        let before = self.selection;
        self.delete_unchecked(start, end);
        self.insert_unchecked(start, text);
        self.after_text_change(before);
        Ok(())
    }

    /// Replace the selection with `text`, leaving the caret after it
    pub fn type_text(&mut self, text: &str) {
        let before = self.selection;
        let (start, end) = self.bounds();
        self.delete_unchecked(start, end);
        self.insert_unchecked(start, text);
        self.selection = Selection::collapsed(start + text.chars().count());
        self.after_text_change(before);
    }

    fn insert_unchecked(&mut self, pos: usize, text: &str) {
        let len = text.chars().count();
        if len == 0 {
            return;
        }
        self.buffer.insert(pos, text);
        self.spans.shift_for_insert(pos, len);
        self.selection.shift_for_insert(pos, len);
    }

    fn delete_unchecked(&mut self, start: usize, end: usize) {
        if start == end {
            return;
        }
        self.buffer.remove(start..end);
        self.spans.collapse_for_delete(start, end);
        self.selection.collapse_for_delete(start, end);
    }

    fn after_text_change(&mut self, selection_before: Selection) {
        self.normalize_paragraphs();
        self.note_edit();
        if self.selection != selection_before {
            self.notify();
        }
    }

    /// Re-align bullet and quote spans to line boundaries
    fn normalize_paragraphs(&mut self) {
        for kind in [AttributeKind::Bullet, AttributeKind::Quote] {
            let repaired = paragraph::normalize(&self.buffer, &mut self.spans, kind);
            if repaired > 0 {
                tracing::trace!(kind = %kind, repaired, "normalized paragraph spans");
            }
        }
    }

    /// Encode the buffer as markup
    pub fn to_markup(&self) -> String {
        markup::encode(&self.buffer, &self.spans)
    }

    /// Replace the whole content with decoded markup
    pub fn set_markup(&mut self, markup: &str) -> Result<(), MarkupError> {
        let decoded = markup::decode(markup)?;
        self.buffer.set_content(&decoded.text);
        self.spans = SpanStore::new();
        self.load_spans(decoded.spans);
        self.selection = Selection::collapsed(0);
        self.normalize_paragraphs();
        self.note_edit();
        self.notify();
        Ok(())
    }
}

// =============================================================================
// History
// =============================================================================

impl RichText {
    fn note_edit(&mut self) {
        if let Some(history) = self.history.as_mut() {
            history.note_edit(Instant::now());
        }
    }

    /// Full copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            buffer: self.buffer.clone(),
            spans: self.spans.clone(),
            selection: self.selection,
        }
    }

    fn capture(&mut self) {
        let snapshot = self.snapshot();
        if let Some(history) = self.history.as_mut() {
            history.capture(snapshot);
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.buffer = snapshot.buffer;
        self.spans = snapshot.spans;
        self.selection = snapshot.selection;
    }

    /// Run the debounced capture if its quiet interval has elapsed.
    ///
    /// Call from the host event loop. Returns whether a snapshot was taken.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self
            .history
            .as_mut()
            .is_some_and(|history| history.take_due(now));
        if due {
            self.capture();
        }
        due
    }

    /// Capture immediately if a capture is pending
    pub fn flush_history(&mut self) -> bool {
        let pending = self.history.as_ref().is_some_and(HistoryLog::is_pending);
        if pending {
            self.capture();
        }
        pending
    }

    pub fn can_undo(&self) -> bool {
        self.history
            .as_ref()
            .is_some_and(|h| h.can_undo() || h.is_pending())
    }

    pub fn can_redo(&self) -> bool {
        self.history
            .as_ref()
            .is_some_and(|h| !h.is_pending() && h.can_redo())
    }

    /// Restore the previous snapshot. Returns false at the earliest one.
    ///
    /// Edits still waiting for their debounced capture are captured first,
    /// so they become the redo target.
    pub fn undo(&mut self) -> bool {
        self.flush_history();
        let restored = self.history.as_mut().and_then(|h| h.undo().cloned());
        self.apply_history_move(restored, "undo")
    }

    /// Restore the next snapshot. Returns false at the latest one.
    ///
    /// Pending edits are captured first, which discards the redo branch.
    pub fn redo(&mut self) -> bool {
        self.flush_history();
        let restored = self.history.as_mut().and_then(|h| h.redo().cloned());
        self.apply_history_move(restored, "redo")
    }

    fn apply_history_move(&mut self, snapshot: Option<Snapshot>, action: &str) -> bool {
        let Some(snapshot) = snapshot else {
            tracing::debug!(action, "history boundary reached");
            return false;
        };
        self.restore(snapshot);
        tracing::debug!(
            action,
            cursor = self.history.as_ref().map_or(0, HistoryLog::cursor),
            "restored snapshot"
        );
        self.notify();
        true
    }
}

impl Drop for RichText {
    fn drop(&mut self) {
        if let Some(history) = self.history.as_mut() {
            history.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn engine(text: &str) -> RichText {
        RichText::with_text(text, EngineConfig::default())
    }

    fn ranges(engine: &RichText, kind: AttributeKind) -> Vec<(usize, usize)> {
        engine
            .spans()
            .spans(kind)
            .iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    #[test]
    fn test_set_uses_selection() {
        let mut rt = engine("hello world");
        rt.set_selection(6, 11).unwrap();
        rt.set(AttributeKind::Bold).unwrap();
        assert_eq!(ranges(&rt, AttributeKind::Bold), vec![(6, 11)]);
        assert!(rt.has(AttributeKind::Bold));
    }

    #[test]
    fn test_reversed_selection_is_normalized() {
        let mut rt = engine("hello");
        rt.set_selection(4, 1).unwrap();
        rt.set(AttributeKind::Italic).unwrap();
        assert_eq!(ranges(&rt, AttributeKind::Italic), vec![(1, 4)]);
    }

    #[test]
    fn test_invalid_range_does_not_mutate() {
        let mut rt = engine("hello");
        let before = rt.spans().clone();
        assert_eq!(
            rt.set_in(AttributeKind::Bold, 2, 9),
            Err(EditError::InvalidRange {
                start: 2,
                end: 9,
                len: 5
            })
        );
        assert!(rt.set_in(AttributeKind::Bold, 3, 1).is_err());
        assert!(rt.set_selection(0, 6).is_err());
        assert_eq!(rt.spans(), &before);
        assert!(!rt.history().unwrap().is_pending());
    }

    #[test]
    fn test_link_requires_payload() {
        let mut rt = engine("hello");
        assert!(matches!(
            rt.set_in(AttributeKind::Link, 0, 5),
            Err(EditError::InvalidAttributeArgument(_))
        ));
        assert!(matches!(
            rt.set_link_in("", 0, 5),
            Err(EditError::InvalidAttributeArgument(_))
        ));
        assert!(matches!(
            rt.toggle_in(AttributeKind::Link, 0, 5),
            Err(EditError::InvalidAttributeArgument(_))
        ));
        assert!(rt.spans().is_empty());
    }

    #[test]
    fn test_toggle_link_off_without_url() {
        let mut rt = engine("hello");
        rt.set_link_in("https://example.com", 0, 5).unwrap();
        rt.toggle_in(AttributeKind::Link, 0, 5).unwrap();
        assert!(rt.spans().spans(AttributeKind::Link).is_empty());
    }

    #[test]
    fn test_link_at() {
        let mut rt = engine("go here now");
        rt.set_link_in("https://example.com", 3, 7).unwrap();
        let link = rt.link_at(5).unwrap();
        assert_eq!(link.url, "https://example.com");
        assert_eq!((link.start, link.end), (3, 7));
        assert!(rt.link_at(7).is_some());
        assert!(rt.link_at(1).is_none());
    }

    #[test]
    fn test_clear_format() {
        let mut rt = engine("one\ntwo");
        rt.set_in(AttributeKind::Bold, 0, 7).unwrap();
        rt.set_in(AttributeKind::Bullet, 0, 7).unwrap();
        rt.set_selection(0, 3).unwrap();
        rt.clear_format();
        assert_eq!(ranges(&rt, AttributeKind::Bold), vec![(3, 7)]);
        assert_eq!(ranges(&rt, AttributeKind::Bullet), vec![(4, 7)]);
    }

    #[test]
    fn test_typing_after_sticky_caret_extends_bold() {
        let mut rt = engine("ab");
        rt.set_selection(2, 2).unwrap();
        rt.set(AttributeKind::Bold).unwrap();
        assert!(rt.has(AttributeKind::Bold));
        rt.type_text("cd");
        assert_eq!(rt.text(), "abcd");
        assert_eq!(ranges(&rt, AttributeKind::Bold), vec![(2, 4)]);
        assert_eq!(rt.selection(), Selection::collapsed(4));
    }

    #[test]
    fn test_newline_in_bullet_splits_lines() {
        let mut rt = engine("abcdef");
        rt.set_in(AttributeKind::Bullet, 0, 0).unwrap();
        rt.insert(3, "\n").unwrap();
        assert_eq!(ranges(&rt, AttributeKind::Bullet), vec![(0, 3), (4, 7)]);
    }

    #[test]
    fn test_listener_fires_on_attribute_and_history() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut rt = engine("hello");
        rt.set_listener(move || seen.set(seen.get() + 1));

        rt.set_in(AttributeKind::Bold, 0, 2).unwrap();
        rt.toggle_in(AttributeKind::Italic, 0, 2).unwrap();
        rt.remove_in(AttributeKind::Bold, 0, 2).unwrap();
        assert_eq!(count.get(), 3);

        assert!(rt.undo());
        assert_eq!(count.get(), 4);

        // Rejected input does not notify
        assert!(rt.set_in(AttributeKind::Bold, 0, 99).is_err());
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_debounced_capture_via_tick() {
        let mut rt = engine("hello");
        rt.insert(5, "!").unwrap();
        assert!(!rt.tick(Instant::now()));
        assert!(rt.tick(Instant::now() + Duration::from_secs(2)));
        assert_eq!(rt.history().unwrap().len(), 2);
    }

    #[test]
    fn test_history_disabled() {
        let mut config = EngineConfig::default();
        config.history.enabled = false;
        let mut rt = RichText::with_text("abc", config);
        rt.insert(0, "x").unwrap();
        assert!(rt.history().is_none());
        assert!(!rt.can_undo());
        assert!(!rt.undo());
        assert_eq!(rt.text(), "xabc");
    }
}
