//! Rope-backed character buffer.
//!
//! All offsets are character indices. Lines are delimited by `\n` only; the
//! newline belongs to neither of the lines it separates.

use ropey::Rope;
use std::ops::Range;

/// The engine's character buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a TextBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }

    /// Access the underlying Rope for rope-specific operations
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Get character at offset, None if out of bounds
    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.rope.len_chars() {
            return None;
        }
        Some(self.rope.char(offset))
    }

    /// Get slice of text as String (by character indices)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Get full content as String
    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    /// Offset of the first character of the line containing `pos`
    pub fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.len_chars());
        let mut start = pos;
        let mut chars = self.rope.chars_at(pos);
        while let Some(ch) = chars.prev() {
            if ch == '\n' {
                break;
            }
            start -= 1;
        }
        start
    }

    /// Offset just past the last character of the line containing `pos`
    /// (the index of its `\n`, or the buffer length)
    pub fn line_end(&self, pos: usize) -> usize {
        let pos = pos.min(self.len_chars());
        let mut end = pos;
        for ch in self.rope.chars_at(pos) {
            if ch == '\n' {
                break;
            }
            end += 1;
        }
        end
    }

    /// Every line touched by `[start, end]`, as `[line_start, line_end)`
    /// ranges. Always yields at least one (possibly empty) line.
    pub fn lines_in(&self, start: usize, end: usize) -> Vec<Range<usize>> {
        let last = self.line_end(end);
        let mut lines = Vec::new();
        let mut line_start = self.line_start(start);
        loop {
            let line_end = self.line_end(line_start);
            lines.push(line_start..line_end);
            if line_end >= last {
                break;
            }
            line_start = line_end + 1;
        }
        lines
    }

    /// Insert text at character offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        let clamped = offset.min(self.len_chars());
        self.rope.insert(clamped, text);
    }

    /// Remove text in character range
    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Set content, replacing everything
    pub fn set_content(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }
}
