//! `(text, spans)` to markup.

use crate::editable::TextBuffer;
use crate::format::{AttributeKind, SpanStore};

/// Inline kinds in nesting order, outermost first
const INLINE_ORDER: [AttributeKind; 5] = [
    AttributeKind::Link,
    AttributeKind::Bold,
    AttributeKind::Italic,
    AttributeKind::Underline,
    AttributeKind::Strikethrough,
];

type Active = (AttributeKind, Option<String>);

/// Writes inline tags as a stack so nesting stays well-formed
#[derive(Default)]
struct InlineWriter {
    out: String,
    stack: Vec<Active>,
}

impl InlineWriter {
    /// Close and reopen tags so exactly `target` is open
    fn transition(&mut self, target: &[Active]) {
        let keep = self
            .stack
            .iter()
            .zip(target)
            .take_while(|(open, want)| open == want)
            .count();
        while self.stack.len() > keep {
            if let Some((kind, _)) = self.stack.pop() {
                self.out.push_str(close_tag(kind));
            }
        }
        for (kind, payload) in &target[keep..] {
            self.open_tag(*kind, payload.as_deref());
            self.stack.push((*kind, payload.clone()));
        }
    }

    fn close_all(&mut self) {
        self.transition(&[]);
    }

    fn open_tag(&mut self, kind: AttributeKind, payload: Option<&str>) {
        match kind {
            AttributeKind::Bold => self.out.push_str("<b>"),
            AttributeKind::Italic => self.out.push_str("<i>"),
            AttributeKind::Underline => self.out.push_str("<u>"),
            AttributeKind::Strikethrough => self.out.push_str("<del>"),
            AttributeKind::Link => {
                self.out.push_str("<a href=\"");
                escape_into(&mut self.out, payload.unwrap_or_default(), true);
                self.out.push_str("\">");
            }
            AttributeKind::Bullet | AttributeKind::Quote => {}
        }
    }

    fn push_text(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        escape_into(&mut self.out, ch.encode_utf8(&mut buf), false);
    }
}

fn close_tag(kind: AttributeKind) -> &'static str {
    match kind {
        AttributeKind::Bold => "</b>",
        AttributeKind::Italic => "</i>",
        AttributeKind::Underline => "</u>",
        AttributeKind::Strikethrough => "</del>",
        AttributeKind::Link => "</a>",
        AttributeKind::Bullet | AttributeKind::Quote => "",
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch),
        }
    }
}

/// Inline attributes covering the character at `pos`, in nesting order
fn active_at(spans: &SpanStore, pos: usize) -> Vec<Active> {
    INLINE_ORDER
        .iter()
        .filter_map(|&kind| {
            spans
                .touching(kind, pos)
                .find(|s| !s.is_empty())
                .map(|s| (kind, s.payload.clone()))
        })
        .collect()
}

/// Encode the buffer and its spans as markup.
///
/// Every newline becomes `<br>`. Bullet lines are wrapped in
/// `<ul><li>…</li></ul>` and quote lines in `<blockquote>…</blockquote>`;
/// inline tags are closed before a block opens and reopened inside it.
pub fn encode(buffer: &TextBuffer, spans: &SpanStore) -> String {
    let chars: Vec<char> = buffer.rope().chars().collect();
    let mut writer = InlineWriter::default();
    let mut line_start = 0;

    loop {
        let line_end = chars[line_start..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |offset| line_start + offset);

        let has_content = line_end > line_start;
        let quote = has_content && spans.covers_any(AttributeKind::Quote, line_start, line_end);
        let bullet =
            has_content && spans.covers_any(AttributeKind::Bullet, line_start, line_end);
        let block = quote || bullet;

        if block {
            writer.close_all();
            if quote {
                writer.out.push_str("<blockquote>");
            }
            if bullet {
                writer.out.push_str("<ul><li>");
            }
        }

        for (pos, &ch) in chars.iter().enumerate().take(line_end).skip(line_start) {
            writer.transition(&active_at(spans, pos));
            writer.push_text(ch);
        }

        if block {
            writer.close_all();
            if bullet {
                writer.out.push_str("</li></ul>");
            }
            if quote {
                writer.out.push_str("</blockquote>");
            }
        }

        if line_end >= chars.len() {
            break;
        }

        writer.transition(&active_at(spans, line_end));
        writer.out.push_str("<br>");
        line_start = line_end + 1;
    }

    writer.close_all();
    writer.out
}
