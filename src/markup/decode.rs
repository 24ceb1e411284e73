//! Markup to `(text, spans)`.

use crate::error::MarkupError;
use crate::format::{AttributeKind, Span};

/// Plain text plus the spans found in the markup.
///
/// Spans are raw: they may overlap, abut, or cover several lines. Feed them
/// through the managers (as [`crate::editable::RichText::from_markup`] does)
/// to obtain a store that satisfies the span invariants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub text: String,
    pub spans: Vec<Span>,
}

struct OpenTag {
    kind: AttributeKind,
    start: usize,
    payload: Option<String>,
}

#[derive(Default)]
struct Decoder {
    text: String,
    /// Length of `text` in chars
    len: usize,
    open: Vec<OpenTag>,
    spans: Vec<Span>,
    /// A block element just closed; the next content starts a new line
    pending_break: bool,
}

impl Decoder {
    fn push_char(&mut self, ch: char) {
        if self.pending_break {
            self.pending_break = false;
            self.push_raw('\n');
        }
        self.push_raw(ch);
    }

    fn push_raw(&mut self, ch: char) {
        self.text.push(ch);
        self.len += 1;
    }

    fn line_break(&mut self) {
        self.pending_break = false;
        self.push_raw('\n');
    }

    fn ensure_line_start(&mut self) {
        if self.pending_break {
            self.line_break();
        } else if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.push_raw('\n');
        }
    }

    fn open(&mut self, kind: AttributeKind, payload: Option<String>) {
        if kind.is_paragraph() {
            self.ensure_line_start();
        }
        self.open.push(OpenTag {
            kind,
            start: self.len,
            payload,
        });
    }

    fn close(&mut self, kind: AttributeKind) {
        let Some(idx) = self.open.iter().rposition(|t| t.kind == kind) else {
            tracing::trace!(kind = %kind, "ignoring unmatched closing tag");
            return;
        };
        let tag = self.open.remove(idx);
        self.finish(tag);
        if kind.is_paragraph() {
            self.pending_break = true;
        }
    }

    fn finish(&mut self, tag: OpenTag) {
        if self.len > tag.start {
            self.spans
                .push(Span::new(tag.kind, tag.start, self.len).with_payload(tag.payload));
        }
    }
}

/// Map a tag name to the attribute it carries
fn tag_kind(name: &str) -> Option<AttributeKind> {
    match name {
        "b" | "strong" => Some(AttributeKind::Bold),
        "i" | "em" => Some(AttributeKind::Italic),
        "u" => Some(AttributeKind::Underline),
        "s" | "strike" | "del" => Some(AttributeKind::Strikethrough),
        "a" => Some(AttributeKind::Link),
        "li" => Some(AttributeKind::Bullet),
        "blockquote" => Some(AttributeKind::Quote),
        _ => None,
    }
}

/// Extract the value of `href` from a tag's attribute text
fn parse_href(attrs: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let idx = lower.find("href")?;
    let rest = attrs[idx + 4..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let value = match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let body = &rest[1..];
            let end = body.find(quote)?;
            &body[..end]
        }
        _ => rest.split(|c: char| c.is_whitespace() || c == '>').next()?,
    };
    Some(unescape(value))
}

/// Resolve one entity body (the text between `&` and `;`)
fn entity(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" | "#39" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(|c: char| c == 'x' || c == 'X') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Replace entities in attribute values
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        match tail.find(';').and_then(|semi| entity(&tail[..semi]).map(|c| (c, semi))) {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode markup into text and spans.
///
/// Unknown tags are skipped. Raw line breaks in the markup are ignored;
/// only `<br>` and block boundaries produce newlines.
pub fn decode(markup: &str) -> Result<Decoded, MarkupError> {
    let mut decoder = Decoder::default();
    let mut idx = 0;

    while idx < markup.len() {
        let rest = &markup[idx..];
        let Some(ch) = rest.chars().next() else {
            break;
        };

        match ch {
            '<' => {
                let close = rest
                    .find('>')
                    .ok_or(MarkupError::UnterminatedTag { offset: idx })?;
                let inner = rest[1..close].trim();
                handle_tag(&mut decoder, inner, idx)?;
                idx += close + 1;
            }
            '&' => {
                let resolved = rest[1..]
                    .find(';')
                    .filter(|&semi| semi <= 10)
                    .and_then(|semi| entity(&rest[1..semi + 1]).map(|c| (c, semi)));
                match resolved {
                    Some((ch, semi)) => {
                        decoder.push_char(ch);
                        idx += semi + 2;
                    }
                    None => {
                        decoder.push_char('&');
                        idx += 1;
                    }
                }
            }
            '\n' | '\r' => idx += 1,
            _ => {
                decoder.push_char(ch);
                idx += ch.len_utf8();
            }
        }
    }

    // Close anything left open at the end of input
    while let Some(tag) = decoder.open.pop() {
        decoder.finish(tag);
    }

    Ok(Decoded {
        text: decoder.text,
        spans: decoder.spans,
    })
}

fn handle_tag(decoder: &mut Decoder, inner: &str, offset: usize) -> Result<(), MarkupError> {
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body.trim_start()),
        None => (false, inner),
    };
    let body = body.strip_suffix('/').unwrap_or(body);
    let name_end = body
        .find(|c: char| c.is_whitespace())
        .unwrap_or(body.len());
    let name = body[..name_end].to_ascii_lowercase();
    let attrs = &body[name_end..];

    if name == "br" {
        if !closing {
            decoder.line_break();
        }
        return Ok(());
    }

    let Some(kind) = tag_kind(&name) else {
        return Ok(());
    };

    if closing {
        decoder.close(kind);
        return Ok(());
    }

    let payload = if kind == AttributeKind::Link {
        match parse_href(attrs) {
            Some(url) if !url.is_empty() => Some(url),
            _ => return Err(MarkupError::MissingHref { offset }),
        }
    } else {
        None
    };
    decoder.open(kind, payload);
    Ok(())
}
