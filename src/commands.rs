//! Script commands for the command-line driver
//!
//! Each `-e` argument is one command, parsed with [`FromStr`] and applied to
//! a [`RichText`]. Ranges are optional for attribute commands and default
//! to the current selection.

use std::str::FromStr;

use crate::editable::RichText;
use crate::error::EditError;
use crate::format::AttributeKind;

/// A single scripted operation on a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select { anchor: usize, head: usize },
    Set { kind: AttributeKind, range: Option<(usize, usize)> },
    Remove { kind: AttributeKind, range: Option<(usize, usize)> },
    Toggle { kind: AttributeKind, range: Option<(usize, usize)> },
    Link { url: String, range: Option<(usize, usize)> },
    Insert { pos: usize, text: String },
    Delete { start: usize, end: usize },
    Type(String),
    ClearFormat,
    Undo,
    Redo,
    Flush,
}

impl Command {
    /// Run the command against `doc`
    pub fn apply(&self, doc: &mut RichText) -> Result<(), EditError> {
        tracing::debug!(command = ?self, "running command");
        match self {
            Command::Select { anchor, head } => doc.set_selection(*anchor, *head),
            Command::Set { kind, range } => match range {
                Some((start, end)) => doc.set_in(*kind, *start, *end),
                None => doc.set(*kind),
            },
            Command::Remove { kind, range } => match range {
                Some((start, end)) => doc.remove_in(*kind, *start, *end),
                None => doc.remove(*kind),
            },
            Command::Toggle { kind, range } => match range {
                Some((start, end)) => doc.toggle_in(*kind, *start, *end),
                None => doc.toggle(*kind),
            },
            Command::Link { url, range } => match range {
                Some((start, end)) => doc.set_link_in(url, *start, *end),
                None => doc.set_link(url),
            },
            Command::Insert { pos, text } => doc.insert(*pos, text),
            Command::Delete { start, end } => doc.delete(*start, *end),
            Command::Type(text) => {
                doc.type_text(text);
                Ok(())
            }
            Command::ClearFormat => {
                doc.clear_format();
                Ok(())
            }
            Command::Undo => {
                if !doc.undo() {
                    tracing::info!("nothing to undo");
                }
                Ok(())
            }
            Command::Redo => {
                if !doc.redo() {
                    tracing::info!("nothing to redo");
                }
                Ok(())
            }
            Command::Flush => {
                doc.flush_history();
                Ok(())
            }
        }
    }
}

fn parse_offset(word: &str) -> Result<usize, String> {
    word.parse()
        .map_err(|_| format!("expected a character offset, got '{}'", word))
}

/// Parse an optional trailing `START END` pair
fn parse_range(words: &[&str]) -> Result<Option<(usize, usize)>, String> {
    match words {
        [] => Ok(None),
        [start, end] => Ok(Some((parse_offset(start)?, parse_offset(end)?))),
        _ => Err("expected START END or nothing".to_string()),
    }
}

/// Decode `\n`, `\t` and `\\` in command text arguments
fn unescape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split off the first whitespace-delimited word, keeping the rest verbatim
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((idx, ws)) => (&s[..idx], &s[idx + ws.len_utf8()..]),
        None => (s, ""),
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(s);
        let name = name.to_ascii_lowercase();
        let words: Vec<&str> = rest.split_whitespace().collect();

        match name.as_str() {
            "select" => match words.as_slice() {
                [anchor, head] => Ok(Command::Select {
                    anchor: parse_offset(anchor)?,
                    head: parse_offset(head)?,
                }),
                [pos] => {
                    let pos = parse_offset(pos)?;
                    Ok(Command::Select { anchor: pos, head: pos })
                }
                _ => Err("usage: select START [END]".to_string()),
            },
            "set" | "remove" | "toggle" => {
                let (kind, range) = words
                    .split_first()
                    .ok_or_else(|| format!("usage: {} KIND [START END]", name))?;
                let kind: AttributeKind = kind.parse()?;
                let range = parse_range(range)?;
                Ok(match name.as_str() {
                    "set" => Command::Set { kind, range },
                    "remove" => Command::Remove { kind, range },
                    _ => Command::Toggle { kind, range },
                })
            }
            "link" => {
                let (url, range) = words
                    .split_first()
                    .ok_or_else(|| "usage: link URL [START END]".to_string())?;
                Ok(Command::Link {
                    url: url.to_string(),
                    range: parse_range(range)?,
                })
            }
            "insert" => {
                let (pos, text) = split_word(rest);
                if pos.is_empty() {
                    return Err("usage: insert POS TEXT".to_string());
                }
                Ok(Command::Insert {
                    pos: parse_offset(pos)?,
                    text: unescape_text(text),
                })
            }
            "delete" => match parse_range(&words)? {
                Some((start, end)) => Ok(Command::Delete { start, end }),
                None => Err("usage: delete START END".to_string()),
            },
            "type" => Ok(Command::Type(unescape_text(rest))),
            "clear-format" | "clear" => Ok(Command::ClearFormat),
            "undo" => Ok(Command::Undo),
            "redo" => Ok(Command::Redo),
            "flush" => Ok(Command::Flush),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}
