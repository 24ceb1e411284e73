//! Attribute kinds and their classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an attribute formats characters or whole lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Inline,
    Paragraph,
}

/// Every formatting attribute the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    /// Hyperlink; the only kind that carries a payload (the URL)
    Link,
    Bullet,
    Quote,
}

impl AttributeKind {
    /// All kinds, in store lane order
    pub const ALL: [AttributeKind; 7] = [
        AttributeKind::Bold,
        AttributeKind::Italic,
        AttributeKind::Underline,
        AttributeKind::Strikethrough,
        AttributeKind::Link,
        AttributeKind::Bullet,
        AttributeKind::Quote,
    ];

    /// Number of kinds (size of the store's lane table)
    pub const COUNT: usize = Self::ALL.len();

    pub fn category(self) -> Category {
        match self {
            AttributeKind::Bold
            | AttributeKind::Italic
            | AttributeKind::Underline
            | AttributeKind::Strikethrough
            | AttributeKind::Link => Category::Inline,
            AttributeKind::Bullet | AttributeKind::Quote => Category::Paragraph,
        }
    }

    pub fn is_paragraph(self) -> bool {
        self.category() == Category::Paragraph
    }

    /// Splittable kinds are fragmented by a partial clear and absorb
    /// abutting neighbours on apply. Links are replaced wholesale.
    pub fn is_splittable(self) -> bool {
        self != AttributeKind::Link
    }

    /// Whether spans of this kind must carry a payload
    pub fn takes_payload(self) -> bool {
        self == AttributeKind::Link
    }

    /// Index of this kind's lane in the span store
    pub(crate) fn lane(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Bold => "bold",
            AttributeKind::Italic => "italic",
            AttributeKind::Underline => "underline",
            AttributeKind::Strikethrough => "strikethrough",
            AttributeKind::Link => "link",
            AttributeKind::Bullet => "bullet",
            AttributeKind::Quote => "quote",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bold" | "b" => Ok(AttributeKind::Bold),
            "italic" | "i" => Ok(AttributeKind::Italic),
            "underline" | "u" => Ok(AttributeKind::Underline),
            "strike" | "strikethrough" | "s" => Ok(AttributeKind::Strikethrough),
            "link" | "url" => Ok(AttributeKind::Link),
            "bullet" => Ok(AttributeKind::Bullet),
            "quote" => Ok(AttributeKind::Quote),
            other => Err(format!("unknown attribute kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        for kind in AttributeKind::ALL {
            let expected = matches!(kind, AttributeKind::Bullet | AttributeKind::Quote);
            assert_eq!(kind.is_paragraph(), expected, "{}", kind);
        }
        assert!(!AttributeKind::Link.is_splittable());
        assert!(AttributeKind::Bold.is_splittable());
    }

    #[test]
    fn test_lanes_are_dense() {
        for (i, kind) in AttributeKind::ALL.iter().enumerate() {
            assert_eq!(kind.lane(), i);
        }
    }

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("Bold".parse::<AttributeKind>(), Ok(AttributeKind::Bold));
        assert_eq!("strike".parse(), Ok(AttributeKind::Strikethrough));
        assert!("heading".parse::<AttributeKind>().is_err());
        for kind in AttributeKind::ALL {
            assert_eq!(kind.name().parse(), Ok(kind));
        }
    }
}
