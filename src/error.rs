//! Error types for the rich-text engine
//!
//! Every mutation entry point validates its arguments before touching the
//! buffer or the span store, so an `Err` always means nothing changed.

/// Errors returned by attribute commands and text edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Range is reversed or reaches past the end of the buffer
    InvalidRange { start: usize, end: usize, len: usize },
    /// Attribute was applied with a missing or unexpected payload
    InvalidAttributeArgument(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::InvalidRange { start, end, len } => write!(
                f,
                "invalid range {}..{} for buffer of length {}",
                start, end, len
            ),
            EditError::InvalidAttributeArgument(msg) => {
                write!(f, "invalid attribute argument: {}", msg)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Errors produced while decoding markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A `<` was never closed by `>`
    UnterminatedTag { offset: usize },
    /// An `<a>` tag without an `href` attribute
    MissingHref { offset: usize },
}

impl std::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupError::UnterminatedTag { offset } => {
                write!(f, "unterminated tag at byte {}", offset)
            }
            MarkupError::MissingHref { offset } => {
                write!(f, "link without href at byte {}", offset)
            }
        }
    }
}

impl std::error::Error for MarkupError {}

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Check that `start..end` is a valid range in a buffer of `len` chars
pub fn check_range(start: usize, end: usize, len: usize) -> Result<(), EditError> {
    if start > end || end > len {
        return Err(EditError::InvalidRange { start, end, len });
    }
    Ok(())
}
