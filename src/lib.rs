//! richedit - rich-text attribute engine
//!
//! This crate annotates a plain character buffer with formatting spans
//! (bold, italic, underline, strikethrough, links, bullets and quotes),
//! keeps them consistent across edits, and records undo/redo history.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod error;
pub mod format;
pub mod markup;
pub mod tracing;

// Re-export commonly used types
pub use commands::Command;
pub use config::EngineConfig;
pub use editable::RichText;
pub use error::{ConfigError, EditError, MarkupError};
pub use format::{AttributeKind, Span, SpanStore};
