//! The editable document: text buffer, selection, history and the
//! [`RichText`] engine that ties them to the formatting layer.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: character buffer backed by `ropey::Rope`
//! - [`Selection`]: anchor/head pair in character offsets
//! - [`HistoryLog`]: bounded snapshot log with a debounced capture
//! - [`FormatListener`]: notified when active attributes may have changed
//! - [`RichText`]: validates input, dispatches to the span managers and
//!   keeps spans aligned across text edits
//!
//! # Example
//!
//! ```
//! use richedit::config::EngineConfig;
//! use richedit::editable::RichText;
//! use richedit::format::AttributeKind;
//!
//! let mut doc = RichText::with_text("Hello world", EngineConfig::default());
//! doc.set_in(AttributeKind::Bold, 0, 5).unwrap();
//!
//! assert_eq!(doc.to_markup(), "<b>Hello</b> world");
//! ```

mod buffer;
mod history;
mod listener;
mod selection;
mod state;

// Re-export main types
pub use buffer::TextBuffer;
pub use history::{HistoryLog, Snapshot};
pub use listener::FormatListener;
pub use selection::Selection;
pub use state::{LinkSpan, RichText};
