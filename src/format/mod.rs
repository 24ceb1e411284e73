//! Formatting attributes and the interval algebra behind them.
//!
//! - [`SpanStore`]: ordered per-kind span lanes with coalescing insert
//! - [`inline`]: set/clear/query/toggle for character ranges, including
//!   split/merge and caret stickiness
//! - [`paragraph`]: the same operations for whole lines, plus the
//!   post-edit normalizer
//!
//! The managers are free functions over a store (and, for paragraphs, the
//! buffer). [`crate::editable::RichText`] is the facade that validates input
//! and picks the manager by [`AttributeKind::category`].

pub mod inline;
pub mod paragraph;

mod kind;
mod span;
mod store;

pub use kind::{AttributeKind, Category};
pub use span::Span;
pub use store::SpanStore;
