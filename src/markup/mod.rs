//! HTML-like markup codec.
//!
//! `decode` and `encode` are a pure function pair. A round trip preserves
//! the text and the coverage of every attribute (including link URLs); it
//! does not reproduce the input markup byte for byte.

mod decode;
mod encode;

pub use decode::{decode, Decoded};
pub use encode::encode;
