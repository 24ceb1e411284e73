//! Command-line argument parsing for the richedit driver
//!
//! Supports:
//! - Loading a markup file (or starting empty)
//! - Running a sequence of script commands
//! - Printing markup or a JSON report

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use crate::editable::{RichText, Selection};
use crate::format::Span;

/// Apply formatting commands to a rich-text document
#[derive(Parser, Debug)]
#[command(
    name = "richedit",
    version,
    about = "Apply formatting commands to a rich-text document"
)]
pub struct CliArgs {
    /// Markup file to load
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Command to run, e.g. "set bold 0 5" (repeatable, runs in order)
    #[arg(short = 'e', long = "exec", value_name = "CMD")]
    pub exec: Vec<String>,

    /// Print a JSON report instead of markup
    #[arg(long)]
    pub json: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Machine-readable view of a document, printed with `--json`
#[derive(Debug, Serialize)]
pub struct DocumentReport<'a> {
    pub text: String,
    pub selection: Selection,
    pub spans: Vec<&'a Span>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl<'a> DocumentReport<'a> {
    pub fn new(doc: &'a RichText) -> Self {
        Self {
            text: doc.text(),
            selection: doc.selection(),
            spans: doc.spans().iter().collect(),
            can_undo: doc.can_undo(),
            can_redo: doc.can_redo(),
        }
    }
}
