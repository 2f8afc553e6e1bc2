// ABOUTME: Markdown collaborator used by the md helper
// ABOUTME: Defines the MarkdownRenderer capability, its options and the pulldown-cmark default

pub mod pulldown;
pub mod slug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highlight::HighlightError;

pub use pulldown::PulldownRenderer;
pub use slug::Slugger;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("Code block highlighting failed: {0}")]
    Highlight(#[from] HighlightError),
}

pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Renders a Markdown document to an HTML string.
///
/// Implementations must accept any input: malformed Markdown renders on a
/// best-effort basis instead of failing.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, source: &str) -> Result<String>;
}

/// How rendered HTML is decorated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Class attribute placed on every `<table>`
    #[serde(default = "default_table_class")]
    pub table_class: String,

    /// Prefix for the language class on fenced `<code>` elements
    #[serde(default = "default_code_class_prefix")]
    pub code_class_prefix: String,

    /// Generate `id` attributes for headings from their text
    #[serde(default = "default_heading_ids")]
    pub heading_ids: bool,
}

fn default_table_class() -> String {
    "table table-bordered".to_string()
}

fn default_code_class_prefix() -> String {
    "lang-".to_string()
}

fn default_heading_ids() -> bool {
    true
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            table_class: default_table_class(),
            code_class_prefix: default_code_class_prefix(),
            heading_ids: default_heading_ids(),
        }
    }
}

/// Remove a `<p>` that wraps the whole fragment.
///
/// Fragments with more than one paragraph, or anything outside the wrapper,
/// come back unchanged (apart from surrounding whitespace).
pub fn strip_wrapping_paragraph(html: &str) -> &str {
    let trimmed = html.trim();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") && !inner.contains("</p>") => inner,
        _ => trimmed,
    }
}
