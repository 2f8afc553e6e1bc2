// ABOUTME: Syntax highlighting collaborator used by the md and json helpers
// ABOUTME: Defines the Highlighter capability and its syntect-backed default

pub mod classed;

use thiserror::Error;

pub use classed::SyntectHighlighter;

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Highlighting failed for language '{language}': {message}")]
    Failed { language: String, message: String },
}

pub type Result<T> = std::result::Result<T, HighlightError>;

/// Turns source code into HTML with token spans.
///
/// `language` is the fence tag or a mode name such as `json`. `None` asks the
/// implementation to detect the language itself. The returned HTML must have
/// every text character escaped, so that its text content equals `code`.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<String>;
}
