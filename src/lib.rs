// ABOUTME: Main library module for docbars
// ABOUTME: Exports the helper registry, its collaborators and the CLI

pub mod cli;
pub mod highlight;
pub mod markdown;
pub mod template;

// Re-export commonly used types
pub use highlight::{Highlighter, SyntectHighlighter};
pub use markdown::{MarkdownOptions, MarkdownRenderer, PulldownRenderer};
pub use template::{register_helpers, Collaborators, TemplateEngine, HELPER_NAMES};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
