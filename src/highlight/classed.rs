// ABOUTME: Default highlighter producing class-annotated HTML through syntect
// ABOUTME: Handles language lookup by fence tag and auto-detection for untagged code

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

use super::{HighlightError, Highlighter, Result};

/// Class prefix shared with highlight.js themes.
pub const DEFAULT_CLASS_PREFIX: &str = "hljs-";

pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
}

impl SyntectHighlighter {
    /// Load the bundled syntax definitions
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn syntax_for(&self, code: &str, language: Option<&str>) -> &SyntaxReference {
        match language {
            Some(token) => self.syntaxes.find_syntax_by_token(token).unwrap_or_else(|| {
                warn!("No syntax definition for language '{}', using plain text", token);
                self.syntaxes.find_syntax_plain_text()
            }),
            None => self.detect(code),
        }
    }

    fn detect(&self, code: &str) -> &SyntaxReference {
        let trimmed = code.trim_start();
        if (trimmed.starts_with('{') || trimmed.starts_with('['))
            && serde_json::from_str::<serde_json::Value>(code).is_ok()
        {
            if let Some(json) = self.syntaxes.find_syntax_by_extension("json") {
                debug!("Auto-detected JSON code");
                return json;
            }
        }

        let first_line = code.lines().next().unwrap_or("");
        match self.syntaxes.find_syntax_by_first_line(first_line) {
            Some(syntax) => {
                debug!("Auto-detected language '{}' from first line", syntax.name);
                syntax
            }
            None => self.syntaxes.find_syntax_plain_text(),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Result<String> {
        let syntax = self.syntax_for(code, language);
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntaxes,
            ClassStyle::SpacedPrefixed {
                prefix: DEFAULT_CLASS_PREFIX,
            },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| HighlightError::Failed {
                    language: syntax.name.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(generator.finalize())
    }
}
