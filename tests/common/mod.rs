// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides fake collaborators, HTML text extraction and temporary test environments

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use quick_xml::events::Event;
use quick_xml::Reader;

use docbars::highlight::{self, Highlighter};
use docbars::markdown::{self, MarkdownRenderer};
use docbars::template::{Collaborators, RenderSettings, TemplateEngine};

/// Engine with the real pulldown-cmark and syntect collaborators
pub fn default_engine() -> TemplateEngine {
    TemplateEngine::new().unwrap()
}

/// Engine whose helpers talk to the given fakes
pub fn engine_with(
    markdown: Arc<dyn MarkdownRenderer>,
    highlighter: Arc<dyn Highlighter>,
) -> TemplateEngine {
    TemplateEngine::with_collaborators(
        &Collaborators::new(markdown, highlighter),
        RenderSettings::default(),
    )
    .unwrap()
}

/// Concatenated, unescaped text nodes of an HTML fragment
pub fn text_content(html: &str) -> String {
    let wrapped = format!("<root>{}</root>", html);
    let mut reader = Reader::from_str(&wrapped);
    let mut text = String::new();

    loop {
        match reader.read_event().unwrap() {
            Event::Text(e) => text.push_str(&e.unescape().unwrap()),
            Event::Eof => break,
            _ => {}
        }
    }
    text
}

/// Minimal HTML escaping for fake collaborator output
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Highlighter that returns canned output for known snippets and records
/// every language it was asked for
#[derive(Default)]
pub struct CannedHighlighter {
    canned: Vec<(String, String)>,
    pub languages: Mutex<Vec<Option<String>>>,
}

impl CannedHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: &str, html: &str) -> Self {
        self.canned.push((code.to_string(), html.to_string()));
        self
    }

    pub fn recorded_languages(&self) -> Vec<Option<String>> {
        self.languages.lock().unwrap().clone()
    }
}

impl Highlighter for CannedHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> highlight::Result<String> {
        self.languages
            .lock()
            .unwrap()
            .push(language.map(str::to_string));

        let html = self
            .canned
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, html)| html.clone())
            .unwrap_or_else(|| format!("<span class=\"fake\">{}</span>", escape(code)));
        Ok(html)
    }
}

/// Highlighter that always fails
pub struct FailingHighlighter;

impl Highlighter for FailingHighlighter {
    fn highlight(&self, _code: &str, language: Option<&str>) -> highlight::Result<String> {
        Err(highlight::HighlightError::Failed {
            language: language.unwrap_or("auto").to_string(),
            message: "collaborator unavailable".to_string(),
        })
    }
}

/// Markdown renderer that wraps the source in a paragraph verbatim
pub struct ParagraphMarkdown;

impl MarkdownRenderer for ParagraphMarkdown {
    fn render(&self, source: &str) -> markdown::Result<String> {
        Ok(format!("<p>{}</p>\n", source))
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub async fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        tokio::fs::write(&path, content).await.unwrap();
        path
    }

    pub async fn read_file(&self, name: &str) -> String {
        tokio::fs::read_to_string(self.temp_dir.path().join(name))
            .await
            .unwrap()
    }
}
