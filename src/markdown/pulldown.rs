// ABOUTME: pulldown-cmark based markdown renderer
// ABOUTME: Adds heading ids, bordered table classes and highlighted fenced code blocks

use std::sync::Arc;

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use tracing::debug;

use super::{MarkdownOptions, MarkdownRenderer, Result, Slugger};
use crate::highlight::Highlighter;

pub struct PulldownRenderer {
    options: MarkdownOptions,
    highlighter: Arc<dyn Highlighter>,
}

struct CodeBlock {
    language: Option<String>,
    text: String,
}

impl PulldownRenderer {
    pub fn new(highlighter: Arc<dyn Highlighter>) -> Self {
        Self::with_options(highlighter, MarkdownOptions::default())
    }

    pub fn with_options(highlighter: Arc<dyn Highlighter>, options: MarkdownOptions) -> Self {
        Self {
            options,
            highlighter,
        }
    }

    fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_HEADING_ATTRIBUTES
    }

    fn render_code_block(&self, block: &CodeBlock) -> Result<String> {
        let highlighted = self
            .highlighter
            .highlight(&block.text, block.language.as_deref())?;

        Ok(match &block.language {
            Some(language) => format!(
                "<pre><code class=\"{}{}\">{}</code></pre>\n",
                self.options.code_class_prefix, language, highlighted
            ),
            None => format!("<pre><code>{}</code></pre>\n", highlighted),
        })
    }

    fn decorate_tables(&self, html: String) -> String {
        if self.options.table_class.is_empty() {
            return html;
        }
        let open = format!("<table class=\"{}\">", self.options.table_class);
        html.replace("<table>", &open)
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, source: &str) -> Result<String> {
        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<CodeBlock> = None;

        for event in Parser::new_ext(source, Self::parser_options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(CodeBlock {
                        language: fence_language(&kind),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code_block.take() {
                        let rendered = self.render_code_block(&block)?;
                        events.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some(block) => block.text.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        if self.options.heading_ids {
            assign_heading_ids(&mut events);
        }

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        Ok(self.decorate_tables(output))
    }
}

/// First word of a fence's info string, restricted to characters that are
/// safe inside a class attribute.
fn fence_language(kind: &CodeBlockKind) -> Option<String> {
    let info = match kind {
        CodeBlockKind::Fenced(info) => info,
        CodeBlockKind::Indented => return None,
    };

    let language: String = info
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#' | '.'))
        .collect();

    if language.is_empty() {
        None
    } else {
        Some(language)
    }
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut slugger = Slugger::new();

    for index in 0..events.len() {
        let needs_id = matches!(&events[index], Event::Start(Tag::Heading { id: None, .. }));
        if !needs_id {
            continue;
        }

        let slug = slugger.slug(&heading_text(&events[index + 1..]));
        debug!("Generated heading id '{}'", slug);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[index] {
            *id = Some(CowStr::from(slug));
        }
    }
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}
