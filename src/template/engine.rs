// ABOUTME: Main template engine implementation using Handlebars
// ABOUTME: Owns a Handlebars registry with the documentation helpers installed

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use super::error::{Result, TemplateError};
use super::helpers::{self, Collaborators};

/// How the underlying Handlebars registry behaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// HTML-escape `{{value}}` output
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,

    /// Fail on variables missing from the data
    #[serde(default)]
    pub strict_mode: bool,
}

fn default_escape_html() -> bool {
    true
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            escape_html: default_escape_html(),
            strict_mode: false,
        }
    }
}

#[derive(Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the default collaborators
    pub fn new() -> Result<Self> {
        Self::with_collaborators(&Collaborators::with_defaults(), RenderSettings::default())
    }

    /// Create a template engine whose helpers delegate to `collaborators`
    pub fn with_collaborators(
        collaborators: &Collaborators,
        settings: RenderSettings,
    ) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(settings.strict_mode);
        handlebars.set_dev_mode(false);

        if !settings.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers::register_helpers(&mut handlebars, collaborators)?;
        debug!(
            "Template engine ready (escape_html: {}, strict_mode: {})",
            settings.escape_html, settings.strict_mode
        );

        Ok(Self { handlebars })
    }

    /// Render a template string with the given context
    pub fn render_template(&self, template: &str, context: &JsonValue) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(TemplateError::HandlebarsError)
    }

    /// Validate template syntax without rendering
    pub fn validate_template(&self, template: &str) -> Result<()> {
        match handlebars::Template::compile(template) {
            Ok(_) => Ok(()),
            Err(e) => Err(TemplateError::SyntaxError(e.to_string())),
        }
    }
}
