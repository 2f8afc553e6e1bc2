// ABOUTME: Command implementations for the docbars CLI
// ABOUTME: Handles execution of the render, check and helpers commands

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::config::Config;
use crate::template::{load_data, Collaborators, RenderSettings, TemplateEngine, HELPER_NAMES};

/// Build an engine from configuration, optionally overriding escaping
pub fn build_engine(config: &Config, no_escape: bool) -> Result<TemplateEngine> {
    let settings = RenderSettings {
        escape_html: config.render.escape_html && !no_escape,
        ..config.render.clone()
    };
    let collaborators = Collaborators::with_options(config.markdown.clone());

    TemplateEngine::with_collaborators(&collaborators, settings)
        .context("Failed to create template engine")
}

/// Render a template file, printing the result or writing it to `output`
pub async fn render_template(
    template_path: PathBuf,
    data_path: Option<PathBuf>,
    output: Option<PathBuf>,
    no_escape: bool,
    config: &Config,
) -> Result<()> {
    info!("Rendering template: {}", template_path.display());

    let template = tokio::fs::read_to_string(&template_path)
        .await
        .with_context(|| format!("Failed to read template '{}'", template_path.display()))?;

    let data = match &data_path {
        Some(path) => load_data(path)
            .await
            .with_context(|| format!("Failed to load data '{}'", path.display()))?,
        None => JsonValue::Null,
    };

    let engine = build_engine(config, no_escape)?;
    let rendered = engine
        .render_template(&template, &data)
        .with_context(|| format!("Failed to render '{}'", template_path.display()))?;

    match output {
        Some(output_path) => {
            write_output(&output_path, &rendered).await?;
            info!("Output written to: {}", output_path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write output file '{}'", path.display()))
}

/// Compile every template and report the ones with syntax errors
pub async fn check_templates(templates: Vec<PathBuf>, config: &Config) -> Result<()> {
    let engine = build_engine(config, false)?;
    let mut failures = 0;

    for path in &templates {
        let source = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read template '{}'", path.display()))?;

        match engine.validate_template(&source) {
            Ok(()) => println!("✓ {}", path.display()),
            Err(e) => {
                warn!("Template {} is invalid", path.display());
                println!("✗ {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(anyhow::anyhow!(
            "{} of {} templates failed to compile",
            failures,
            templates.len()
        ));
    }
    Ok(())
}

/// Print the names of the registered helpers
pub fn list_helpers() -> Result<()> {
    for name in HELPER_NAMES {
        println!("{}", name);
    }
    Ok(())
}
