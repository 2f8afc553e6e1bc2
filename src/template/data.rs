// ABOUTME: Loading of the data a template is rendered against
// ABOUTME: Reads JSON or YAML documents into JSON values, keeping key order

use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::debug;

use super::error::{Result, TemplateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick the format from a file extension, JSON when there is none
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(DataFormat::Json),
            Some(ext) => Self::from_name(ext),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            other => Err(TemplateError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse a data document. Empty input yields `null`.
pub fn parse_data(content: &str, format: DataFormat) -> Result<JsonValue> {
    if content.trim().is_empty() {
        return Ok(JsonValue::Null);
    }

    let value: JsonValue = match format {
        DataFormat::Json => serde_json::from_str(content)?,
        DataFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(value)
}

/// Read and parse a data file, the format following its extension
pub async fn load_data(path: &Path) -> Result<JsonValue> {
    let format = DataFormat::from_path(path)?;
    debug!("Loading {:?} data from {}", format, path.display());

    let content = tokio::fs::read_to_string(path).await?;
    parse_data(&content, format)
}
