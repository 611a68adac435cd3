//! Text encoding of assembled documents.

use crate::document::Document;
use crate::error::EncodeError;

/// Output text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
    JsonPretty,
}

/// Encode `document` as YAML or JSON text.
///
/// # Errors
///
/// Returns `EncodeError` if the encoder rejects the document.
pub fn encode(document: &Document, format: Format) -> Result<String, EncodeError> {
    let text = match format {
        Format::Yaml => serde_yaml::to_string(document)?,
        Format::Json => serde_json::to_string(document)?,
        Format::JsonPretty => serde_json::to_string_pretty(document)?,
    };
    Ok(text)
}
