//! JSON rendering for extracted documents.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::DocumentContent;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(document: &DocumentContent, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(document),
        JsonFormat::Compact => serde_json::to_string(document),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize a document as JSON and write it to a file.
pub fn write_json_file<P: AsRef<Path>>(
    path: P,
    document: &DocumentContent,
    format: JsonFormat,
) -> Result<()> {
    let json = to_json(document, format)?;
    fs::write(path, json)?;
    Ok(())
}
