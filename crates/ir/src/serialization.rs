//! Loading and saving normalized schema documents
//!
//! The schema-definition parser is an external tool; its normalized output
//! reaches stubsmith as a JSON or TOML document shaped like [`SchemaSet`].

use crate::SchemaSet;
use std::path::Path;
use stubsmith_core::{EngineError, EngineResult};

// ============================================================================
// Format
// ============================================================================

/// On-disk encoding of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Toml,
}

impl SchemaFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> EngineResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SchemaFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(SchemaFormat::Toml),
            other => Err(EngineError::InvalidSchemaFormat(format!(
                "unsupported extension {:?} for '{}' (expected .json or .toml)",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Parse a schema document from text
pub fn parse_schema_set(text: &str, format: SchemaFormat) -> EngineResult<SchemaSet> {
    match format {
        SchemaFormat::Json => serde_json::from_str(text).map_err(Into::into),
        SchemaFormat::Toml => {
            toml::from_str(text).map_err(|e| EngineError::InvalidSchemaFormat(e.to_string()))
        }
    }
}

/// Load a schema document from a `.json` or `.toml` file
///
/// # Example
///
/// ```rust,ignore
/// use stubsmith_ir::load_schema_set;
///
/// let schema = load_schema_set("schema/normalized.json")?;
/// println!("{} tables", schema.create.len());
/// ```
pub fn load_schema_set(path: impl AsRef<Path>) -> EngineResult<SchemaSet> {
    let path = path.as_ref();
    let format = SchemaFormat::from_path(path)?;

    let text = std::fs::read_to_string(path).map_err(|e| EngineError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_schema_set(&text, format).map_err(|e| EngineError::InvalidSchemaFormat(format!(
        "{}: {}",
        path.display(),
        e
    )))
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a schema document as pretty-printed JSON
pub fn save_schema_set(set: &SchemaSet, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(set)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| EngineError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| EngineError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
