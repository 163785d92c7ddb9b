//! Error types for stubsmith
//!
//! One enum for the whole workspace. Synthesis errors abort a single
//! table; the orchestrator decides whether the run goes on.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for stubsmith
#[derive(Debug, Error)]
pub enum EngineError {
    // ========================================================================
    // Synthesis Errors
    // ========================================================================
    /// Action keyword outside the supported vocabulary
    #[error("Unsupported action '{action}' while building the {path} method")]
    UnsupportedAction { action: String, path: String },

    /// A wrapper or base template resource is missing
    #[error("Template '{name}' not found at {path}")]
    TemplateNotFound { name: String, path: PathBuf },

    /// A compiled output still contains placeholder tokens
    #[error("Template '{template}' has unresolved placeholders: {}", .placeholders.join(", "))]
    UnresolvedPlaceholder {
        template: String,
        placeholders: Vec<String>,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field validation failed
    #[error("Field validation failed for '{schema}.{field}': {message}")]
    FieldValidation {
        schema: String,
        field: String,
        message: String,
    },

    /// Duplicate field name
    #[error("Duplicate field name: '{field}' already exists in '{schema}'")]
    DuplicateField { schema: String, field: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema document could not be understood
    #[error("Invalid schema document: {0}")]
    InvalidSchemaFormat(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Create an unsupported-action error for the given method half
    pub fn unsupported_action(action: impl Into<String>, path: impl Into<String>) -> Self {
        EngineError::UnsupportedAction {
            action: action.into(),
            path: path.into(),
        }
    }

    /// Create a template-not-found error
    pub fn template_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        EngineError::TemplateNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EngineError::Validation(msg.into())
    }

    /// Create a field validation error
    pub fn field_validation(
        schema: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        EngineError::FieldValidation {
            schema: schema.into(),
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EngineError::Validation(_)
                | EngineError::FieldValidation { .. }
                | EngineError::DuplicateField { .. }
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::TemplateNotFound { .. })
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            EngineError::FileRead { .. }
                | EngineError::FileWrite { .. }
                | EngineError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unsupported_action_error() {
        let err = EngineError::unsupported_action("destroy", "up");
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "Unsupported action 'destroy' while building the up method"
        );
    }

    #[test]
    fn test_template_not_found_error() {
        let err = EngineError::template_not_found("schema-update", "/stubs/schema-update.stub");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Template 'schema-update' not found at /stubs/schema-update.stub"
        );
    }

    #[test]
    fn test_unresolved_placeholder_error() {
        let err = EngineError::UnresolvedPlaceholder {
            template: "migration".to_string(),
            placeholders: vec!["{{class}}".to_string(), "{{table}}".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Template 'migration' has unresolved placeholders: {{class}}, {{table}}"
        );
    }

    #[test]
    fn test_field_validation_error() {
        let err = EngineError::field_validation("civicrm_contact", "email", "missing arguments");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field validation failed for 'civicrm_contact.email': missing arguments"
        );
    }

    #[test]
    fn test_duplicate_field_error() {
        let err = EngineError::DuplicateField {
            schema: "widgets".to_string(),
            field: "id".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Duplicate field name: 'id' already exists in 'widgets'"
        );
    }

    #[test]
    fn test_io_error_classification() {
        let err = EngineError::FileWrite {
            path: PathBuf::from("database/migrations/civi/x.php"),
            message: "Permission denied".to_string(),
        };
        assert!(err.is_io());
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Failed to write file 'database/migrations/civi/x.php': Permission denied"
        );
    }
}
