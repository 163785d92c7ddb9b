//! Core traits for stubsmith
//!
//! Shared behavior for schema validation and the rendering context handed
//! to code generators.

use crate::error::EngineResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Internal consistency checks.
///
/// Implementors override [`validation_errors`](Validatable::validation_errors)
/// when they can report more than one problem at once; the orchestrator
/// prints every entry.
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `EngineError` describing the problem.
    fn validate(&self) -> EngineResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Indentation settings for generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Indentation level
    pub indent_level: usize,
    /// Number of spaces per indent level
    pub spaces_per_indent: usize,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Create a new context at the top level
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            spaces_per_indent: 4,
        }
    }

    /// Context for statements inside a schema closure within a migration
    /// method: class body, method body, closure body.
    pub fn closure_body() -> Self {
        Self {
            indent_level: 3,
            ..Self::new()
        }
    }

    /// Get the current indentation string
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.spaces_per_indent)
    }

    /// Separator placed between consecutive generated lines
    pub fn line_separator(&self) -> String {
        format!("\n{}", self.indent())
    }
}

// ============================================================================
// Tests
// ============================================================================
