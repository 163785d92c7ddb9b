//! # Stubsmith Codegen
//!
//! Migration synthesis engine for stubsmith.
//!
//! Given a table schema and an action keyword, this crate renders the
//! `up`/`down` bodies of a Laravel migration and compiles them into a full
//! PHP class.
//!
//! ## Pipeline
//!
//! - **Resolver**: action keyword → direction, element kind, down plan
//! - **Snippets**: one schema-builder statement per field
//! - **Assembler**: snippets joined into an indented block
//! - **Synthesizer**: blocks placed into the action's wrapper template
//! - **Stub compiler**: the pair placed into the migration class stub
//!

// ============================================================================
// Modules
// ============================================================================

pub mod assembler;
pub mod naming;
pub mod placeholder;
pub mod resolver;
pub mod snippet;
pub mod stub;
pub mod synthesizer;
pub mod templates;

// ============================================================================
// Re-exports
// ============================================================================

pub use resolver::{DownPlan, Resolution, resolve};
pub use stub::StubCompiler;
pub use synthesizer::{GeneratedPair, SyntaxBuilder, synthesize};
pub use templates::{DirectoryTemplates, EmbeddedTemplates, TemplateSource};

use chrono::NaiveDateTime;
use std::path::PathBuf;
use stubsmith_core::{Action, EngineResult};
use stubsmith_ir::Schema;

// ============================================================================
// GeneratedFile
// ============================================================================

/// A single generated file
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// File name, relative to the output directory for its type
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// File type for categorization
    pub file_type: FileType,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
        }
    }

    /// Create a migration class file
    pub fn migration(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Migration)
    }

    /// Create a seeder class file
    pub fn seeder(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Seeder)
    }
}

/// Type of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Migration,
    Seeder,
}

impl FileType {
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Migration => "migration",
            FileType::Seeder => "seeder",
        }
    }
}

// ============================================================================
// Convenience entry points
// ============================================================================

/// Compile the migration for `schema` under `action`, named with `timestamp`
pub fn generate_migration(
    schema: &Schema,
    action: Action,
    timestamp: NaiveDateTime,
    templates: &dyn TemplateSource,
) -> EngineResult<GeneratedFile> {
    let content = StubCompiler::new(templates).compile_migration(schema, action)?;
    let path = naming::migration_file_name(timestamp, action, &schema.name);
    Ok(GeneratedFile::migration(path, content))
}

/// Compile a seeder class file named after `class`
pub fn generate_seeder(
    class: &str,
    content: &str,
    templates: &dyn TemplateSource,
) -> EngineResult<GeneratedFile> {
    let text = StubCompiler::new(templates).compile_seeder(class, content)?;
    let path = format!("{}.{}", class, naming::PHP_EXTENSION);
    Ok(GeneratedFile::seeder(path, text))
}

// ============================================================================
// Tests
// ============================================================================
