//! # Template Resources
//!
//! Stub files the engine fills in. Each action has a wrapper template named
//! `schema-<action>.stub` (separators become hyphens) holding the
//! `{{schema_up}}` and `{{schema_down}}` insertion points; the base class
//! stubs are `migration.stub` and `seeder.stub`.
//!
//! Templates come from a [`TemplateSource`]: the copies compiled into the
//! binary, or a directory on disk that overrides them.

use std::path::{Path, PathBuf};
use stubsmith_core::{Action, EngineError, EngineResult};

/// Base migration class stub
pub const MIGRATION_STUB: &str = "migration";

/// Base seeder class stub
pub const SEEDER_STUB: &str = "seeder";

/// File extension of every template resource
pub const STUB_EXTENSION: &str = "stub";

// ============================================================================
// TemplateSource
// ============================================================================

/// Where template resources are read from
pub trait TemplateSource {
    /// Load the template called `name` (without extension)
    fn load(&self, name: &str) -> EngineResult<String>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Name of the wrapper template for an action
pub fn wrapper_name(action: Action) -> String {
    format!("schema-{}", action.as_str().replace(Action::SEPARATOR, "-"))
}

/// Load the wrapper template for an action.
///
/// Trailing newlines are trimmed so the wrapper sits flush inside the
/// method body of the base stub.
pub fn load_wrapper(source: &dyn TemplateSource, action: Action) -> EngineResult<String> {
    let text = source.load(&wrapper_name(action))?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

fn file_name(name: &str) -> String {
    format!("{}.{}", name, STUB_EXTENSION)
}

// ============================================================================
// EmbeddedTemplates
// ============================================================================

/// The stub files shipped with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    fn lookup(name: &str) -> Option<&'static str> {
        let text = match name {
            "migration" => include_str!("../stubs/migration.stub"),
            "seeder" => include_str!("../stubs/seeder.stub"),
            "schema-create" => include_str!("../stubs/schema-create.stub"),
            "schema-create-function" => include_str!("../stubs/schema-create-function.stub"),
            "schema-create-trigger" => include_str!("../stubs/schema-create-trigger.stub"),
            "schema-update" => include_str!("../stubs/schema-update.stub"),
            "schema-remove" => include_str!("../stubs/schema-remove.stub"),
            _ => return None,
        };
        Some(text)
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, name: &str) -> EngineResult<String> {
        Self::lookup(name)
            .map(str::to_string)
            .ok_or_else(|| EngineError::template_not_found(name, Path::new("<embedded>").join(file_name(name))))
    }

    fn describe(&self) -> String {
        "embedded stubs".to_string()
    }
}

// ============================================================================
// DirectoryTemplates
// ============================================================================

/// Stub files read from a directory
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path a template would be read from
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(file_name(name))
    }
}

impl TemplateSource for DirectoryTemplates {
    fn load(&self, name: &str) -> EngineResult<String> {
        let path = self.path_of(name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(EngineError::template_not_found(name, path))
            }
            Err(e) => Err(EngineError::FileRead {
                path,
                message: e.to_string(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("stubs in {}", self.root.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
