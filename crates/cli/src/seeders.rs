//! Seeder bookkeeping for `make-migration --seed`.
//!
//! Every per-table seeder is registered with a [`SeederRegistry`]. After the
//! table migrations, the registry becomes the body of `CiviDatabaseSeeder`:
//! the default data seeder runs, every other call is commented out until
//! the seeder has content. Laravel's own `DatabaseSeeder` is then patched to
//! call `CiviDatabaseSeeder`.

use std::path::{Path, PathBuf};
use stubsmith_codegen::naming;

/// Seeder that runs every generated seeder
pub const CIVI_DATABASE_SEEDER: &str = "CiviDatabaseSeeder";

/// Laravel's root seeder
pub const DATABASE_SEEDER: &str = "DatabaseSeeder";

/// Opening of the `run` method in a Laravel seeder
const RUN_ANCHOR: &str = "run()\n    {\n";

/// Indentation of a statement inside `run`
const BODY_INDENT: &str = "        ";

/// `$this->call(<class>::class);`
pub fn call_statement(class: &str) -> String {
    format!("$this->call({}::class);", class)
}

/// `<dir>/<class>.php`
pub fn seeder_path(dir: &Path, class: &str) -> PathBuf {
    dir.join(format!("{}.{}", class, naming::PHP_EXTENSION))
}

// ============================================================================
// SeederRegistry
// ============================================================================

/// Ordered `$this->call(...)` statements for `CiviDatabaseSeeder`
#[derive(Debug, Clone, Default)]
pub struct SeederRegistry {
    default_class: String,
    calls: Vec<String>,
}

impl SeederRegistry {
    /// Start a registry whose first call runs `default_class`
    pub fn new(default_class: &str) -> Self {
        let default_class = naming::model_name(default_class);
        Self {
            calls: vec![call_statement(&default_class)],
            default_class,
        }
    }

    /// Class name of the default data seeder
    pub fn default_class(&self) -> &str {
        &self.default_class
    }

    pub fn register(&mut self, class: &str) {
        self.calls.push(call_statement(class));
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Body of `CiviDatabaseSeeder::run`; all calls after the first are
    /// commented out
    pub fn content(&self) -> String {
        self.calls.join(&format!("\n{}// ", BODY_INDENT))
    }
}

// ============================================================================
// DatabaseSeeder patching
// ============================================================================

/// Outcome of adding the `CiviDatabaseSeeder` call to `DatabaseSeeder`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeederPatch {
    /// The call is already present
    AlreadyCalls,
    /// The updated file text
    Patched(String),
    /// No `run()` method opening to insert after
    MissingAnchor,
}

/// Insert the `CiviDatabaseSeeder` call at the top of `run`
pub fn patch_database_seeder(existing: &str) -> SeederPatch {
    let call = call_statement(CIVI_DATABASE_SEEDER);
    if existing.contains(&call) {
        return SeederPatch::AlreadyCalls;
    }
    if !existing.contains(RUN_ANCHOR) {
        return SeederPatch::MissingAnchor;
    }
    SeederPatch::Patched(existing.replacen(
        RUN_ANCHOR,
        &format!("{}{}{}\n", RUN_ANCHOR, BODY_INDENT, call),
        1,
    ))
}

// ============================================================================
// Tests
// ============================================================================
