//! # make-migration
//!
//! Walks a [`SchemaSet`] and writes one migration class per table and
//! action, plus seeders when asked.
//!
//! ## Order
//!
//! 1. migration and seeds directories
//! 2. `create` tables (and their seeders)
//! 3. `CiviDatabaseSeeder` / `DatabaseSeeder`
//! 4. `create_function`, `create_trigger`, `update`, `remove`
//!
//! A failure for one table or seeder is reported and counted; the run
//! carries on.
//!
//! Each migration gets its own timestamp, one second after the previous one,
//! so Laravel runs them in the order they were generated.

use chrono::NaiveDateTime;
use std::fmt;
use std::path::{Path, PathBuf};
use stubsmith_codegen::{
    DirectoryTemplates, EmbeddedTemplates, FileType, GeneratedFile, TemplateSource, generate_migration,
    generate_seeder, naming,
};
use stubsmith_core::{Action, EngineError, EngineResult};
use stubsmith_ir::{Schema, SchemaSet};
use walkdir::WalkDir;

use crate::config::GeneratorConfig;
use crate::console;
use crate::seeders::{
    self, CIVI_DATABASE_SEEDER, DATABASE_SEEDER, SeederPatch, SeederRegistry, seeder_path,
};

// ============================================================================
// RunSummary
// ============================================================================

/// A table/action pair that could not be generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub table: String,
    pub action: Action,
    pub message: String,
}

/// A seeder class that could not be written or patched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeederFailure {
    pub class: String,
    pub message: String,
}

/// Outcome of one `make-migration` run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files written (or that would be written, on a dry run)
    pub written: Vec<GeneratedFile>,
    /// Files left alone because they already exist
    pub skipped: usize,
    pub failed: Vec<Failure>,
    pub seeder_failures: Vec<SeederFailure>,
    /// Schemas that failed validation but were still generated
    pub warnings: usize,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn migrations(&self) -> usize {
        self.count(FileType::Migration)
    }

    pub fn seeders(&self) -> usize {
        self.count(FileType::Seeder)
    }

    fn count(&self, file_type: FileType) -> usize {
        self.written.iter().filter(|f| f.file_type == file_type).count()
    }

    /// Migrations and seeders that failed
    pub fn failures(&self) -> usize {
        self.failed.len() + self.seeder_failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);
        let title = if self.dry_run {
            "Dry Run Complete"
        } else {
            "Generation Complete"
        };

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str(&format!("║  {:<48}║\n", title));
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Migrations:  {:<35}║\n", self.migrations()));
        out.push_str(&format!("║  Seeders:     {:<35}║\n", self.seeders()));
        out.push_str(&format!("║  Skipped:     {:<35}║\n", self.skipped));
        out.push_str(&format!("║  Failed:      {:<35}║\n", self.failures()));
        out.push_str(&format!("║  Warnings:    {:<35}║\n", self.warnings));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

// ============================================================================
// MigrationRun
// ============================================================================

/// One pass over a schema set
pub struct MigrationRun<'a> {
    config: &'a GeneratorConfig,
    templates: Box<dyn TemplateSource>,
    timestamp: NaiveDateTime,
    stamped: i64,
    seeders: Option<SeederRegistry>,
    summary: RunSummary,
}

impl<'a> MigrationRun<'a> {
    /// Prepare a run whose first migration is stamped with `timestamp`
    pub fn new(config: &'a GeneratorConfig, timestamp: NaiveDateTime) -> Self {
        let templates: Box<dyn TemplateSource> = match &config.stubs_dir {
            Some(dir) => Box::new(DirectoryTemplates::new(dir)),
            None => Box::new(EmbeddedTemplates),
        };
        tracing::debug!(templates = %templates.describe(), "template source selected");

        Self {
            config,
            templates,
            timestamp,
            stamped: 0,
            seeders: config.seed.then(|| SeederRegistry::new(&config.seeder_class)),
            summary: RunSummary {
                dry_run: config.dry_run,
                ..Default::default()
            },
        }
    }

    /// Generate everything for `set`.
    ///
    /// # Errors
    ///
    /// Only directory creation aborts the run; per-table failures are
    /// recorded in the returned summary.
    pub fn execute(mut self, set: &SchemaSet) -> EngineResult<RunSummary> {
        self.report_validation(set);

        self.make_directory(&self.config.migrations_dir())?;
        if self.seeders.is_some() {
            self.make_directory(&self.config.seeds_dir())?;
        }

        for schema in set.active(Action::Create) {
            console::info(&format!("Processing {}", schema.name));
            self.make_migration(schema, Action::Create);
            self.make_table_seeder(schema);
        }

        self.seeder_cleanup();

        for schema in set.active(Action::CreateFunction) {
            console::info(&format!("Processing functions for {}", schema.name));
            self.make_migration(schema, Action::CreateFunction);
        }

        for schema in set.active(Action::CreateTrigger) {
            console::info(&format!("Processing triggers for {}", schema.name));
            self.make_migration(schema, Action::CreateTrigger);
        }

        for schema in set.active(Action::Update) {
            console::info(&format!("Processing foreign keys for {}", schema.name));
            self.make_migration(schema, Action::Update);
        }

        for schema in set.active(Action::Remove) {
            console::info(&format!("Processing removals for {}", schema.name));
            self.make_migration(schema, Action::Remove);
        }

        console::info("Finished.");
        Ok(self.summary)
    }

    fn report_validation(&mut self, set: &SchemaSet) {
        for (action, table, errors) in set.validation_report() {
            for error in &errors {
                tracing::warn!(table = %table, action = %action, "{}", error);
            }
            self.summary.warnings += 1;
        }
    }

    // ── Migrations ───────────────────────────────────────────────────────

    fn make_migration(&mut self, schema: &Schema, action: Action) {
        let dir = self.config.migrations_dir();
        if let Some(existing) = find_existing_migration(&dir, action, &schema.name) {
            tracing::debug!(path = %existing.display(), "migration exists");
            console::comment("Migration already exists.");
            self.summary.skipped += 1;
            return;
        }

        let timestamp = self.next_timestamp();
        let result = generate_migration(schema, action, timestamp, &*self.templates)
            .and_then(|file| self.write(&dir, file));

        match result {
            Ok(()) => console::info("Migration created successfully."),
            Err(e) => self.fail(&schema.name, action, e),
        }
    }

    /// Run start plus one second per migration already stamped
    fn next_timestamp(&mut self) -> NaiveDateTime {
        let timestamp = self.timestamp + chrono::Duration::seconds(self.stamped);
        self.stamped += 1;
        timestamp
    }

    fn fail(&mut self, table: &str, action: Action, error: EngineError) {
        tracing::error!(table = %table, action = %action, error = %error, "migration failed");
        console::error(&format!("{} {}: {}", action, table, error));
        self.summary.failed.push(Failure {
            table: table.to_string(),
            action,
            message: error.to_string(),
        });
    }

    // ── Seeders ──────────────────────────────────────────────────────────

    fn make_table_seeder(&mut self, schema: &Schema) {
        let class = naming::seeder_class_name(&schema.name);
        let Some(registry) = self.seeders.as_mut() else {
            return;
        };
        registry.register(&class);

        let dir = self.config.seeds_dir();
        self.make_seeder(&dir, &class, "");
    }

    fn seeder_cleanup(&mut self) {
        let Some(registry) = self.seeders.clone() else {
            return;
        };

        let default_class = registry.default_class().to_string();
        console::info(&format!("Processing {}", default_class));
        let dir = self.config.seeds_dir();
        self.make_seeder(&dir, &default_class, "");

        console::info(&format!("Processing {}", CIVI_DATABASE_SEEDER));
        let root = self.config.seeds_root();
        self.make_seeder(&root, CIVI_DATABASE_SEEDER, &registry.content());

        console::info(&format!("Processing {}", DATABASE_SEEDER));
        if let Err(e) = self.update_database_seeder(&root) {
            self.fail_seeder(DATABASE_SEEDER, e);
        }
    }

    /// Write a seeder unless one already exists at its path
    fn make_seeder(&mut self, dir: &Path, class: &str, content: &str) {
        if seeder_path(dir, class).exists() {
            console::comment("Seeder already exists.");
            self.summary.skipped += 1;
            return;
        }

        let result = generate_seeder(class, content, &*self.templates)
            .and_then(|file| self.write(dir, file));
        match result {
            Ok(()) => console::info("Seeder created successfully."),
            Err(e) => self.fail_seeder(class, e),
        }
    }

    fn fail_seeder(&mut self, class: &str, error: EngineError) {
        tracing::error!(class = %class, error = %error, "seeder failed");
        console::error(&format!("{}: {}", class, error));
        self.summary.seeder_failures.push(SeederFailure {
            class: class.to_string(),
            message: error.to_string(),
        });
    }

    fn update_database_seeder(&mut self, root: &Path) -> EngineResult<()> {
        let path = seeder_path(root, DATABASE_SEEDER);
        if !path.exists() {
            let content = seeders::call_statement(CIVI_DATABASE_SEEDER);
            self.make_seeder(root, DATABASE_SEEDER, &content);
            return Ok(());
        }

        let existing = std::fs::read_to_string(&path).map_err(|e| EngineError::FileRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

        match seeders::patch_database_seeder(&existing) {
            SeederPatch::AlreadyCalls => {
                console::comment("Seeder already exists.");
                self.summary.skipped += 1;
            }
            SeederPatch::MissingAnchor => {
                tracing::warn!(path = %path.display(), "no run() method to patch");
                console::comment("Seeder has no run() method; left unchanged.");
            }
            SeederPatch::Patched(text) => {
                if self.config.dry_run {
                    console::line(&path.display().to_string());
                } else {
                    std::fs::write(&path, text).map_err(|e| EngineError::FileWrite {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                }
                console::info("Updated seeder.");
            }
        }
        Ok(())
    }

    // ── Filesystem ───────────────────────────────────────────────────────

    fn make_directory(&self, dir: &Path) -> EngineResult<()> {
        if self.config.dry_run || dir.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(dir).map_err(|e| EngineError::DirectoryCreate {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write `file` into `dir` and record it
    fn write(&mut self, dir: &Path, mut file: GeneratedFile) -> EngineResult<()> {
        let full_path = dir.join(&file.path);
        if self.config.dry_run {
            console::line(&full_path.display().to_string());
        } else {
            std::fs::write(&full_path, &file.content).map_err(|e| EngineError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;
        }
        if self.config.dry_run {
            tracing::info!(path = %full_path.display(), kind = file.file_type.label(), "would write file");
        } else {
            tracing::info!(path = %full_path.display(), kind = file.file_type.label(), "wrote file");
        }

        file.path = full_path;
        self.summary.written.push(file);
        Ok(())
    }
}

/// An existing migration for `action` on `table` anywhere under `dir`
pub fn find_existing_migration(dir: &Path, action: Action, table: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| naming::is_same_migration(name, action, table))
        })
        .map(|entry| entry.into_path())
}

/// Run `make-migration` for `set`, stamping migrations from the current local time
pub fn execute(config: &GeneratorConfig, set: &SchemaSet) -> EngineResult<RunSummary> {
    let timestamp = chrono::Local::now().naive_local();
    MigrationRun::new(config, timestamp).execute(set)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stubsmith_ir::Field;
    use tempfile::TempDir;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
    }

    fn config(dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig::new("schema.json").with_database_dir(dir.path().join("database"))
    }

    fn sample_set() -> SchemaSet {
        SchemaSet::new()
            .with(
                Action::Create,
                Schema::new("civicrm_contact")
                    .with_field(Field::new("id", "increments"))
                    .with_field(Field::new("display_name", "string").with_argument("128")),
            )
            .with(Action::Create, Schema::new("civicrm_legacy").dropped())
            .with(
                Action::CreateFunction,
                Schema::new("civicrm_contact").with_field(Field::function(
                    "f",
                    "CREATE FUNCTION f()",
                    "DROP FUNCTION f",
                )),
            )
            .with(
                Action::Update,
                Schema::new("civicrm_contact").with_field(
                    Field::new("FK_civicrm_contact_employer_id", "foreign")
                        .with_argument("'employer_id'")
                        .with_option("references", "'id'"),
                ),
            )
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    // ── Migrations ───────────────────────────────────────────────────────

    #[test]
    fn test_writes_one_migration_per_active_schema() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        let summary = MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.migrations(), 3);
        assert_eq!(summary.seeders(), 0);
        assert_eq!(
            file_names(&config.migrations_dir()),
            vec![
                "2024_05_06_070809_create_civicrm_contact.php",
                "2024_05_06_070810_create_function_civicrm_contact.php",
                "2024_05_06_070811_update_civicrm_contact.php",
            ]
        );

        let update = std::fs::read_to_string(
            config.migrations_dir().join("2024_05_06_070811_update_civicrm_contact.php"),
        )
        .unwrap();
        assert!(update.contains("class UpdateCivicrmContact extends Migration"));
        assert!(update.contains("$table->dropForeign('FK_civicrm_contact_employer_id');"));
    }

    #[test]
    fn test_migrations_sort_in_processing_order() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let set = SchemaSet::new()
            .with(Action::Create, Schema::new("widgets").with_field(Field::new("id", "increments")))
            .with(
                Action::CreateTrigger,
                Schema::new("widgets").with_field(Field::trigger("t", "CREATE TRIGGER t", "DROP TRIGGER t")),
            )
            .with(Action::Update, Schema::new("widgets").with_field(Field::new("name", "string")))
            .with(Action::Remove, Schema::new("widgets").with_field(Field::new("legacy", "string")));

        MigrationRun::new(&config, timestamp()).execute(&set).unwrap();

        assert_eq!(
            file_names(&config.migrations_dir()),
            vec![
                "2024_05_06_070809_create_widgets.php",
                "2024_05_06_070810_create_trigger_widgets.php",
                "2024_05_06_070811_update_widgets.php",
                "2024_05_06_070812_remove_widgets.php",
            ]
        );
    }

    #[test]
    fn test_second_run_skips_existing_migrations() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();

        let later = timestamp() + chrono::Duration::minutes(5);
        let summary = MigrationRun::new(&config, later).execute(&sample_set()).unwrap();

        assert_eq!(summary.migrations(), 0);
        assert_eq!(summary.skipped, 3);
        assert_eq!(file_names(&config.migrations_dir()).len(), 3);
    }

    #[test]
    fn test_duplicate_check_does_not_confuse_actions() {
        let dir = TempDir::new().unwrap();
        let migrations = dir.path().join("migrations");
        std::fs::create_dir_all(migrations.join("nested")).unwrap();
        std::fs::write(
            migrations.join("nested/2019_01_01_000000_create_function_civicrm_contact.php"),
            "",
        )
        .unwrap();

        assert!(find_existing_migration(&migrations, Action::CreateFunction, "civicrm_contact").is_some());
        assert!(find_existing_migration(&migrations, Action::Create, "civicrm_contact").is_none());
        assert!(find_existing_migration(&migrations, Action::CreateFunction, "contact").is_none());
    }

    #[test]
    fn test_failure_for_one_table_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let stubs = dir.path().join("stubs");
        std::fs::create_dir_all(&stubs).unwrap();
        for name in ["migration", "schema-create"] {
            std::fs::write(
                stubs.join(format!("{name}.stub")),
                EmbeddedTemplates.load(name).unwrap(),
            )
            .unwrap();
        }
        let config = config(&dir).with_stubs_dir(&stubs);

        let summary = MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();

        assert!(!summary.is_success());
        assert_eq!(summary.migrations(), 1);
        assert_eq!(
            summary
                .failed
                .iter()
                .map(|f| f.action)
                .collect::<Vec<_>>(),
            vec![Action::CreateFunction, Action::Update]
        );
        assert!(summary.failed[0].message.contains("schema-create-function"));
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir).with_seed().dry_run();

        let summary = MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.migrations(), 3);
        assert!(summary.seeders() > 0);
        assert!(!dir.path().join("database").exists());
        assert!(summary.display().contains("Dry Run Complete"));
    }

    #[test]
    fn test_invalid_schema_is_warned_and_still_generated() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let set = SchemaSet::new().with(
            Action::Create,
            Schema::new("widgets")
                .with_field(Field::new("id", "increments"))
                .with_field(Field::new("id", "increments")),
        );

        let summary = MigrationRun::new(&config, timestamp()).execute(&set).unwrap();
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.migrations(), 1);
    }

    // ── Seeders ──────────────────────────────────────────────────────────

    #[test]
    fn test_seed_generates_seeders_and_database_seeder() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir).with_seed();

        let summary = MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();
        assert!(summary.is_success());

        assert_eq!(
            file_names(&config.seeds_dir()),
            vec!["CiviDefaultSeeder.php", "CivicrmContactSeeder.php"]
        );

        let civi = std::fs::read_to_string(config.seeds_root().join("CiviDatabaseSeeder.php")).unwrap();
        assert!(civi.contains(
            "$this->call(CiviDefaultSeeder::class);\n        // $this->call(CivicrmContactSeeder::class);"
        ));

        let root = std::fs::read_to_string(config.seeds_root().join("DatabaseSeeder.php")).unwrap();
        assert!(root.contains("class DatabaseSeeder extends Seeder"));
        assert!(root.contains("        $this->call(CiviDatabaseSeeder::class);"));
    }

    #[test]
    fn test_seeder_failures_fail_the_run() {
        let dir = TempDir::new().unwrap();
        let stubs = dir.path().join("stubs");
        std::fs::create_dir_all(&stubs).unwrap();
        for action in Action::ALL {
            let name = stubsmith_codegen::templates::wrapper_name(action);
            std::fs::write(stubs.join(format!("{name}.stub")), EmbeddedTemplates.load(&name).unwrap()).unwrap();
        }
        std::fs::write(stubs.join("migration.stub"), EmbeddedTemplates.load("migration").unwrap()).unwrap();
        let config = config(&dir).with_stubs_dir(&stubs).with_seed();

        let summary = MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();

        assert_eq!(summary.migrations(), 3);
        assert!(summary.failed.is_empty());
        assert!(!summary.is_success());
        assert_eq!(
            summary
                .seeder_failures
                .iter()
                .map(|f| f.class.as_str())
                .collect::<Vec<_>>(),
            vec!["CivicrmContactSeeder", "CiviDefaultSeeder", "CiviDatabaseSeeder", "DatabaseSeeder"]
        );
        assert_eq!(summary.failures(), 4);
        assert!(summary.display().contains("Failed:      4"));
    }

    #[test]
    fn test_existing_database_seeder_is_patched() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir).with_seed();
        std::fs::create_dir_all(config.seeds_root()).unwrap();
        let path = config.seeds_root().join("DatabaseSeeder.php");
        std::fs::write(
            &path,
            "<?php\n\nclass DatabaseSeeder extends Seeder\n{\n    public function run()\n    {\n        //\n    }\n}\n",
        )
        .unwrap();

        MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();
        let patched = std::fs::read_to_string(&path).unwrap();
        assert!(patched.contains("    {\n        $this->call(CiviDatabaseSeeder::class);\n        //\n"));

        MigrationRun::new(&config, timestamp()).execute(&sample_set()).unwrap();
        let again = std::fs::read_to_string(&path).unwrap();
        assert_eq!(again.matches("CiviDatabaseSeeder::class").count(), 1);
    }
}
