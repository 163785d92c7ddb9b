//! # Stubsmith CLI
//!
//! Command-line interface for stubsmith.
//!
//! ## Commands
//!
//! - `make-migration` - Generate migration (and seeder) classes from a
//!   schema document
//! - `validate` - Check a schema document and report problems
//!

pub mod config;
pub mod console;
pub mod make_migration;
pub mod seeders;

pub use clap::Parser;
pub use config::{FileConfig, GeneratorConfig, Overrides};
pub use make_migration::{MigrationRun, RunSummary};

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use stubsmith_ir::load_schema_set;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "stubsmith", version, about = "Generate Laravel migration classes from table schemas")]
pub struct Cli {
    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate migration classes from a schema document
    MakeMigration(MakeMigrationArgs),
    /// Check a schema document and report every problem found
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct MakeMigrationArgs {
    /// Normalized schema document (.json or .toml)
    #[arg(long, env = "STUBSMITH_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Config file (defaults to ./stubsmith.toml when present)
    #[arg(long, env = "STUBSMITH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Laravel database directory
    #[arg(long, env = "STUBSMITH_DATABASE_DIR")]
    pub database_dir: Option<PathBuf>,

    /// Sub-folder for migrations and seeders
    #[arg(long, env = "STUBSMITH_PATH")]
    pub path: Option<String>,

    /// Directory of .stub files overriding the built-in templates
    #[arg(long, env = "STUBSMITH_STUBS_DIR")]
    pub stubs_dir: Option<PathBuf>,

    /// Build a seeder class for each created table
    #[arg(long, env = "STUBSMITH_SEED")]
    pub seed: bool,

    /// Seeder class for default data
    #[arg(long, env = "STUBSMITH_SEEDER_CLASS")]
    pub seeder_class: Option<String>,

    /// Print what would be written without touching disk
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Normalized schema document (.json or .toml)
    pub schema: PathBuf,
}

impl MakeMigrationArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            schema: self.schema.clone(),
            database_dir: self.database_dir.clone(),
            path: self.path.clone(),
            stubs_dir: self.stubs_dir.clone(),
            seed: self.seed,
            seeder_class: self.seeder_class.clone(),
            dry_run: self.dry_run,
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run the parsed command line
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::MakeMigration(args) => make_migration_command(args),
        Command::Validate(args) => validate_command(args),
    }
}

fn make_migration_command(args: MakeMigrationArgs) -> anyhow::Result<ExitCode> {
    let file = FileConfig::load(args.config.as_deref()).context("reading config file")?;
    let config = GeneratorConfig::resolve(file, args.overrides())?;
    tracing::debug!(?config, "resolved configuration");

    let set = load_schema_set(&config.schema)
        .with_context(|| format!("loading schema document {}", config.schema.display()))?;
    tracing::info!(schemas = set.len(), path = %config.schema.display(), "schema document loaded");

    let summary = make_migration::execute(&config, &set)?;
    println!();
    print!("{}", summary);

    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        console::error(&format!("{} file(s) could not be generated.", summary.failures()));
        Ok(ExitCode::FAILURE)
    }
}

fn validate_command(args: ValidateArgs) -> anyhow::Result<ExitCode> {
    let set = load_schema_set(&args.schema)
        .with_context(|| format!("loading schema document {}", args.schema.display()))?;

    let report = set.validation_report();
    if report.is_empty() {
        console::info(&format!("{} schemas, no problems found.", set.len()));
        return Ok(ExitCode::SUCCESS);
    }

    for (action, table, errors) in &report {
        console::comment(&format!("{} {}", action, table));
        for error in errors {
            console::line(error);
        }
    }
    console::error(&format!("{} of {} schemas have problems.", report.len(), set.len()));
    Ok(ExitCode::FAILURE)
}

// ============================================================================
// Tests
// ============================================================================
