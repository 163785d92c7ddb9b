//! Generator configuration.
//!
//! Values are layered, lowest precedence first: built-in defaults, the TOML
//! config file, then `STUBSMITH_*` environment variables and command-line
//! flags (clap folds those two together).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use stubsmith_core::{EngineError, EngineResult};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "stubsmith.toml";

pub const DEFAULT_DATABASE_DIR: &str = "database";
pub const DEFAULT_PATH: &str = "civi";
pub const DEFAULT_SEEDER_CLASS: &str = "CiviDefaultSeeder";

// ============================================================================
// FileConfig
// ============================================================================

/// Contents of a `stubsmith.toml` file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub schema: Option<PathBuf>,
    pub database_dir: Option<PathBuf>,
    pub path: Option<String>,
    pub stubs_dir: Option<PathBuf>,
    pub seed: Option<bool>,
    pub seeder_class: Option<String>,
}

impl FileConfig {
    pub fn parse(text: &str) -> EngineResult<Self> {
        toml::from_str(text).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `stubsmith.toml` is read
    /// from the working directory if present, else defaults are used.
    pub fn load(explicit: Option<&Path>) -> EngineResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| EngineError::FileRead {
            path: path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::parse(&text)
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub schema: Option<PathBuf>,
    pub database_dir: Option<PathBuf>,
    pub path: Option<String>,
    pub stubs_dir: Option<PathBuf>,
    pub seed: bool,
    pub seeder_class: Option<String>,
    pub dry_run: bool,
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Fully resolved settings for one `make-migration` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Normalized schema document
    pub schema: PathBuf,

    /// Root of the Laravel `database` directory
    pub database_dir: PathBuf,

    /// Sub-folder for migrations and per-table seeders
    pub path: String,

    /// Directory overriding the embedded templates
    pub stubs_dir: Option<PathBuf>,

    /// Whether seeders are generated
    pub seed: bool,

    /// Class holding the default data seeder
    pub seeder_class: String,

    /// Report what would be written without touching disk
    pub dry_run: bool,
}

impl GeneratorConfig {
    /// Defaults for `schema`, everything else built in
    pub fn new(schema: impl Into<PathBuf>) -> Self {
        Self {
            schema: schema.into(),
            database_dir: PathBuf::from(DEFAULT_DATABASE_DIR),
            path: DEFAULT_PATH.to_string(),
            stubs_dir: None,
            seed: false,
            seeder_class: DEFAULT_SEEDER_CLASS.to_string(),
            dry_run: false,
        }
    }

    /// Layer `overrides` over `file` over the defaults
    pub fn resolve(file: FileConfig, overrides: Overrides) -> EngineResult<Self> {
        let schema = overrides.schema.or(file.schema).ok_or_else(|| {
            EngineError::InvalidConfig(
                "no schema document given (pass --schema or set `schema` in the config file)"
                    .to_string(),
            )
        })?;

        let mut config = Self::new(schema);
        if let Some(dir) = overrides.database_dir.or(file.database_dir) {
            config.database_dir = dir;
        }
        if let Some(path) = overrides.path.or(file.path) {
            config.path = path;
        }
        config.stubs_dir = overrides.stubs_dir.or(file.stubs_dir);
        config.seed = overrides.seed || file.seed.unwrap_or(false);
        if let Some(class) = overrides.seeder_class.or(file.seeder_class) {
            if class.trim().is_empty() {
                return Err(EngineError::InvalidConfig("seeder class must not be empty".to_string()));
            }
            config.seeder_class = class;
        }
        config.dry_run = overrides.dry_run;

        Ok(config)
    }

    pub fn with_database_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.database_dir = dir.into();
        self
    }

    pub fn with_stubs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stubs_dir = Some(dir.into());
        self
    }

    pub fn with_seed(mut self) -> Self {
        self.seed = true;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// `<database_dir>/migrations/<path>`
    pub fn migrations_dir(&self) -> PathBuf {
        self.database_dir.join("migrations").join(&self.path)
    }

    /// `<database_dir>/seeds`
    pub fn seeds_root(&self) -> PathBuf {
        self.database_dir.join("seeds")
    }

    /// `<database_dir>/seeds/<path>`
    pub fn seeds_dir(&self) -> PathBuf {
        self.seeds_root().join(&self.path)
    }
}

// ============================================================================
// Tests
// ============================================================================
