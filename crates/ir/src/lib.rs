//! # stubsmith IR
//!
//! The normalized schema model consumed by the migration engine.
//!
//! ## Core Concepts
//!
//! - **Field**: a column, index, function or trigger with its arguments and
//!   chained modifiers
//! - **Schema**: a named table (or function/trigger group) and its ordered fields
//! - **SchemaSet**: every schema of a document, grouped by migration action
//!

pub mod field;
pub mod schema;
pub mod serialization;

pub use field::{Field, FieldType, OptionValue};
pub use schema::{Schema, SchemaSet};
pub use serialization::{SchemaFormat, load_schema_set, parse_schema_set, save_schema_set};

// Re-export core types that are commonly used with the IR
pub use stubsmith_core::{Action, EngineError, EngineResult, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
