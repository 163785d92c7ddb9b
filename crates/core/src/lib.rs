//! # stubsmith Core
//!
//! Core types, traits, and error handling for stubsmith.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: the closed [`Action`] vocabulary, [`Direction`] and [`ElementKind`]
//! - **Traits**: `Validatable` and the [`RenderContext`] used by generators
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use traits::{RenderContext, Validatable};
pub use types::{Action, Direction, ElementKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
