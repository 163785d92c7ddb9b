//! Core types used throughout stubsmith
//!
//! The closed vocabulary the engine understands: the migration actions,
//! the direction of a reversible change, and the kind of schema element a
//! field describes.

use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Action
// ============================================================================

/// Migration action keyword
///
/// Selects the wrapper template and the per-field rendering rules. The
/// vocabulary is closed; any other keyword is rejected before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a table
    Create,
    /// Create stored functions attached to a table
    CreateFunction,
    /// Create triggers attached to a table
    CreateTrigger,
    /// Alter an existing table (typically foreign keys)
    Update,
    /// Remove columns or indexes from an existing table
    Remove,
}

impl Action {
    /// Every supported action, in processing order
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::CreateFunction,
        Action::CreateTrigger,
        Action::Update,
        Action::Remove,
    ];

    /// Separator between the verb and the noun of a keyword
    pub const SEPARATOR: char = '_';

    /// Look up an action by its keyword
    pub fn parse(keyword: &str) -> Option<Action> {
        Self::ALL.into_iter().find(|a| a.as_str() == keyword)
    }

    /// The keyword form (`create_function`, `update`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::CreateFunction => "create_function",
            Action::CreateTrigger => "create_trigger",
            Action::Update => "update",
            Action::Remove => "remove",
        }
    }

    /// The part of the keyword before the first separator
    pub fn verb(&self) -> &'static str {
        self.split().0
    }

    /// The part of the keyword after the first separator, if any
    pub fn noun(&self) -> Option<&'static str> {
        self.split().1
    }

    fn split(&self) -> (&'static str, Option<&'static str>) {
        match self.as_str().split_once(Self::SEPARATOR) {
            Some((verb, noun)) => (verb, Some(noun)),
            None => (self.as_str(), None),
        }
    }

    /// Plain table creation, whose reverse is a whole-table drop
    pub fn is_table_create(&self) -> bool {
        self.verb() == "create" && self.noun().is_none()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Which half of a reversible change is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Add,
    Drop,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Add, Direction::Drop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Add => "Add",
            Direction::Drop => "Drop",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ElementKind
// ============================================================================

/// Category of schema object a field list describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ElementKind {
    /// Table columns and indexes (the default)
    #[default]
    Column,
    /// Stored functions
    Function,
    /// Triggers
    Trigger,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [
        ElementKind::Column,
        ElementKind::Function,
        ElementKind::Trigger,
    ];

    /// Resolve the element kind named by an action noun.
    ///
    /// No noun means [`ElementKind::Column`]. The noun is title-cased before
    /// matching, so `function` resolves to `Function`.
    pub fn from_noun(noun: Option<&str>) -> Option<ElementKind> {
        let Some(noun) = noun else {
            return Some(ElementKind::Column);
        };
        let title = noun.to_upper_camel_case();
        Self::ALL.into_iter().find(|k| k.as_str() == title)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Column => "Column",
            ElementKind::Function => "Function",
            ElementKind::Trigger => "Trigger",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
