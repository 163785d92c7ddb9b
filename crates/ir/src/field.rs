//! Field definitions for schema elements
//!
//! This module contains the `Field` struct and related types describing a
//! single column, index, function or trigger of a normalized schema.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Field
// ============================================================================

/// One entry of a schema's field list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Column, index or routine name (unique within its schema)
    pub name: String,

    /// Column type, index type or pseudo-type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Pre-rendered argument literals, spliced verbatim into the call
    #[serde(default, deserialize_with = "string_or_seq")]
    pub arguments: Vec<String>,

    /// Chained modifier calls, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, OptionValue>,

    /// Raw statement executed by the up method (functions and triggers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_up: Option<String>,

    /// Raw statement executed by the down method (functions and triggers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql_down: Option<String>,
}

impl Field {
    /// Create a new field with the given name and type
    pub fn new(name: impl Into<String>, field_type: impl Into<FieldType>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            arguments: Vec::new(),
            options: IndexMap::new(),
            sql_up: None,
            sql_down: None,
        }
    }

    /// Create a stored-function field from its create and drop statements
    pub fn function(
        name: impl Into<String>,
        sql_up: impl Into<String>,
        sql_down: impl Into<String>,
    ) -> Self {
        Self::new(name, FieldType::Function).with_sql(sql_up, sql_down)
    }

    /// Create a trigger field from its create and drop statements
    pub fn trigger(
        name: impl Into<String>,
        sql_up: impl Into<String>,
        sql_down: impl Into<String>,
    ) -> Self {
        Self::new(name, FieldType::Trigger).with_sql(sql_up, sql_down)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Append one pre-rendered argument literal
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Replace the argument list
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Append a modifier with a literal value, e.g. `default('0')`
    pub fn with_option(mut self, method: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(method.into(), value.into());
        self
    }

    /// Append a modifier called without arguments, e.g. `nullable()`
    pub fn with_flag(self, method: impl Into<String>) -> Self {
        self.with_option(method, OptionValue::Flag(true))
    }

    /// Set the raw statements for a function or trigger
    pub fn with_sql(mut self, sql_up: impl Into<String>, sql_down: impl Into<String>) -> Self {
        self.sql_up = Some(sql_up.into());
        self.sql_down = Some(sql_down.into());
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Whether this field renders with index argument ordering
    pub fn is_index_family(&self) -> bool {
        self.field_type.is_index_family()
    }

    /// Raw up statement, or an empty string when absent
    pub fn sql_up(&self) -> &str {
        self.sql_up.as_deref().unwrap_or_default()
    }

    /// Raw down statement, or an empty string when absent
    pub fn sql_down(&self) -> &str {
        self.sql_down.as_deref().unwrap_or_default()
    }
}

// ============================================================================
// FieldType
// ============================================================================

/// The `type` of a field
///
/// Index-family types (`index`, `unique`, `primary`, `foreign`) and the
/// pseudo-types (`function`, `trigger`) get their own variants; every other
/// keyword is a column type and is rendered as the method of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Index,
    Unique,
    Primary,
    Foreign,
    Function,
    Trigger,
    /// Any column type (`increments`, `string`, `decimal`, ...)
    Column(String),
}

impl FieldType {
    /// The keyword form, also the schema-builder method name
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Index => "index",
            FieldType::Unique => "unique",
            FieldType::Primary => "primary",
            FieldType::Foreign => "foreign",
            FieldType::Function => "function",
            FieldType::Trigger => "trigger",
            FieldType::Column(name) => name,
        }
    }

    /// `index`, `unique`, `primary` or `foreign`
    pub fn is_index_family(&self) -> bool {
        matches!(
            self,
            FieldType::Index | FieldType::Unique | FieldType::Primary | FieldType::Foreign
        )
    }

    /// `function` or `trigger`
    pub fn is_pseudo(&self) -> bool {
        matches!(self, FieldType::Function | FieldType::Trigger)
    }
}

impl From<String> for FieldType {
    fn from(keyword: String) -> Self {
        match keyword.as_str() {
            "index" => FieldType::Index,
            "unique" => FieldType::Unique,
            "primary" => FieldType::Primary,
            "foreign" => FieldType::Foreign,
            "function" => FieldType::Function,
            "trigger" => FieldType::Trigger,
            _ => FieldType::Column(keyword),
        }
    }
}

impl From<&str> for FieldType {
    fn from(keyword: &str) -> Self {
        FieldType::from(keyword.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// OptionValue
// ============================================================================

/// Value of a chained modifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// `true` renders a call without arguments
    Flag(bool),
    Integer(i64),
    Float(f64),
    /// Pre-rendered literal, spliced verbatim
    Literal(String),
}

impl OptionValue {
    /// The text placed between the parentheses of the modifier call
    pub fn argument(&self) -> String {
        match self {
            OptionValue::Flag(true) => String::new(),
            OptionValue::Flag(false) => "false".to_string(),
            OptionValue::Integer(n) => n.to_string(),
            // Debug keeps the fraction: 1.0 stays a float literal in PHP
            OptionValue::Float(n) => format!("{:?}", n),
            OptionValue::Literal(text) => text.clone(),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Integer(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Literal(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Literal(value)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Accept `"5, 2"` as well as `["5", "2"]` for the argument list
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Arguments {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Arguments::deserialize(deserializer)? {
        Arguments::One(text) if text.is_empty() => Vec::new(),
        Arguments::One(text) => vec![text],
        Arguments::Many(list) => list,
    })
}

// ============================================================================
// Tests
// ============================================================================
