//! Schema definitions
//!
//! A [`Schema`] describes one table (or the functions/triggers attached to
//! it) as an ordered list of fields. A [`SchemaSet`] groups schemas by the
//! migration action that should be generated for them.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stubsmith_core::{Action, EngineError, EngineResult, Validatable};

// ============================================================================
// Schema
// ============================================================================

/// A table, function group or trigger group and its fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Target table or object name
    pub name: String,

    /// Fields in declaration order; output preserves this order
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Skip this schema entirely when generating
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub drop: bool,
}

impl Schema {
    /// Create an empty schema for the given table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            drop: false,
        }
    }

    /// Append a field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark the schema as dropped
    pub fn dropped(mut self) -> Self {
        self.drop = true;
        self
    }
}

impl Schema {
    fn field_error(&self, field: &Field) -> Option<EngineError> {
        if field.name.trim().is_empty() {
            return Some(EngineError::field_validation(
                &self.name,
                &field.name,
                "field name cannot be empty",
            ));
        }
        if field.is_index_family() && field.arguments.is_empty() {
            return Some(EngineError::field_validation(
                &self.name,
                &field.name,
                format!("'{}' requires at least one argument", field.field_type),
            ));
        }
        if field.field_type.is_pseudo() && (field.sql_up.is_none() || field.sql_down.is_none()) {
            return Some(EngineError::field_validation(
                &self.name,
                &field.name,
                format!("'{}' requires both sql_up and sql_down", field.field_type),
            ));
        }
        None
    }

    fn all_errors(&self) -> Vec<EngineError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(EngineError::validation("Schema name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            errors.extend(self.field_error(field));
            if !field.name.is_empty() && !seen.insert(field.name.as_str()) {
                errors.push(EngineError::DuplicateField {
                    schema: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        errors
    }
}

impl Validatable for Schema {
    fn validate(&self) -> EngineResult<()> {
        match self.all_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn validation_errors(&self) -> Vec<String> {
        self.all_errors().iter().map(ToString::to_string).collect()
    }
}

// ============================================================================
// SchemaSet
// ============================================================================

/// Normalized schema document: schemas grouped by migration action
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaSet {
    #[serde(default)]
    pub create: Vec<Schema>,

    #[serde(default)]
    pub create_function: Vec<Schema>,

    #[serde(default)]
    pub create_trigger: Vec<Schema>,

    #[serde(default)]
    pub update: Vec<Schema>,

    #[serde(default)]
    pub remove: Vec<Schema>,
}

impl SchemaSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schemas registered for an action
    pub fn section(&self, action: Action) -> &[Schema] {
        match action {
            Action::Create => &self.create,
            Action::CreateFunction => &self.create_function,
            Action::CreateTrigger => &self.create_trigger,
            Action::Update => &self.update,
            Action::Remove => &self.remove,
        }
    }

    fn section_mut(&mut self, action: Action) -> &mut Vec<Schema> {
        match action {
            Action::Create => &mut self.create,
            Action::CreateFunction => &mut self.create_function,
            Action::CreateTrigger => &mut self.create_trigger,
            Action::Update => &mut self.update,
            Action::Remove => &mut self.remove,
        }
    }

    /// Register a schema under an action
    pub fn push(&mut self, action: Action, schema: Schema) {
        self.section_mut(action).push(schema);
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, action: Action, schema: Schema) -> Self {
        self.push(action, schema);
        self
    }

    /// Schemas of an action that are not marked `drop`
    pub fn active(&self, action: Action) -> impl Iterator<Item = &Schema> {
        self.section(action).iter().filter(|s| !s.drop)
    }

    /// Number of schemas across all sections
    pub fn len(&self) -> usize {
        Action::ALL.iter().map(|a| self.section(*a).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every `(action, schema)` pair whose schema fails validation
    pub fn validation_report(&self) -> Vec<(Action, String, Vec<String>)> {
        Action::ALL
            .iter()
            .flat_map(|action| {
                self.section(*action).iter().filter_map(move |schema| {
                    let errors = schema.validation_errors();
                    (!errors.is_empty()).then(|| (*action, schema.name.clone(), errors))
                })
            })
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
