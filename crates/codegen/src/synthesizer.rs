//! # Pair Synthesizer
//!
//! The engine entry point: turns a schema and an action keyword into the
//! bodies of a migration's `up` and `down` methods.
//!
//! ## Pipeline
//!
//! ```text
//! keyword ──► resolver::resolve()          → up direction, down plan, kind
//!                 │
//! fields  ──► assembler::assemble() × 2    → up body, down body
//!                 │
//! action  ──► templates::load_wrapper()    → wrapper text
//!                 │
//!                 ▼
//!          GeneratedPair { up, down }
//! ```
//!
//! For plain `create` the down body is a whole-table drop and the fields
//! are not rendered for it.

use stubsmith_core::{EngineResult, RenderContext};
use stubsmith_ir::Schema;

use crate::assembler::assemble;
use crate::placeholder::{Placeholder, ensure_resolved, fill, insert, substitute};
use crate::resolver::{DownPlan, resolve};
use crate::templates::{EmbeddedTemplates, TemplateSource, load_wrapper, wrapper_name};

/// The filled bodies of the `up` and `down` methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPair {
    pub up: String,
    pub down: String,
}

/// Statement dropping a whole table
pub fn drop_table_statement(table: &str) -> String {
    format!("Schema::drop('{}');", table)
}

// ============================================================================
// SyntaxBuilder
// ============================================================================

/// Builds [`GeneratedPair`]s from a template source.
///
/// Holds no state between calls; one builder can serve any number of
/// schemas.
pub struct SyntaxBuilder<'a> {
    templates: &'a dyn TemplateSource,
    ctx: RenderContext,
}

impl<'a> SyntaxBuilder<'a> {
    pub fn new(templates: &'a dyn TemplateSource) -> Self {
        Self {
            templates,
            ctx: RenderContext::closure_body(),
        }
    }

    /// Generate the `up`/`down` pair for `schema` under `action`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedAction` if either half rejects the keyword; no template
    ///   is loaded in that case.
    /// - `TemplateNotFound` if the wrapper for the action is missing.
    /// - `UnresolvedPlaceholder` if the wrapper carries unknown tokens.
    pub fn synthesize(&self, schema: &Schema, action: &str) -> EngineResult<GeneratedPair> {
        let resolution = resolve(action)?;

        let up_body = assemble(&schema.fields, resolution.up, resolution.kind, &self.ctx);
        let down_body = match resolution.down {
            DownPlan::Fields(direction) => {
                Some(assemble(&schema.fields, direction, resolution.kind, &self.ctx))
            }
            DownPlan::DropTable => None,
        };

        let wrapper = load_wrapper(self.templates, resolution.action)?;
        let template = wrapper_name(resolution.action);

        let up = fill_half(&template, &wrapper, &up_body, Placeholder::SchemaUp, &schema.name)?;
        let down = match down_body {
            Some(body) => fill_half(&template, &wrapper, &body, Placeholder::SchemaDown, &schema.name)?,
            None => drop_table_statement(&schema.name),
        };

        tracing::debug!(
            table = %schema.name,
            action = %resolution.action,
            fields = schema.fields.len(),
            "synthesized migration bodies",
        );

        Ok(GeneratedPair { up, down })
    }
}

/// Name the table and clear the other insertion point, check the wrapper for
/// leftovers, then insert `body` at `slot`
fn fill_half(
    template: &str,
    wrapper: &str,
    body: &str,
    slot: Placeholder,
    table: &str,
) -> EngineResult<String> {
    let other = match slot {
        Placeholder::SchemaUp => Placeholder::SchemaDown,
        _ => Placeholder::SchemaUp,
    };
    let skeleton = substitute(wrapper, &[(Placeholder::Table, table), (other, "")]);
    ensure_resolved(template, &fill(&skeleton, slot, ""))?;
    Ok(insert(body).into_wrapper(&skeleton, slot))
}

/// Generate the `up`/`down` pair using the embedded templates
pub fn synthesize(schema: &Schema, action: &str) -> EngineResult<GeneratedPair> {
    SyntaxBuilder::new(&EmbeddedTemplates).synthesize(schema, action)
}

// ============================================================================
// Tests
// ============================================================================
