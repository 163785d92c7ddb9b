//! # Schema Assembler
//!
//! Joins the snippets of a field list into one block. The first line carries
//! no indentation of its own (the template places it); every following line
//! is prefixed with the indentation of the surrounding body.

use stubsmith_core::{Direction, ElementKind, RenderContext};
use stubsmith_ir::Field;

use crate::snippet;

/// Render `fields` in order and join them into a single block.
///
/// An empty field list yields an empty string.
pub fn assemble(
    fields: &[Field],
    direction: Direction,
    kind: ElementKind,
    ctx: &RenderContext,
) -> String {
    if fields.is_empty() {
        return String::new();
    }

    fields
        .iter()
        .map(|field| snippet::render(field, direction, kind))
        .collect::<Vec<_>>()
        .join(&ctx.line_separator())
}

// ============================================================================
// Tests
// ============================================================================
