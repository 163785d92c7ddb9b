//! # Placeholder Substitution
//!
//! Templates mark insertion points with `{{name}}` tokens. Substitution is a
//! plain string replacement per token; there is no template language.
//!
//! Inserted values are data. Callers resolve a template's own tokens and
//! check it for leftovers before any generated body goes in, so a `{{word}}`
//! inside a column option or raw SQL is never read back as a token.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use stubsmith_core::{EngineError, EngineResult};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*[A-Za-z_][A-Za-z0-9_]*\s*\}\}").expect("placeholder regex is valid")
});

// ============================================================================
// Placeholder
// ============================================================================

/// A named insertion point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// Generated class name
    Class,
    /// Target table name
    Table,
    /// Body of the `up` method
    SchemaUp,
    /// Body of the `down` method
    SchemaDown,
    /// Body of a seeder's `run` method
    Content,
}

impl Placeholder {
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::Class => "class",
            Placeholder::Table => "table",
            Placeholder::SchemaUp => "schema_up",
            Placeholder::SchemaDown => "schema_down",
            Placeholder::Content => "content",
        }
    }

    /// The literal token, e.g. `{{schema_up}}`
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.name())
    }
}

/// Replace every occurrence of `placeholder` in `text` with `value`
pub fn fill(text: &str, placeholder: Placeholder, value: &str) -> String {
    text.replace(&placeholder.token(), value)
}

/// Replace several placeholders in one pass over `text`.
///
/// Values are not scanned again, so a value holding another placeholder's
/// token is kept as written. Tokens not listed in `values` are left alone.
pub fn substitute(text: &str, values: &[(Placeholder, &str)]) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[0];
            values
                .iter()
                .find(|(placeholder, _)| placeholder.token() == token)
                .map_or_else(|| token.to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

// ============================================================================
// Insertion
// ============================================================================

/// A rendered body staged for insertion into a wrapper.
///
/// ```rust,ignore
/// let up = insert(&body).into_wrapper(&wrapper, Placeholder::SchemaUp);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Insertion<'a> {
    body: &'a str,
}

/// Stage `body` for insertion
pub fn insert(body: &str) -> Insertion<'_> {
    Insertion { body }
}

impl Insertion<'_> {
    /// Put the staged body at `placeholder` inside `wrapper`
    pub fn into_wrapper(self, wrapper: &str, placeholder: Placeholder) -> String {
        fill(wrapper, placeholder, self.body)
    }
}

// ============================================================================
// Leftover detection
// ============================================================================

/// Every distinct placeholder token still present in `text`, in order of
/// first appearance
pub fn unresolved(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in TOKEN.find_iter(text) {
        if !found.iter().any(|f| f == m.as_str()) {
            found.push(m.as_str().to_string());
        }
    }
    found
}

/// Fail with [`EngineError::UnresolvedPlaceholder`] if `text` still holds tokens
pub fn ensure_resolved(template: &str, text: &str) -> EngineResult<()> {
    let placeholders = unresolved(text);
    if placeholders.is_empty() {
        Ok(())
    } else {
        Err(EngineError::UnresolvedPlaceholder {
            template: template.to_string(),
            placeholders,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
