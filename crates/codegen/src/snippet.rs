//! # Field Snippet Generator
//!
//! Renders one field as one schema-builder statement. The generator is
//! chosen by the `(Direction, ElementKind)` pair; the table below is an
//! exhaustive `match`, so every pair has a generator.
//!
//! | key            | output                                              |
//! |----------------|-----------------------------------------------------|
//! | AddColumn      | `$table->string('name', 128)->nullable();`          |
//! |                | `$table->foreign('owner_id', 'FK_x')->references('id');` |
//! | DropColumn     | `$table->dropColumn('name');` / `$table->dropForeign('FK_x');` |
//! | AddFunction    | `DB::unprepared("CREATE ...");` + blank line        |
//! | AddTrigger     | `DB::unprepared("CREATE ...");` + blank line        |
//! | DropFunction   | `DB::unprepared("DROP ...");`                       |
//! | DropTrigger    | `DB::unprepared("DROP ...");`                       |

use heck::ToUpperCamelCase;
use std::fmt;
use stubsmith_core::{Direction, ElementKind};
use stubsmith_ir::Field;

/// A snippet generator
pub type SnippetFn = fn(&Field) -> String;

/// Composite dispatch key, displayed as e.g. `AddColumn`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnippetKey {
    pub direction: Direction,
    pub kind: ElementKind,
}

impl SnippetKey {
    pub fn new(direction: Direction, kind: ElementKind) -> Self {
        Self { direction, kind }
    }

    /// Every key the engine can be asked for
    pub fn all() -> impl Iterator<Item = SnippetKey> {
        Direction::ALL.into_iter().flat_map(|direction| {
            ElementKind::ALL
                .into_iter()
                .map(move |kind| SnippetKey::new(direction, kind))
        })
    }

    /// The generator registered for this key
    pub fn generator(&self) -> SnippetFn {
        match (self.direction, self.kind) {
            (Direction::Add, ElementKind::Column) => add_column,
            (Direction::Drop, ElementKind::Column) => drop_column,
            (Direction::Add, ElementKind::Function) => add_function,
            (Direction::Drop, ElementKind::Function) => drop_function,
            (Direction::Add, ElementKind::Trigger) => add_trigger,
            (Direction::Drop, ElementKind::Trigger) => drop_trigger,
        }
    }
}

impl fmt::Display for SnippetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction, self.kind)
    }
}

/// Render `field` with the generator for `(direction, kind)`
pub fn render(field: &Field, direction: Direction, kind: ElementKind) -> String {
    SnippetKey::new(direction, kind).generator()(field)
}

// ============================================================================
// Columns
// ============================================================================

fn add_column(field: &Field) -> String {
    let method = field.field_type.as_str();

    let mut syntax = if field.is_index_family() {
        // Index columns come first; the field name is the index name.
        format!(
            "$table->{}({}, {})",
            method,
            index_columns(&field.arguments),
            quote(&field.name)
        )
    } else if field.arguments.is_empty() {
        format!("$table->{}({})", method, quote(&field.name))
    } else {
        format!(
            "$table->{}({}, {})",
            method,
            quote(&field.name),
            field.arguments.join(", ")
        )
    };

    for (modifier, value) in &field.options {
        syntax.push_str(&format!("->{}({})", modifier, value.argument()));
    }

    syntax.push(';');
    syntax
}

fn drop_column(field: &Field) -> String {
    if field.is_index_family() {
        format!(
            "$table->drop{}({});",
            field.field_type.as_str().to_upper_camel_case(),
            quote(&field.name)
        )
    } else {
        format!("$table->dropColumn({});", quote(&field.name))
    }
}

/// The column list of an index call: a lone argument is used as-is, anything
/// else becomes an array literal (`[]` when empty).
fn index_columns(arguments: &[String]) -> String {
    match arguments {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    }
}

// ============================================================================
// Functions and triggers
// ============================================================================

fn add_function(field: &Field) -> String {
    format!("{}\n", unprepared(field.sql_up()))
}

fn drop_function(field: &Field) -> String {
    unprepared(field.sql_down())
}

fn add_trigger(field: &Field) -> String {
    format!("{}\n", unprepared(field.sql_up()))
}

fn drop_trigger(field: &Field) -> String {
    unprepared(field.sql_down())
}

/// Raw statement execution inside a double-quoted string
fn unprepared(sql: &str) -> String {
    let mut escaped = String::with_capacity(sql.len());
    for c in sql.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '$' => escaped.push_str("\\$"),
            other => escaped.push(other),
        }
    }
    format!("DB::unprepared(\"{}\");", escaped)
}

/// Single-quoted string literal
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn add(field: &Field) -> String {
        render(field, Direction::Add, ElementKind::Column)
    }

    fn drop(field: &Field) -> String {
        render(field, Direction::Drop, ElementKind::Column)
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn test_dispatch_table_covers_every_key() {
        let keys: Vec<String> = SnippetKey::all().map(|k| k.to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "AddColumn",
                "AddFunction",
                "AddTrigger",
                "DropColumn",
                "DropFunction",
                "DropTrigger",
            ]
        );
        let unique: HashSet<SnippetKey> = SnippetKey::all().collect();
        assert_eq!(unique.len(), 6);
    }

    // ── AddColumn ────────────────────────────────────────────────────────

    #[test]
    fn test_add_plain_column() {
        assert_eq!(
            add(&Field::new("id", "increments")),
            "$table->increments('id');"
        );
    }

    #[test]
    fn test_add_column_with_arguments_and_options() {
        let field = Field::new("amount", "decimal")
            .with_arguments(["20", "2"])
            .with_flag("nullable")
            .with_option("default", "'0.00'")
            .with_option("comment", "'Total amount'");

        assert_eq!(
            add(&field),
            "$table->decimal('amount', 20, 2)->nullable()->default('0.00')->comment('Total amount');"
        );
    }

    #[test]
    fn test_add_column_numeric_and_false_options() {
        let field = Field::new("is_active", "boolean")
            .with_option("default", 1_i64)
            .with_option("nullable", false);
        assert_eq!(
            add(&field),
            "$table->boolean('is_active')->default(1)->nullable(false);"
        );
    }

    #[test]
    fn test_add_foreign_key_puts_arguments_before_name() {
        let field = Field::new("owner_id", "foreign")
            .with_argument("owner_id")
            .with_option("references", "id");

        assert_eq!(
            add(&field),
            "$table->foreign(owner_id, 'owner_id')->references(id);"
        );
    }

    #[test]
    fn test_add_index_family_argument_shapes() {
        let unique = Field::new("email", "unique");
        assert_eq!(add(&unique), "$table->unique([], 'email');");

        let index = Field::new("index_sort_name", "index").with_arguments(["'sort_name'", "'id'"]);
        assert_eq!(
            add(&index),
            "$table->index(['sort_name', 'id'], 'index_sort_name');"
        );

        let primary = Field::new("PRIMARY", "primary").with_argument("['id']");
        assert_eq!(add(&primary), "$table->primary(['id'], 'PRIMARY');");
    }

    #[test]
    fn test_plain_column_orders_name_first() {
        let plain = add(&Field::new("email", "string").with_argument("64"));
        let index = add(&Field::new("email", "unique").with_argument("'email'"));
        assert!(plain.starts_with("$table->string('email', 64"));
        assert!(index.starts_with("$table->unique('email', 'email'"));
    }

    #[test]
    fn test_names_are_quoted_safely() {
        assert_eq!(
            add(&Field::new("o'brien", "string")),
            "$table->string('o\\'brien');"
        );
    }

    // ── DropColumn ───────────────────────────────────────────────────────

    #[test]
    fn test_drop_plain_column() {
        let field = Field::new("amount", "decimal").with_arguments(["20", "2"]);
        assert_eq!(drop(&field), "$table->dropColumn('amount');");
    }

    #[test]
    fn test_drop_index_family_uses_typed_drop() {
        let cases = [
            ("index", "$table->dropIndex('ix');"),
            ("unique", "$table->dropUnique('ix');"),
            ("primary", "$table->dropPrimary('ix');"),
            ("foreign", "$table->dropForeign('ix');"),
        ];
        for (keyword, expected) in cases {
            let field = Field::new("ix", keyword).with_argument("'a'");
            assert_eq!(drop(&field), expected);
        }
    }

    // ── Functions and triggers ───────────────────────────────────────────

    #[test]
    fn test_function_snippets() {
        let field = Field::function("f", "CREATE FUNCTION f()...", "DROP FUNCTION f()");
        assert_eq!(
            render(&field, Direction::Add, ElementKind::Function),
            "DB::unprepared(\"CREATE FUNCTION f()...\");\n"
        );
        assert_eq!(
            render(&field, Direction::Drop, ElementKind::Function),
            "DB::unprepared(\"DROP FUNCTION f()\");"
        );
    }

    #[test]
    fn test_trigger_snippets() {
        let field = Field::trigger(
            "t",
            "CREATE TRIGGER t BEFORE INSERT ON x FOR EACH ROW SET NEW.a = 1",
            "DROP TRIGGER IF EXISTS t",
        );
        assert!(render(&field, Direction::Add, ElementKind::Trigger).ends_with(");\n"));
        assert_eq!(
            render(&field, Direction::Drop, ElementKind::Trigger),
            "DB::unprepared(\"DROP TRIGGER IF EXISTS t\");"
        );
    }

    #[test]
    fn test_unprepared_escapes_double_quoted_string() {
        let field = Field::function("f", r#"SELECT "a", '$b' \n"#, "");
        assert_eq!(
            render(&field, Direction::Add, ElementKind::Function),
            "DB::unprepared(\"SELECT \\\"a\\\", '\\$b' \\\\n\");\n"
        );
    }
}
