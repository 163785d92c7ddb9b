//! # Stub Compiler
//!
//! Fills the base class stubs: the migration class around a
//! [`GeneratedPair`](crate::synthesizer::GeneratedPair), and the seeder
//! class around a `run` body. A compiled stub never contains a placeholder.

use stubsmith_core::{Action, EngineResult};
use stubsmith_ir::Schema;

use crate::naming;
use crate::placeholder::{Placeholder, ensure_resolved, substitute};
use crate::synthesizer::SyntaxBuilder;
use crate::templates::{MIGRATION_STUB, SEEDER_STUB, TemplateSource};

/// Body written into a seeder with nothing to run
const EMPTY_SEEDER_BODY: &str = "//";

/// Compiles base stubs from a template source
pub struct StubCompiler<'a> {
    templates: &'a dyn TemplateSource,
}

impl<'a> StubCompiler<'a> {
    pub fn new(templates: &'a dyn TemplateSource) -> Self {
        Self { templates }
    }

    /// Full migration class for `schema` under `action`
    pub fn compile_migration(&self, schema: &Schema, action: Action) -> EngineResult<String> {
        let pair = SyntaxBuilder::new(self.templates).synthesize(schema, action.as_str())?;
        let stub = self.templates.load(MIGRATION_STUB)?;

        let class = naming::class_name(action, &schema.name);
        let skeleton = substitute(
            &stub,
            &[(Placeholder::Class, class.as_str()), (Placeholder::Table, schema.name.as_str())],
        );
        let empty = [(Placeholder::SchemaUp, ""), (Placeholder::SchemaDown, "")];
        ensure_resolved(MIGRATION_STUB, &substitute(&skeleton, &empty))?;

        Ok(substitute(
            &skeleton,
            &[(Placeholder::SchemaUp, pair.up.as_str()), (Placeholder::SchemaDown, pair.down.as_str())],
        ))
    }

    /// Seeder class named `class` whose `run` method holds `content`
    pub fn compile_seeder(&self, class: &str, content: &str) -> EngineResult<String> {
        let stub = self.templates.load(SEEDER_STUB)?;
        let body = if content.trim().is_empty() {
            EMPTY_SEEDER_BODY
        } else {
            content
        };

        let skeleton = substitute(&stub, &[(Placeholder::Class, class)]);
        ensure_resolved(SEEDER_STUB, &substitute(&skeleton, &[(Placeholder::Content, "")]))?;

        Ok(substitute(&skeleton, &[(Placeholder::Content, body)]))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::unresolved;
    use crate::templates::{DirectoryTemplates, EmbeddedTemplates};
    use pretty_assertions::assert_eq;
    use stubsmith_core::EngineError;
    use stubsmith_ir::Field;
    use tempfile::TempDir;

    fn compiler() -> StubCompiler<'static> {
        StubCompiler::new(&EmbeddedTemplates)
    }

    #[test]
    fn test_compile_create_migration() {
        let schema = Schema::new("widgets").with_field(Field::new("id", "increments"));
        let php = compiler().compile_migration(&schema, Action::Create).unwrap();

        let expected = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\DB;
use Illuminate\Support\Facades\Schema;

class CreateWidgets extends Migration
{
    /**
     * Run the migrations.
     *
     * @return void
     */
    public function up()
    {
        Schema::create('widgets', function (Blueprint $table) {
            $table->increments('id');
        });
    }

    /**
     * Reverse the migrations.
     *
     * @return void
     */
    public function down()
    {
        Schema::drop('widgets');
    }
}
"#;
        assert_eq!(php, expected);
    }

    #[test]
    fn test_every_action_compiles_without_placeholders() {
        let schema = Schema::new("civicrm_contact")
            .with_field(Field::new("id", "increments"))
            .with_field(Field::trigger("t", "CREATE TRIGGER t", "DROP TRIGGER t"));

        for action in Action::ALL {
            let php = compiler().compile_migration(&schema, action).unwrap();
            assert!(unresolved(&php).is_empty(), "{action}");
            assert!(php.contains(&naming::class_name(action, "civicrm_contact")));
        }
    }

    #[test]
    fn test_raw_sql_tokens_survive_compilation() {
        let schema = Schema::new("widgets").with_field(Field::trigger(
            "t",
            "CREATE TRIGGER t -- {{table}} {{schema_down}} {{class}}",
            "DROP TRIGGER t",
        ));
        let php = compiler().compile_migration(&schema, Action::CreateTrigger).unwrap();

        assert!(php.contains("class CreateTriggerWidgets extends Migration"));
        assert!(php.contains("DB::unprepared(\"CREATE TRIGGER t -- {{table}} {{schema_down}} {{class}}\");"));
        assert!(php.contains("DB::unprepared(\"DROP TRIGGER t\");"));
    }

    #[test]
    fn test_compile_seeder() {
        let php = compiler()
            .compile_seeder("CiviDatabaseSeeder", "$this->call(A::class);")
            .unwrap();
        assert!(php.contains("class CiviDatabaseSeeder extends Seeder"));
        assert!(php.contains("        $this->call(A::class);\n    }"));

        let empty = compiler().compile_seeder("WidgetSeeder", "").unwrap();
        assert!(empty.contains("    {\n        //\n    }"));
    }

    #[test]
    fn test_missing_base_stub() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("schema-update.stub"),
            "Schema::table('{{table}}', function (Blueprint $table) {\n    {{schema_up}}{{schema_down}}\n});\n",
        )
        .unwrap();
        let templates = DirectoryTemplates::new(dir.path());

        let err = StubCompiler::new(&templates)
            .compile_migration(&Schema::new("widgets"), Action::Update)
            .unwrap_err();
        assert!(matches!(err, EngineError::TemplateNotFound { ref name, .. } if name == "migration"));
    }

    #[test]
    fn test_unknown_token_in_base_stub_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("seeder.stub"), "class {{class}} { {{content}} {{author}} }").unwrap();
        let templates = DirectoryTemplates::new(dir.path());

        let err = StubCompiler::new(&templates)
            .compile_seeder("WidgetSeeder", "")
            .unwrap_err();
        assert!(matches!(err, EngineError::UnresolvedPlaceholder { ref template, .. } if template == "seeder"));
    }
}
