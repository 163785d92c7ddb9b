//! Naming rules for generated classes and files.

use chrono::NaiveDateTime;
use heck::ToUpperCamelCase;
use stubsmith_core::Action;

/// `strftime` pattern of the migration file prefix
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

/// Length of `YYYY_MM_DD_HHMMSS_`
const TIMESTAMP_PREFIX_LEN: usize = 18;

/// Extension of every generated file
pub const PHP_EXTENSION: &str = "php";

/// Migration class name, e.g. `create_function` + `civicrm_contact` →
/// `CreateFunctionCivicrmContact`
pub fn class_name(action: Action, table: &str) -> String {
    format!("{}_{}", action, table).to_upper_camel_case()
}

/// The part of a migration file name after the timestamp:
/// `<action>_<table>.php`
pub fn migration_suffix(action: Action, table: &str) -> String {
    format!("{}_{}.{}", action, table, PHP_EXTENSION)
}

/// Full migration file name: `<YYYY_MM_DD_HHMMSS>_<action>_<table>.php`
pub fn migration_file_name(timestamp: NaiveDateTime, action: Action, table: &str) -> String {
    format!(
        "{}_{}",
        timestamp.format(TIMESTAMP_FORMAT),
        migration_suffix(action, table)
    )
}

/// Remove a leading `YYYY_MM_DD_HHMMSS_` prefix, if present
pub fn strip_timestamp(file_name: &str) -> Option<&str> {
    let prefix = file_name.get(..TIMESTAMP_PREFIX_LEN)?;
    let well_formed = prefix.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 | 10 | 17 => b == b'_',
        _ => b.is_ascii_digit(),
    });
    well_formed.then(|| &file_name[TIMESTAMP_PREFIX_LEN..])
}

/// Whether `file_name` is a migration for `action` on `table`, whatever its
/// timestamp.
///
/// The comparison is exact: `create_civicrm_contact.php` does not match
/// `create_function_civicrm_contact.php`.
pub fn is_same_migration(file_name: &str, action: Action, table: &str) -> bool {
    strip_timestamp(file_name) == Some(migration_suffix(action, table).as_str())
}

// ============================================================================
// Models and seeders
// ============================================================================

/// Singularise a word with simple English heuristics.
///
/// Only the ending is inspected, so both `snake_case` and `PascalCase` input
/// work.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if ["sses", "shes", "ches", "xes", "zzes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.ends_with('s') && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Model class for a table (singular studly case, e.g. `civicrm_contacts` →
/// `CivicrmContact`)
pub fn model_name(table: &str) -> String {
    singularize(&table.to_upper_camel_case())
}

/// Seeder class for a table, e.g. `civicrm_contact` → `CivicrmContactSeeder`
pub fn seeder_class_name(table: &str) -> String {
    format!("{}Seeder", model_name(table))
}

// ============================================================================
// Tests
// ============================================================================
