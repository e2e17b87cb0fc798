//! Quoted, schema-qualified names of tables and indexes.

use crate::stmt::Name;

use relsql_core::schema::Model;

/// `"schema"."table"`, or `"table"` when the model has no schema.
pub fn table(model: &Model) -> Name {
    Name::qualified(model.schema.as_deref(), model.table())
}

/// Index names are derived from the table they belong to.
pub fn index(table: &str, name: &str) -> String {
    format!("{table}_{}", name.replace('-', "_"))
}

/// An existing index of `table`, qualified for DROP/ALTER INDEX.
pub fn qualified_index(schema: Option<&str>, table: &str, name: &str) -> Name {
    Name::qualified(schema, &index(table, name))
}
