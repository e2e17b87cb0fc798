//! Type/column mapping and table definitions.

use crate::{
    naming, path,
    stmt::{ColumnDef, Expr, Statement, Type, Value},
};

use relsql_core::schema::{Field, FieldKind, Model};

/// The column definition of a stored field.
///
/// Injected fields have no column of their own and must be filtered out
/// before reaching here.
pub fn column_define(field: &Field) -> ColumnDef {
    if let Some(definition) = &field.definition {
        return ColumnDef::raw(field.store(), definition);
    }

    let mut column = ColumnDef::new(field.store(), Type::from_field(field));
    column.not_null = !field.nullable;
    column.primary_key = field.primary_key;
    column.default = default_literal(field.kind, field.default_value());
    column
}

/// The literal DEFAULT for a field of `kind`.
///
/// Documents are rendered as JSON. Containers without a literal default get
/// an empty one.
pub fn default_literal(kind: FieldKind, default: Option<&Value>) -> Option<Value> {
    match default {
        Some(Value::Null) | None => kind.empty().map(Value::Json),
        Some(value) if kind.is_document() => Some(Value::Json(value.to_json())),
        Some(value) => Some(value.clone()),
    }
}

/// A generated column materializing `path` of the document in `store`.
pub fn extract_define(store: &str, path: &str, kind: FieldKind) -> ColumnDef {
    let ty = Type::from_kind(kind, None);

    let access = Expr::Path {
        column: store.to_string(),
        path: Box::new(Expr::Literal(path::walk(path))),
        text: !kind.is_document(),
    };

    let mut column = ColumnDef::new(path::column_store(store, path), ty);
    column.generated = Some(if kind.is_document() {
        access
    } else {
        access.cast(ty)
    });
    column
}

/// The base column of a field followed by its generated columns, sorted by
/// path.
pub fn field_define(field: &Field) -> Vec<ColumnDef> {
    if !field.is_stored() {
        return vec![];
    }

    let mut columns = vec![column_define(field)];

    let mut paths: Vec<_> = field.extract.iter().collect();
    paths.sort_by(|a, b| a.0.cmp(b.0));

    for (path, kind) in paths {
        columns.push(extract_define(field.store(), path, *kind));
    }

    columns
}

/// CREATE TABLE followed by the model's unique and plain indexes.
pub fn define(model: &Model) -> Vec<Statement> {
    if let Some(definition) = &model.definition {
        return definition.iter().map(Statement::raw).collect();
    }

    let table = naming::table(model);

    let columns = model.stored_fields().flat_map(field_define).collect();

    let mut statements = vec![Statement::create_table(table.clone(), columns)];

    for (name, stores) in &model.unique {
        statements.push(create_index(model, name, stores, true));
    }

    for (name, stores) in &model.index {
        statements.push(create_index(model, name, stores, false));
    }

    tracing::debug!(model = %model.name, statements = statements.len(), "defined table");

    statements
}

pub(crate) fn create_index(model: &Model, name: &str, stores: &[String], unique: bool) -> Statement {
    Statement::create_index(
        naming::index(model.table(), name),
        naming::table(model),
        stores.to_vec(),
        unique,
    )
}
