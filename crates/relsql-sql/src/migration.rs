//! Migration statements between two model definitions.

use crate::{
    define::{self, default_literal, extract_define, field_define},
    naming, path,
    stmt::{AlterColumnChange, Name, Statement, Type, Value},
};

use relsql_core::{
    schema::{Field, FieldMigration, IndexMigration, Model, ModelMigration},
    Result,
};

/// Statements creating a model's table and indexes.
pub fn model_add(model: &Model) -> Vec<Statement> {
    define::define(model)
}

/// Statements removing a model's table.
pub fn model_remove(model: &Model) -> Vec<Statement> {
    vec![Statement::drop_table_if_exists(naming::table(model))]
}

/// Statements migrating the table of `definition` as described by
/// `migration`.
///
/// The order is fixed: schema, table rename (with every index renamed to
/// follow it), removed indexes, field adds, removes and changes, then new
/// and renamed unique and plain indexes. Every collection is processed in
/// name order.
pub fn model_change(definition: &Model, migration: &ModelMigration) -> Result<Vec<Statement>> {
    let mut statements = vec![];

    let mut schema = definition.schema.clone();
    let mut table = definition.table().to_string();

    if let Some(to) = &migration.schema {
        if schema.as_ref() != Some(to) {
            statements.push(Statement::alter_table_set_schema(
                Name::qualified(schema.as_deref(), &table),
                to,
            ));
            schema = Some(to.clone());
        }
    }

    if let Some(to) = &migration.store {
        if *to != table {
            statements.push(Statement::alter_table_rename_to(
                Name::qualified(schema.as_deref(), &table),
                to,
            ));

            for name in sorted(definition.unique.keys().chain(definition.index.keys())) {
                statements.push(Statement::alter_index_rename_to(
                    naming::qualified_index(schema.as_deref(), &table, name),
                    naming::index(to, name),
                ));
            }

            table = to.clone();
        }
    }

    let name = Name::qualified(schema.as_deref(), &table);

    for removed in sorted(migration.unique.remove.iter().chain(&migration.index.remove)) {
        statements.push(Statement::drop_index(naming::qualified_index(
            schema.as_deref(),
            &table,
            removed,
        )));
    }

    for field in sorted_by_name(&migration.fields.add) {
        for column in field_define(field) {
            statements.push(Statement::add_column(name.clone(), column));
        }
    }

    for removed in sorted(&migration.fields.remove) {
        let field = definition.expect_field(removed)?;
        if !field.is_stored() {
            continue;
        }

        for path in sorted(field.extract.keys()) {
            statements.push(Statement::drop_column(
                name.clone(),
                path::column_store(field.store(), path),
            ));
        }

        statements.push(Statement::drop_column(name.clone(), field.store()));
    }

    for changed in sorted(migration.fields.change.keys()) {
        let before = definition.expect_field(changed)?;
        let change = &migration.fields.change[changed];
        field_change(&name, before, change, &mut statements);
    }

    let mut after = definition.clone();
    after.schema = schema.clone();
    after.store = Some(table.clone());

    index_change(&after, &migration.unique, true, &mut statements);
    index_change(&after, &migration.index, false, &mut statements);

    tracing::debug!(
        model = %definition.name,
        statements = statements.len(),
        "computed model migration"
    );

    Ok(statements)
}

fn index_change(
    model: &Model,
    migration: &IndexMigration,
    unique: bool,
    statements: &mut Vec<Statement>,
) {
    for added in sorted(migration.add.keys()) {
        statements.push(define::create_index(
            model,
            added,
            &migration.add[added],
            unique,
        ));
    }

    for from in sorted(migration.rename.keys()) {
        statements.push(Statement::alter_index_rename_to(
            naming::qualified_index(model.schema.as_deref(), model.table(), from),
            naming::index(model.table(), &migration.rename[from]),
        ));
    }
}

/// Statements for one changed field: its generated columns and the base
/// column itself.
fn field_change(
    table: &Name,
    before: &Field,
    change: &FieldMigration,
    statements: &mut Vec<Statement>,
) {
    let after = change.apply(before);

    if !before.is_stored() || !after.is_stored() {
        return;
    }

    let (from, to) = (before.store(), after.store());

    // Generated columns whose path is removed or retyped go first, they
    // depend on the base column
    let retyped: Vec<&String> = sorted(
        change
            .extract
            .change
            .iter()
            .filter(|(path, kind)| before.extract.get(*path) != Some(*kind))
            .map(|(path, _)| path),
    );

    for path in sorted(change.extract.remove.iter().chain(retyped.iter().copied())) {
        if before.extract.contains_key(path) {
            statements.push(Statement::drop_column(
                table.clone(),
                path::column_store(from, path),
            ));
        }
    }

    if let Some(alter) = column_change(table, before, &after, change) {
        statements.push(alter);
    }

    if from != to {
        statements.push(Statement::rename_column(table.clone(), from, to));

        for path in sorted(before.extract.keys()) {
            if after.extract.contains_key(path) && !retyped.contains(&path) {
                statements.push(Statement::rename_column(
                    table.clone(),
                    path::column_store(from, path),
                    path::column_store(to, path),
                ));
            }
        }
    }

    for path in sorted(change.extract.add.keys().chain(retyped.iter().copied())) {
        statements.push(Statement::add_column(
            table.clone(),
            extract_define(to, path, after.extract[path]),
        ));
    }
}

/// One ALTER TABLE carrying every attribute change of a column, or `None`
/// when only its name changes.
pub fn column_change(
    table: &Name,
    before: &Field,
    after: &Field,
    change: &FieldMigration,
) -> Option<Statement> {
    if after.definition.is_some() {
        return None;
    }

    let mut changes = vec![];

    let (ty_before, ty_after) = (Type::from_field(before), Type::from_field(after));
    let retyped = ty_before.storage() != ty_after.storage();

    if retyped {
        changes.push(AlterColumnChange::Type(ty_after.storage()));
    }

    match &change.default {
        Some(Some(value)) if !value.is_null() => {
            if let Some(literal) = default_literal(after.kind, Some(value)) {
                changes.push(AlterColumnChange::SetDefault(literal));
            }
        }
        Some(_) => match after.kind.empty() {
            Some(empty) => changes.push(AlterColumnChange::SetDefault(Value::Json(empty))),
            None => changes.push(AlterColumnChange::DropDefault),
        },
        // Containers share a storage type, so compare kinds
        None if after.kind != before.kind => {
            match (after.kind.empty(), after.default_value()) {
                (Some(empty), None) => {
                    changes.push(AlterColumnChange::SetDefault(Value::Json(empty)))
                }
                (None, None) if before.kind.is_container() => {
                    changes.push(AlterColumnChange::DropDefault)
                }
                _ => {}
            }
        }
        None => {}
    }

    if before.nullable != after.nullable {
        changes.push(if after.nullable {
            AlterColumnChange::DropNotNull
        } else {
            AlterColumnChange::SetNotNull
        });
    }

    if changes.is_empty() {
        return None;
    }

    Some(Statement::alter_column(
        table.clone(),
        before.store(),
        changes,
    ))
}

fn sorted<'a, T: Ord + ?Sized + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<&'a T> {
    let mut items: Vec<_> = items.into_iter().collect();
    items.sort();
    items.dedup();
    items
}

fn sorted_by_name(fields: &[Field]) -> Vec<&Field> {
    let mut fields: Vec<_> = fields.iter().collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}
