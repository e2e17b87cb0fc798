use super::{create, Source};
use crate::{Action, Collection, Record};

use relsql_core::{
    schema::{Field, Model},
    stmt::Value,
    Error, Result,
};
use relsql_sql::query;

impl Source {
    /// Writes pending changes and returns the number of rows updated.
    ///
    /// A collection still bound to its filter with assigned values updates
    /// every matching row in one statement. Otherwise each held record with
    /// changes is updated by primary key, and its child collections are
    /// created or updated in turn.
    pub async fn update(&mut self, collection: &mut Collection) -> Result<u64> {
        let schema = self.schema.clone();
        let model = schema.model(collection.model())?;

        if collection.action() == Action::Retrieve && collection.has_assignments() {
            let (like, _) = self.like(model, collection.filter_state()).await?;

            let assignments = collection
                .take_assignments()
                .into_iter()
                .map(|(name, value)| {
                    let field = model.expect_field(&name)?;
                    if !field.is_stored() {
                        relsql_core::bail!(
                            "`{}.{name}` is injected and cannot be assigned across a filter",
                            model.name
                        );
                    }
                    Ok((field.store().to_string(), query::encode(field, value)))
                })
                .collect::<Result<Vec<_>>>()?;

            let stmt = query::update_where(model, assignments, collection.filter_state(), like)?;
            return Ok(self.exec(&stmt).await?.rows.len());
        }

        let Some(id) = model.id_field() else {
            return Err(Error::nothing_to_update(&model.name));
        };

        let mut updated = 0;

        for record in collection.records_mut() {
            if record.action() != Action::Update {
                continue;
            }

            let assignments = changes(model, record);

            if !assignments.is_empty() {
                let key = record.get(&id.name).cloned().unwrap_or_default();
                let stmt = query::update_id(model, id, assignments, key);
                updated += self.exec(&stmt).await?.rows.len();
            }

            self.cascade(model, record, true).await?;
            record.persisted();
        }

        Ok(updated)
    }
}

/// Assignments for the changed stored fields of a record. Changed injected
/// fields rewrite their base document.
///
/// When anything changed, fields marked `replace` that were left alone get
/// their default again and are written along with the rest.
fn changes(model: &Model, record: &mut Record) -> Vec<(String, Value)> {
    let touched = create::inject(model, record, false);

    let fields = model
        .stored_fields()
        .filter(|field| !field.is_auto())
        .collect::<Vec<_>>();

    if !fields.iter().any(|field| dirty(record, &touched, field)) {
        return vec![];
    }

    for field in &fields {
        if field.replace && !dirty(record, &touched, field) {
            if let Some(value) = field.resolve_default() {
                record.set(field.name.as_str(), value);
            }
        }
    }

    fields
        .into_iter()
        .filter(|field| dirty(record, &touched, field))
        .map(|field| {
            let value = record.get(&field.name).cloned().unwrap_or_default();
            (field.store().to_string(), query::encode(field, value))
        })
        .collect()
}

fn dirty(record: &Record, touched: &[String], field: &Field) -> bool {
    record.is_changed(&field.name) || touched.contains(&field.name)
}
