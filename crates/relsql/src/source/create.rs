use super::Source;
use crate::{document, Action, Collection, Record};

use relsql_core::{
    schema::{Field, Model},
    stmt::Value,
    Error, Result,
};
use relsql_sql::query;

impl Source {
    /// Inserts every record of `collection` that has not been written yet.
    ///
    /// With an auto-increment key, outside bulk mode, each row is inserted on
    /// its own and the generated key is read back into the record. Otherwise
    /// rows go out in multi-row INSERTs of `insert_page_size` rows.
    ///
    /// Outside bulk mode, pending child rows are created afterwards with the
    /// parent's key copied into their foreign key, and every record moves to
    /// [`Action::Update`]. In bulk mode the records are dropped instead.
    pub async fn create(&mut self, collection: &mut Collection) -> Result<()> {
        let schema = self.schema.clone();
        let model = schema.model(collection.model())?;
        let bulk = collection.is_bulk();

        let columns = model
            .stored_fields()
            .filter(|field| !field.is_auto())
            .collect::<Vec<_>>();
        let stores = columns
            .iter()
            .map(|field| field.store().to_string())
            .collect::<Vec<_>>();

        let mut rows = vec![];

        for record in collection.records_mut() {
            if record.action() != Action::Create {
                continue;
            }
            prepare(model, record);
            rows.push(payload(&columns, record));
        }

        match model.auto_id().filter(|_| !bulk) {
            Some(id) => {
                let pending = collection
                    .records_mut()
                    .iter_mut()
                    .filter(|record| record.action() == Action::Create);

                for (record, row) in pending.zip(rows) {
                    let stmt = query::insert(model, stores.clone(), vec![row], Some(id));
                    let mut returned = self.exec(&stmt).await?.rows.into_values()?;

                    let key = returned
                        .first_mut()
                        .and_then(|row| row.take(id.store()))
                        .ok_or_else(|| {
                            relsql_core::err!("insert into `{}` returned no key", model.name)
                        })?;

                    record.fill(&id.name, key);
                }
            }
            None => {
                for page in rows.chunks(self.config.insert_page_size.max(1)) {
                    let stmt = query::insert(model, stores.clone(), page.to_vec(), None);
                    self.exec(&stmt).await?;
                }
            }
        }

        if bulk {
            collection.records_vec_mut().clear();
            return Ok(());
        }

        for record in collection.records_mut() {
            if record.action() != Action::Create {
                continue;
            }
            self.cascade(model, record, false).await?;
            record.persisted();
        }

        collection.persisted();
        Ok(())
    }

    /// Creates the pending rows of each child collection with the parent's
    /// key back-filled, then, when `update` is set, writes changes to the
    /// rows already held.
    #[async_recursion::async_recursion]
    pub(crate) async fn cascade(
        &mut self,
        model: &Model,
        record: &mut Record,
        update: bool,
    ) -> Result<()> {
        for name in record.child_names() {
            let relation = model.children.get(&name).ok_or_else(|| {
                Error::invalid_definition(format!(
                    "model `{}` has no child collection `{name}`",
                    model.name
                ))
            })?;

            let key = record
                .get(&relation.parent_field)
                .cloned()
                .unwrap_or_default();

            let Some(child) = record.child_mut(&name) else {
                continue;
            };

            for pending in child.records_mut() {
                if pending.action() == Action::Create {
                    pending.fill(&relation.field, key.clone());
                }
            }

            self.create(child).await?;

            if update {
                self.update(child).await?;
            }
        }

        Ok(())
    }
}

/// Fills defaults for missing values, then folds injected values into their
/// base documents.
pub(super) fn prepare(model: &Model, record: &mut Record) {
    for field in &model.fields {
        if field.is_auto() || record.get(&field.name).is_some() {
            continue;
        }

        let empty = field.is_stored().then(|| field.kind.empty()).flatten();
        let value = field
            .resolve_default()
            .or_else(|| empty.map(Value::from));

        if let Some(value) = value {
            record.fill(&field.name, value);
        }
    }

    inject(model, record, true);
}

/// Writes injected values into their base documents, every one when `all`
/// is set or else only the changed ones. Returns the base fields touched.
pub(super) fn inject(model: &Model, record: &mut Record, all: bool) -> Vec<String> {
    let mut touched = vec![];

    for field in &model.fields {
        let Some((base, path)) = field.injection() else {
            continue;
        };

        if !all && !record.is_changed(&field.name) {
            continue;
        }

        let Some(value) = record.get(&field.name).cloned() else {
            continue;
        };

        let doc = record.get(base).cloned().unwrap_or_default();
        record.fill(base, document::write(doc, path, value));
        touched.push(base.to_string());
    }

    touched
}

/// Encoded column values for one row, in `columns` order.
fn payload(columns: &[&Field], record: &Record) -> Vec<Value> {
    columns
        .iter()
        .map(|field| {
            let value = record.get(&field.name).cloned().unwrap_or_default();
            query::encode(field, value)
        })
        .collect()
}
