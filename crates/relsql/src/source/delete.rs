use super::Source;
use crate::{Action, Collection};

use relsql_core::{Error, Result};
use relsql_sql::query;

impl Source {
    /// Deletes rows and returns how many were removed.
    ///
    /// A collection bound to its filter deletes every matching row. Otherwise
    /// the held records are deleted by primary key and dropped from the
    /// collection.
    pub async fn delete(&mut self, collection: &mut Collection) -> Result<u64> {
        let schema = self.schema.clone();
        let model = schema.model(collection.model())?;

        if collection.action() == Action::Retrieve {
            let (like, _) = self.like(model, collection.filter_state()).await?;
            let stmt = query::delete_where(model, collection.filter_state(), like)?;
            return Ok(self.exec(&stmt).await?.rows.len());
        }

        let Some(id) = model.id_field() else {
            return Err(Error::nothing_to_delete(&model.name));
        };

        let keys = collection
            .records()
            .iter()
            .filter_map(|record| record.get(&id.name).cloned())
            .collect::<Vec<_>>();

        if keys.is_empty() {
            return Ok(0);
        }

        let stmt = query::delete_ids(model, id, keys);
        let deleted = self.exec(&stmt).await?.rows.len();

        collection.records_vec_mut().clear();
        Ok(deleted)
    }
}
