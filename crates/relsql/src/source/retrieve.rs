use super::Source;
use crate::{document, Collection, Record};

use indexmap::IndexMap;
use relsql_core::{
    schema::Model,
    stmt::{Filter, Row},
    Error, Result,
};
use relsql_sql::{
    query::{self, ParentKeys},
    stmt::Expr,
};

impl Source {
    /// Reads every row matching the collection's filter.
    ///
    /// When a limit applies and the number of rows reaches it, or a parent
    /// lookup for the fuzzy search was cut off, the collection is flagged as
    /// overflowing.
    pub async fn retrieve(&mut self, collection: &mut Collection) -> Result<()> {
        let (records, overflow) = self.select(collection).await?;
        collection.retrieved(records, overflow);
        Ok(())
    }

    /// Reads the single row matching the collection's filter. Errors when
    /// none or more than one row matches.
    pub async fn retrieve_one<'a>(
        &mut self,
        collection: &'a mut Collection,
    ) -> Result<&'a mut Record> {
        let model = collection.model().to_string();

        match self.try_retrieve_one(collection).await? {
            Some(record) => Ok(record),
            None => Err(Error::none_retrieved(&model)),
        }
    }

    /// Like [`retrieve_one`](Self::retrieve_one), but no match is `None`.
    pub async fn try_retrieve_one<'a>(
        &mut self,
        collection: &'a mut Collection,
    ) -> Result<Option<&'a mut Record>> {
        let (records, _) = self.select(collection).await?;

        if records.len() > 1 {
            return Err(Error::more_than_one_retrieved(collection.model()));
        }

        if records.is_empty() {
            return Ok(None);
        }

        collection.retrieved(records, false);
        Ok(collection.records_mut().first_mut())
    }

    /// Counts the rows matching the collection's filter and search term.
    pub async fn count(&mut self, collection: &Collection) -> Result<u64> {
        let schema = self.schema.clone();
        let model = schema.model(collection.model())?;

        let (like, _) = self.like(model, collection.filter_state()).await?;
        let stmt = query::count(model, collection.filter_state(), like)?;
        let rows = self.exec(&stmt).await?.rows.into_values()?;

        let count = rows
            .first()
            .and_then(|row| row.iter().next())
            .and_then(|(_, value)| value.as_i64())
            .unwrap_or_default();

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn select(&mut self, collection: &mut Collection) -> Result<(Vec<Record>, bool)> {
        let schema = self.schema.clone();
        let model = schema.model(collection.model())?;

        let (like, mut overflow) = self.like(model, collection.filter_state()).await?;
        let stmt = query::select(model, collection.filter_mut(), like)?;
        let rows = self.exec(&stmt).await?.rows.into_values()?;

        if let Some(limit) = collection.filter_state().limit {
            overflow |= rows.len() as u64 >= limit;
        }

        let records = rows.into_iter().map(|row| decode(model, row)).collect();
        Ok((records, overflow))
    }

    /// The fuzzy-match predicate for the filter's search term, if any, and
    /// whether a parent lookup hit the chunk bound.
    ///
    /// A label that is a foreign key is matched through the parent: parent
    /// rows whose own labels match are looked up first, at most `chunk` of
    /// them, and the child matches on their keys. Parent labels are matched
    /// as text, so the lookup goes one level deep.
    pub(crate) async fn like(
        &mut self,
        model: &Model,
        filter: &Filter,
    ) -> Result<(Option<Expr>, bool)> {
        let Some(term) = filter.like.as_deref() else {
            return Ok((None, false));
        };

        let schema = self.schema.clone();
        let chunk = self.config.chunk;
        let mut parents = ParentKeys::new();
        let mut overflow = false;

        for label in &model.label {
            let Some(parent) = model.parents.get(label) else {
                continue;
            };

            let parent_model = schema.model(&parent.model)?;
            let store = parent_model.expect_field(&parent.field)?.store().to_string();

            let mut lookup = Filter::new();
            lookup.limit = Some(chunk);

            let like = query::like_expr(parent_model, term, &ParentKeys::new())?;
            let stmt = query::select(parent_model, &mut lookup, like)?;
            let rows = self.exec(&stmt).await?.rows.into_values()?;

            overflow |= rows.len() as u64 >= chunk;

            let keys = rows
                .into_iter()
                .filter_map(|mut row| row.take(&store))
                .collect();
            parents.insert(label.clone(), keys);
        }

        Ok((query::like_expr(model, term, &parents)?, overflow))
    }
}

/// Builds a record from a row. Injected fields are read out of their base
/// documents.
pub(super) fn decode(model: &Model, mut row: Row) -> Record {
    let mut stored = IndexMap::new();

    for field in model.stored_fields() {
        let value = row.take(field.store()).unwrap_or_default();
        stored.insert(field.name.as_str(), value);
    }

    let values = model
        .fields
        .iter()
        .map(|field| {
            let value = match field.injection() {
                Some((base, path)) => stored
                    .get(base)
                    .map(|doc| document::read(doc, path))
                    .unwrap_or_default(),
                None => stored.get(field.name.as_str()).cloned().unwrap_or_default(),
            };
            (field.name.clone(), value)
        })
        .collect();

    Record::retrieved(values)
}
