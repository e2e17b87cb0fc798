use crate::Collection;

use indexmap::{IndexMap, IndexSet};
use relsql_core::stmt::Value;

/// Where a record or collection is in its lifecycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Not yet written
    #[default]
    Create,

    /// Bound to a filter, rows not yet read
    Retrieve,

    /// Bound to persisted rows
    Update,
}

/// One row's field values, by field name, with the set of fields changed
/// since the row was last written or read.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Record {
    values: IndexMap<String, Value>,
    changed: IndexSet<String>,
    action: Action,

    /// Pending child rows by collection name
    children: IndexMap<String, Collection>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record read back from the database.
    pub(crate) fn retrieved(values: IndexMap<String, Value>) -> Self {
        Self {
            values,
            action: Action::Update,
            ..Self::default()
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_child(mut self, collection: impl Into<String>, child: Collection) -> Self {
        self.children.insert(collection.into(), child);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        self.values.insert(field.clone(), value.into());
        self.changed.insert(field);
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_changed(&self, field: &str) -> bool {
        self.changed.contains(field)
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn child(&self, collection: &str) -> Option<&Collection> {
        self.children.get(collection)
    }

    pub fn child_mut(&mut self, collection: &str) -> Option<&mut Collection> {
        self.children.get_mut(collection)
    }

    pub(crate) fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Stores a value produced by the database, such as a generated key.
    pub(crate) fn fill(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// The record now mirrors its persisted row.
    pub(crate) fn persisted(&mut self) {
        self.changed.clear();
        self.action = Action::Update;
    }
}
