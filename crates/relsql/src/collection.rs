use crate::{Action, Record};

use indexmap::IndexMap;
use relsql_core::stmt::{Filter, Value};

/// The runtime row set of one model.
///
/// A collection starts out either holding records to create ([`new`],
/// [`bulk`]) or bound to a filter ([`query`]). Once written or read it holds
/// persisted records and moves to [`Action::Update`].
///
/// [`new`]: Collection::new
/// [`bulk`]: Collection::bulk
/// [`query`]: Collection::query
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Collection {
    model: String,
    records: Vec<Record>,
    action: Action,

    /// Created rows are not tracked after the insert
    bulk: bool,

    filter: Filter,

    /// Values assigned to every row matching the filter
    assignments: IndexMap<String, Value>,

    /// Set when more rows may match than were returned
    overflow: bool,
}

impl Collection {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn bulk(model: impl Into<String>) -> Self {
        Self {
            bulk: true,
            ..Self::new(model)
        }
    }

    pub fn query(model: impl Into<String>) -> Self {
        Self {
            action: Action::Retrieve,
            ..Self::new(model)
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn is_bulk(&self) -> bool {
        self.bulk
    }

    pub fn overflow(&self) -> bool {
        self.overflow
    }

    pub fn add(mut self, record: Record) -> Self {
        self.push(record);
        self
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Adds a criterion. `key` is a field name optionally followed by a
    /// nested path and an operator, `__` separated: `id__in`,
    /// `meta__a__b__gt`. A bare field name filters on equality.
    pub fn filter(mut self, key: &str, value: impl Into<Value>) -> Self {
        let (field, operator) = key.split_once("__").unwrap_or((key, "eq"));
        self.filter.add(field, operator, value);
        self
    }

    /// Matches `term` against the model's label fields.
    pub fn like(mut self, term: impl Into<String>) -> Self {
        self.filter.like = Some(term.into());
        self
    }

    /// Overrides the model's order for the next execution only.
    pub fn sort(mut self, sort: &[&str]) -> Self {
        self.filter.sort = Some(sort.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.filter.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.filter.offset = Some(offset);
        self
    }

    /// Assigns `value` to `field`.
    ///
    /// While the collection is bound to a filter the assignment applies to
    /// every matching row; otherwise it is set on each held record.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        let value = value.into();

        if self.action == Action::Retrieve {
            self.assignments.insert(field.to_string(), value);
        } else {
            for record in &mut self.records {
                record.set(field, value.clone());
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    pub(crate) fn filter_state(&self) -> &Filter {
        &self.filter
    }

    pub(crate) fn has_assignments(&self) -> bool {
        !self.assignments.is_empty()
    }

    pub(crate) fn take_assignments(&mut self) -> IndexMap<String, Value> {
        std::mem::take(&mut self.assignments)
    }

    pub(crate) fn records_vec_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    /// Replaces the held records with rows just read.
    pub(crate) fn retrieved(&mut self, records: Vec<Record>, overflow: bool) {
        self.records = records;
        self.overflow = overflow;
        self.action = Action::Update;
    }

    pub(crate) fn persisted(&mut self) {
        self.action = Action::Update;
    }
}
