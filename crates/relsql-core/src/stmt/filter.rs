use super::Value;

use indexmap::IndexMap;

/// Pending criteria for one field: operator key to value, in the order added.
///
/// The operator key is either a base operator (`eq`, `in`, `like`, ...) or a
/// nested path optionally followed by one (`a__b__0__gt`).
pub type Criteria = IndexMap<String, Value>;

/// Filter, search, sort and pagination state attached to a retrieve request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Criteria per field name, in the order fields were first filtered.
    pub criteria: IndexMap<String, Criteria>,

    /// Free-text term matched against the model's label fields.
    pub like: Option<String>,

    /// Sort override. Applies to exactly one execution.
    pub sort: Option<Vec<String>>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion for `field`. Repeating an operator replaces its value.
    pub fn add(&mut self, field: &str, operator: &str, value: impl Into<Value>) {
        self.criteria
            .entry(field.to_string())
            .or_default()
            .insert(operator.to_string(), value.into());
    }

    pub fn criteria(&self, field: &str) -> Option<&Criteria> {
        self.criteria.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.values().all(|criteria| criteria.is_empty()) && self.like.is_none()
    }

    /// Consumes the single-use sort override.
    pub fn take_sort(&mut self) -> Option<Vec<String>> {
        self.sort.take()
    }
}
