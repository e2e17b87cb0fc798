use serde::{Deserialize, Serialize};

/// A parent relation, declared on the child model and keyed by the child's
/// foreign key field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    /// Name of the parent model
    pub model: String,

    /// Field on the parent the foreign key references
    pub field: String,
}

/// A child collection, declared on the parent model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Name of the child model
    pub model: String,

    /// Foreign key field on the child
    pub field: String,

    /// Field on the parent copied into the child's foreign key
    pub parent_field: String,
}

impl Parent {
    pub fn new(model: impl Into<String>, field: impl Into<String>) -> Self {
        Parent {
            model: model.into(),
            field: field.into(),
        }
    }
}

impl Child {
    pub fn new(
        model: impl Into<String>,
        field: impl Into<String>,
        parent_field: impl Into<String>,
    ) -> Self {
        Child {
            model: model.into(),
            field: field.into(),
            parent_field: parent_field.into(),
        }
    }
}
