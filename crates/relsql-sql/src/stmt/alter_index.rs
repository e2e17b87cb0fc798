use super::{Name, Statement};

/// Renames an index.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterIndex {
    /// Current schema-qualified name
    pub name: Name,

    pub rename_to: String,
}

impl Statement {
    pub fn alter_index_rename_to(name: Name, rename_to: impl Into<String>) -> Self {
        AlterIndex {
            name,
            rename_to: rename_to.into(),
        }
        .into()
    }
}

impl From<AlterIndex> for Statement {
    fn from(value: AlterIndex) -> Self {
        Self::AlterIndex(value)
    }
}
