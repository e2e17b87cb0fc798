use super::{Name, Statement};

/// A statement to drop an index.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIndex {
    /// Schema-qualified name of the index.
    pub name: Name,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops an index.
    ///
    /// This function _does not_ add an `IF EXISTS` clause.
    pub fn drop_index(name: Name) -> Self {
        DropIndex {
            name,
            if_exists: false,
        }
        .into()
    }
}

impl From<DropIndex> for Statement {
    fn from(value: DropIndex) -> Self {
        Self::DropIndex(value)
    }
}
