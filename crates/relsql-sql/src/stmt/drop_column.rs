use super::{Name, Statement};

/// A statement to drop a column from a table.
#[derive(Debug, Clone, PartialEq)]
pub struct DropColumn {
    pub table: Name,

    pub name: String,
}

impl Statement {
    pub fn drop_column(table: Name, name: impl Into<String>) -> Self {
        DropColumn {
            table,
            name: name.into(),
        }
        .into()
    }
}

impl From<DropColumn> for Statement {
    fn from(value: DropColumn) -> Self {
        Self::DropColumn(value)
    }
}
