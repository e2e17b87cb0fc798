use super::{ColumnDef, Name, Statement};

/// A statement to add a column to a table.
#[derive(Debug, Clone, PartialEq)]
pub struct AddColumn {
    pub table: Name,

    pub column: ColumnDef,
}

impl Statement {
    pub fn add_column(table: Name, column: ColumnDef) -> Self {
        AddColumn { table, column }.into()
    }
}

impl From<AddColumn> for Statement {
    fn from(value: AddColumn) -> Self {
        Self::AddColumn(value)
    }
}
